use crate::library::logger::interface::Logger;
use std::fmt::Debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

pub type TransitionFn<TState, TEvent, TEffect> =
    dyn Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync;

pub type RunEffectFn<TEffect, TEvent> = dyn Fn(TEffect, Sender<TEvent>) + Send + Sync;

/// Owns the current state and feeds it events.
///
/// Events come either from the caller through [`StateMachine::dispatch`] or
/// from effects, which run on their own threads and report back through the
/// channel drained by [`StateMachine::poll`].
pub struct StateMachine<TState, TEvent, TEffect> {
    state: TState,
    transition_fn: Arc<TransitionFn<TState, TEvent, TEffect>>,
    run_effect_fn: Arc<RunEffectFn<TEffect, TEvent>>,
    event_sender: Sender<TEvent>,
    event_receiver: Receiver<TEvent>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl<TState, TEvent, TEffect> StateMachine<TState, TEvent, TEffect>
where
    TState: Clone + Debug,
    TEvent: Debug + Send + 'static,
    TEffect: Debug + Send + 'static,
{
    pub fn new<T, E>(
        init: (TState, Vec<TEffect>),
        transition_fn: T,
        run_effect_fn: E,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self
    where
        T: Fn(TState, TEvent) -> (TState, Vec<TEffect>) + Send + Sync + 'static,
        E: Fn(TEffect, Sender<TEvent>) + Send + Sync + 'static,
    {
        let (event_sender, event_receiver) = channel();
        let (state, effects) = init;

        let machine = Self {
            state,
            transition_fn: Arc::new(transition_fn),
            run_effect_fn: Arc::new(run_effect_fn),
            event_sender,
            event_receiver,
            logger: logger.with_namespace("state_machine"),
        };

        machine.spawn_effects(effects);

        machine
    }

    pub fn state(&self) -> &TState {
        &self.state
    }

    #[cfg(test)]
    pub fn sender(&self) -> Sender<TEvent> {
        self.event_sender.clone()
    }

    pub fn dispatch(&mut self, event: TEvent) {
        let _ = self.logger.info(&format!(
            "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
            self.state, event
        ));

        let (new_state, effects) = (self.transition_fn)(self.state.clone(), event);

        let _ = self.logger.info(&format!(
            "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
            new_state, effects
        ));

        self.state = new_state;

        self.spawn_effects(effects);
    }

    /// Applies every event already waiting in the channel. Never blocks.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Blocks until one event arrives or `timeout` elapses.
    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> bool {
        match self.event_receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(_) => false,
        }
    }

    fn spawn_effects(&self, effects: Vec<TEffect>) {
        for effect in effects {
            let effect_sender = self.event_sender.clone();
            let run_effect_fn = Arc::clone(&self.run_effect_fn);
            std::thread::spawn(move || {
                run_effect_fn(effect, effect_sender);
            });
        }
    }
}
