use crate::config::Config;
use crate::identifier::core::{init, transition, Effect, Event, State};
use crate::identifier::render::Render;
use crate::identifier::run_effect::RunEffect;
use crate::identifier::view::{affordance, view, Affordance};
use crate::image_picker::interface::ImagePicker;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::model_provider::interface::ModelProvider;
use crate::staged_image::StagedImage;
use eframe::egui;
use std::sync::Arc;

pub struct IdentifierApp {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    machine: StateMachine<State, Event, Effect>,
    image_picker: Arc<dyn ImagePicker + Send + Sync>,
    render: Render,
}

impl IdentifierApp {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        model_provider: Arc<dyn ModelProvider + Send + Sync>,
        image_picker: Arc<dyn ImagePicker + Send + Sync>,
    ) -> Self {
        let run_effect = RunEffect::new(logger.clone(), model_provider);

        let machine = StateMachine::new(
            init(),
            transition,
            move |effect, event_sender| run_effect.run_effect(effect, event_sender),
            logger.clone(),
        );

        Self {
            render: Render::new(config.preview_max_size),
            config,
            logger: logger.with_namespace("app"),
            machine,
            image_picker,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &State {
        self.machine.state()
    }

    #[cfg(test)]
    pub fn machine_mut(&mut self) -> &mut StateMachine<State, Event, Effect> {
        &mut self.machine
    }

    /// Turns a control the user activated into an event.
    pub fn activate(&mut self, activated: Affordance) {
        let event = match activated {
            Affordance::LoadModel => Some(Event::LoadModelRequested),
            Affordance::Busy(_) => None,
            Affordance::PickImage => self.pick_images(),
            Affordance::Identify => Some(Event::IdentifyRequested),
            Affordance::Reset => Some(Event::ResetRequested),
            Affordance::Retry => Some(Event::RetryRequested),
        };

        if let Some(event) = event {
            self.machine.dispatch(event);
        }
    }

    fn pick_images(&self) -> Option<Event> {
        match self.image_picker.pick() {
            Ok(Some(images)) => Some(Event::ImagesSelected(images)),
            Ok(None) => None,
            Err(error) => {
                let _ = self
                    .logger
                    .error(&format!("Could not open image: {}", error));
                None
            }
        }
    }

    /// Files dropped on the window count as a pick, but only while the
    /// picker is the active control.
    pub fn drop_files(&mut self, files: &[egui::DroppedFile]) {
        if affordance(self.machine.state().phase()) != Affordance::PickImage {
            return;
        }

        let image = files.iter().find_map(|file| match decode_dropped(file) {
            Ok(image) => Some(image),
            Err(error) => {
                let _ = self.logger.error(&format!(
                    "Could not decode dropped file {}: {}",
                    file.name, error
                ));
                None
            }
        });

        if let Some(image) = image {
            self.machine.dispatch(Event::ImagesSelected(vec![image]));
        }
    }
}

fn decode_dropped(
    file: &egui::DroppedFile,
) -> Result<StagedImage, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(path) = &file.path {
        return StagedImage::open(path);
    }
    if let Some(bytes) = &file.bytes {
        return StagedImage::from_bytes(file.name.clone(), bytes);
    }
    Err("dropped file has neither a path nor contents".into())
}

impl eframe::App for IdentifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.machine.poll();

        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.drop_files(&dropped);
        }

        let screen = view(self.machine.state());
        let activated = self.render.render(ctx, &screen);

        if let Some(activated) = activated {
            self.activate(activated);
        }

        if !affordance(self.machine.state().phase()).accepts_input() {
            ctx.request_repaint_after(self.config.busy_repaint_interval);
        }
    }
}
