use crate::identifier::core::{Effect, Event};
use crate::library::logger::interface::Logger;
use crate::model_provider::interface::ModelProvider;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger + Send + Sync>,
    model_provider: Arc<dyn ModelProvider + Send + Sync>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        model_provider: Arc<dyn ModelProvider + Send + Sync>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("run_effect"),
            model_provider,
        }
    }

    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Event>) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::LoadModel => {
                let loaded = self.model_provider.load();
                if let Err(error) = &loaded {
                    let _ = self.logger.error(&format!("Model load failed: {}", error));
                }
                let _ = event_sender.send(Event::ModelLoadDone(loaded));
            }
            Effect::Classify { model, image } => {
                let classified = model.classify(&image);
                if let Err(error) = &classified {
                    let _ = self
                        .logger
                        .error(&format!("Classifying {} failed: {}", image.name(), error));
                }
                let _ = event_sender.send(Event::ClassifyDone(classified));
            }
        }
    }
}
