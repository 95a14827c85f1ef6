use crate::config::Config;
use crate::identifier::app::IdentifierApp;
use crate::identifier::core::Phase;
use crate::image_picker::impl_fake::ImagePickerFake;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::model_provider::interface::{Classification, Model, ModelHandle, ModelProvider};
use crate::staged_image::StagedImage;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const WAIT: Duration = Duration::from_secs(5);

pub const ALL_PHASES: [Phase; 8] = [
    Phase::Idle,
    Phase::ModelLoading,
    Phase::LoadFailed,
    Phase::ModelReady,
    Phase::ImageStaged,
    Phase::Classifying,
    Phase::ClassifyFailed,
    Phase::Complete,
];

pub fn logger() -> Arc<dyn Logger + Send + Sync> {
    Arc::new(LoggerConsole::new(
        chrono::FixedOffset::east_opt(0).unwrap(),
    ))
}

pub fn cat() -> Vec<Classification> {
    vec![Classification {
        label: "cat".to_string(),
        confidence: 0.83,
    }]
}

pub fn photo(name: &str) -> StagedImage {
    let mut img = ImageBuffer::new(8, 6);
    for pixel in img.pixels_mut() {
        *pixel = Rgb([120u8, 80, 40]);
    }
    StagedImage::new(name, None, DynamicImage::ImageRgb8(img))
}

/// Answers classify calls from a queue; an exhausted queue is an error.
pub struct ScriptedModel {
    outcomes: Mutex<VecDeque<Result<Vec<Classification>, String>>>,
}

impl Model for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn classify(
        &self,
        _image: &StagedImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(results)) => Ok(results),
            Some(Err(message)) => Err(message.into()),
            None => Err("no scripted outcome".into()),
        }
    }
}

pub fn model(outcomes: Vec<Result<Vec<Classification>, String>>) -> ModelHandle {
    ModelHandle::new(ScriptedModel {
        outcomes: Mutex::new(outcomes.into_iter().collect()),
    })
}

pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<ModelHandle, String>>>,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<Result<ModelHandle, String>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

impl ModelProvider for ScriptedProvider {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>> {
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(model)) => Ok(model),
            Some(Err(message)) => Err(message.into()),
            None => Err("no scripted model".into()),
        }
    }
}

pub struct Fixture {
    pub app: IdentifierApp,
}

impl Fixture {
    pub fn new(
        load_outcomes: Vec<Result<ModelHandle, String>>,
        selection: Option<Vec<StagedImage>>,
    ) -> Self {
        let app = IdentifierApp::new(
            Config::default(),
            logger(),
            Arc::new(ScriptedProvider::new(load_outcomes)),
            Arc::new(ImagePickerFake::new(selection)),
        );

        Self { app }
    }

    /// Blocks until the in-flight effect reports back.
    pub fn settle(&mut self) {
        assert!(
            self.app.machine_mut().wait(WAIT),
            "effect did not complete in time"
        );
    }
}
