use crate::model_provider::interface::{Classification, ModelHandle};
use crate::staged_image::StagedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ModelLoading,
    LoadFailed,
    ModelReady,
    ImageStaged,
    Classifying,
    ClassifyFailed,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    #[default]
    Idle,
    ModelLoading,
    LoadFailed {
        message: String,
    },
    ModelReady {
        model: ModelHandle,
    },
    ImageStaged {
        model: ModelHandle,
        image: Option<StagedImage>,
    },
    Classifying {
        model: ModelHandle,
        image: StagedImage,
    },
    ClassifyFailed {
        model: ModelHandle,
        image: Option<StagedImage>,
        message: String,
    },
    Complete {
        model: ModelHandle,
        image: StagedImage,
        results: Vec<Classification>,
    },
}

impl State {
    pub fn phase(&self) -> Phase {
        match self {
            State::Idle => Phase::Idle,
            State::ModelLoading => Phase::ModelLoading,
            State::LoadFailed { .. } => Phase::LoadFailed,
            State::ModelReady { .. } => Phase::ModelReady,
            State::ImageStaged { .. } => Phase::ImageStaged,
            State::Classifying { .. } => Phase::Classifying,
            State::ClassifyFailed { .. } => Phase::ClassifyFailed,
            State::Complete { .. } => Phase::Complete,
        }
    }

    pub fn model(&self) -> Option<&ModelHandle> {
        match self {
            State::Idle | State::ModelLoading | State::LoadFailed { .. } => None,
            State::ModelReady { model }
            | State::ImageStaged { model, .. }
            | State::Classifying { model, .. }
            | State::ClassifyFailed { model, .. }
            | State::Complete { model, .. } => Some(model),
        }
    }

    pub fn staged_image(&self) -> Option<&StagedImage> {
        match self {
            State::ImageStaged { image, .. } | State::ClassifyFailed { image, .. } => {
                image.as_ref()
            }
            State::Classifying { image, .. } | State::Complete { image, .. } => Some(image),
            State::Idle
            | State::ModelLoading
            | State::LoadFailed { .. }
            | State::ModelReady { .. } => None,
        }
    }

    pub fn results(&self) -> &[Classification] {
        match self {
            State::Complete { results, .. } => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            State::LoadFailed { message } | State::ClassifyFailed { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    LoadModelRequested,
    ModelLoadDone(Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>>),
    ImagesSelected(Vec<StagedImage>),
    IdentifyRequested,
    ClassifyDone(Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>),
    ResetRequested,
    RetryRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    Classify {
        model: ModelHandle,
        image: StagedImage,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Idle, vec![])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // Model loading
        (State::Idle, Event::LoadModelRequested) => {
            (State::ModelLoading, vec![Effect::LoadModel])
        }
        (State::ModelLoading, Event::ModelLoadDone(Ok(model))) => {
            (State::ModelReady { model }, vec![])
        }
        (State::ModelLoading, Event::ModelLoadDone(Err(error))) => (
            State::LoadFailed {
                message: error.to_string(),
            },
            vec![],
        ),
        (State::LoadFailed { .. }, Event::RetryRequested) => (State::Idle, vec![]),

        // Staging. Only the first image counts; an empty selection still
        // moves on, with nothing staged.
        (State::ModelReady { model }, Event::ImagesSelected(images)) => (
            State::ImageStaged {
                model,
                image: images.into_iter().next(),
            },
            vec![],
        ),

        // Classification
        (State::ImageStaged { model, image }, Event::IdentifyRequested) => match image {
            Some(image) => (
                State::Classifying {
                    model: model.clone(),
                    image: image.clone(),
                },
                vec![Effect::Classify { model, image }],
            ),
            None => (
                State::ClassifyFailed {
                    model,
                    image: None,
                    message: "No image staged".to_string(),
                },
                vec![],
            ),
        },
        (State::Classifying { model, image }, Event::ClassifyDone(Ok(results))) => (
            State::Complete {
                model,
                image,
                results,
            },
            vec![],
        ),
        (State::Classifying { model, image }, Event::ClassifyDone(Err(error))) => (
            State::ClassifyFailed {
                model,
                image: Some(image),
                message: error.to_string(),
            },
            vec![],
        ),
        (State::ClassifyFailed { model, image, .. }, Event::RetryRequested) => match image {
            Some(image) => (
                State::ImageStaged {
                    model,
                    image: Some(image),
                },
                vec![],
            ),
            None => (State::ModelReady { model }, vec![]),
        },

        // Reset keeps the loaded model
        (State::Complete { model, .. }, Event::ResetRequested) => {
            (State::ModelReady { model }, vec![])
        }

        // Anything else, including late completions, is ignored
        (state, _) => (state, vec![]),
    }
}
