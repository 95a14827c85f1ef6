use crate::staged_image::StagedImage;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait Model: Send + Sync {
    fn name(&self) -> &str;

    /// Returns labels ordered by descending confidence.
    fn classify(
        &self,
        image: &StagedImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ModelProvider: Send + Sync {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>>;
}

/// Shared handle to a loaded model. Equality is identity.
#[derive(Clone)]
pub struct ModelHandle(Arc<dyn Model + Send + Sync>);

impl ModelHandle {
    pub fn new(model: impl Model + 'static) -> Self {
        Self(Arc::new(model))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn classify(
        &self,
        image: &StagedImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.0.classify(image)
    }
}

impl PartialEq for ModelHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelHandle").field(&self.name()).finish()
    }
}
