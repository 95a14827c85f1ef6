use crate::config::FakeProviderConfig;
use crate::library::logger::interface::Logger;
use crate::model_provider::interface::{Classification, Model, ModelHandle, ModelProvider};
use crate::staged_image::StagedImage;
use rand::seq::SliceRandom;
use std::sync::Arc;

const LABELS: [&str; 18] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

pub struct ModelProviderFake {
    config: FakeProviderConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelProviderFake {
    pub fn new(config: FakeProviderConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("model_provider").with_namespace("fake"),
        }
    }
}

impl ModelProvider for ModelProviderFake {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Loading model...")?;
        std::thread::sleep(self.config.load_latency);

        if rand::random::<f32>() < self.config.failure_rate {
            self.logger.error("Model load failed")?;
            return Err("fake model failed to load".into());
        }

        self.logger.info("Model loaded")?;
        Ok(ModelHandle::new(FakeModel {
            config: self.config.clone(),
            logger: self.logger.clone(),
        }))
    }
}

struct FakeModel {
    config: FakeProviderConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Model for FakeModel {
    fn name(&self) -> &str {
        "fake"
    }

    fn classify(
        &self,
        image: &StagedImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Classifying {} with fake model...", image.name()))?;
        std::thread::sleep(self.config.classify_latency);

        if rand::random::<f32>() < self.config.failure_rate {
            self.logger.error("Classification failed")?;
            return Err("fake model failed to classify".into());
        }

        let classifications = random_classifications(self.config.top_k);

        self.logger
            .info(&format!("Classified: {:?}", classifications))?;

        Ok(classifications)
    }
}

/// Random scores over the label vocabulary, normalised to sum to one and
/// sorted by descending confidence.
fn random_classifications(top_k: usize) -> Vec<Classification> {
    let mut rng = rand::rng();

    let mut labels = LABELS.to_vec();
    labels.shuffle(&mut rng);

    let scores: Vec<f32> = labels.iter().map(|_| rand::random::<f32>()).collect();
    let total: f32 = scores.iter().sum::<f32>().max(f32::EPSILON);

    let mut classifications: Vec<Classification> = labels
        .into_iter()
        .zip(scores)
        .map(|(label, score)| Classification {
            label: label.to_string(),
            confidence: (score / total).clamp(0.0, 1.0),
        })
        .collect();

    classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    classifications.truncate(top_k);
    classifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::DynamicImage;
    use std::time::Duration;

    fn provider(failure_rate: f32) -> ModelProviderFake {
        let config = FakeProviderConfig {
            load_latency: Duration::ZERO,
            classify_latency: Duration::ZERO,
            failure_rate,
            top_k: 3,
        };
        let logger = Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
        ));
        ModelProviderFake::new(config, logger)
    }

    #[test]
    fn test_classifications_are_sorted_and_bounded() {
        let model = provider(0.0).load().unwrap();
        let image = StagedImage::new("blank.png", None, DynamicImage::new_rgb8(8, 8));

        let classifications = model.classify(&image).unwrap();

        assert_eq!(classifications.len(), 3);
        for pair in classifications.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        for classification in &classifications {
            assert!((0.0..=1.0).contains(&classification.confidence));
            assert!(LABELS.contains(&classification.label.as_str()));
        }
    }

    #[test]
    fn test_top_k_larger_than_vocabulary() {
        let classifications = random_classifications(100);
        assert_eq!(classifications.len(), LABELS.len());
        let total: f32 = classifications.iter().map(|c| c.confidence).sum();
        assert!((total - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_failure_rate_one_always_fails() {
        assert!(provider(1.0).load().is_err());
    }

    #[test]
    fn test_handle_name() {
        let model = provider(0.0).load().unwrap();
        assert_eq!(model.name(), "fake");
    }
}
