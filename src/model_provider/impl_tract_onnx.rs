use crate::config::ModelConfig;
use crate::library::logger::interface::Logger;
use crate::model_provider::interface::{Classification, Model, ModelHandle, ModelProvider};
use crate::model_provider::tensor::{image_to_input, softmax, top_k};
use crate::staged_image::StagedImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ModelProviderTractOnnx {
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelProviderTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("model_provider").with_namespace("tract_onnx"),
        }
    }
}

impl ModelProvider for ModelProviderTractOnnx {
    fn load(&self) -> Result<ModelHandle, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Loading model from {}...",
            self.config.onnx_model_path.display()
        ))?;

        let plan = tract_onnx::onnx()
            .model_for_path(&self.config.onnx_model_path)?
            .into_optimized()?
            .into_runnable()?;

        let labels = match &self.config.labels_path {
            Some(path) => parse_labels(&std::fs::read_to_string(path)?),
            None => Vec::new(),
        };

        let name = self
            .config
            .onnx_model_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        self.logger
            .info(&format!("Model {} loaded with {} labels", name, labels.len()))?;

        Ok(ModelHandle::new(TractOnnxModel {
            name,
            plan,
            labels,
            config: self.config.clone(),
            logger: self.logger.clone(),
        }))
    }
}

struct TractOnnxModel {
    name: String,
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Model for TractOnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(
        &self,
        image: &StagedImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Classifying {}...", image.name()))?;

        let (height, width) = self.config.input_shape;
        let input = image_to_input(&image.to_dynamic(), width, height);

        self.classify_input(input)
    }
}

impl TractOnnxModel {
    /// Runs a prepared input tensor and keeps the `top_k` most probable labels.
    fn classify_input(
        &self,
        input: Tensor,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let outputs = self.plan.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?;

        let logits: Vec<f32> = output.iter().copied().collect();
        let probabilities = softmax(&logits);

        let classifications = top_k(&probabilities, self.config.top_k)
            .into_iter()
            .map(|(index, confidence)| Classification {
                label: label_for(&self.labels, index),
                confidence: confidence.clamp(0.0, 1.0),
            })
            .collect();

        Ok(classifications)
    }
}

/// One label per line. Blank lines are skipped; a leading synset id such as
/// `n01440764 tench, Tinca tinca` is dropped.
pub fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((id, rest)) if is_synset_id(id) => rest.trim().to_string(),
            _ => line.to_string(),
        })
        .collect()
}

fn is_synset_id(token: &str) -> bool {
    token.len() == 9 && token.starts_with('n') && token[1..].chars().all(|c| c.is_ascii_digit())
}

fn label_for(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("class {}", index))
}
