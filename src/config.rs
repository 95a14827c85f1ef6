use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub labels_path: Option<PathBuf>,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("./models/mobilenetv2-7.onnx"),
            labels_path: Some(PathBuf::from("./models/imagenet_labels.txt")),
            input_shape: (224, 224),
            top_k: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeProviderConfig {
    pub load_latency: Duration,
    pub classify_latency: Duration,
    pub failure_rate: f32,
    pub top_k: usize,
}

impl Default for FakeProviderConfig {
    fn default() -> Self {
        Self {
            load_latency: Duration::from_secs(2),
            classify_latency: Duration::from_secs(1),
            failure_rate: 0.0,
            top_k: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    Fake(FakeProviderConfig),
    TractOnnx(ModelConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub preview_max_size: f32,
    pub busy_repaint_interval: Duration,
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: local_offset(),
            window_title: "Image Identifier".to_string(),
            window_size: [480.0, 640.0],
            preview_max_size: 360.0,
            busy_repaint_interval: Duration::from_millis(100),
            provider: ProviderConfig::Fake(FakeProviderConfig::default()),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `IDENTIFIER_MODEL_PATH` switches to the ONNX provider; without it the
    /// fake provider is used.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let top_k = lookup("IDENTIFIER_TOP_K").and_then(|value| value.parse::<usize>().ok());

        config.provider = match lookup("IDENTIFIER_MODEL_PATH") {
            Some(model_path) => {
                let defaults = ModelConfig::default();
                ProviderConfig::TractOnnx(ModelConfig {
                    onnx_model_path: PathBuf::from(model_path),
                    labels_path: lookup("IDENTIFIER_LABELS_PATH")
                        .map(PathBuf::from)
                        .or(defaults.labels_path.clone()),
                    top_k: top_k.unwrap_or(defaults.top_k),
                    ..defaults
                })
            }
            None => {
                let defaults = FakeProviderConfig::default();
                let failure_rate = lookup("IDENTIFIER_FAKE_FAILURE_RATE")
                    .and_then(|value| value.parse::<f32>().ok())
                    .map(|rate| rate.clamp(0.0, 1.0))
                    .unwrap_or(defaults.failure_rate);
                ProviderConfig::Fake(FakeProviderConfig {
                    failure_rate,
                    top_k: top_k.unwrap_or(defaults.top_k),
                    ..defaults
                })
            }
        };

        config
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
