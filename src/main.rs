use config::{Config, ProviderConfig};
use eframe::egui;
use identifier::app::IdentifierApp;
use image_picker::impl_rfd::ImagePickerRfd;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use model_provider::impl_fake::ModelProviderFake;
use model_provider::impl_tract_onnx::ModelProviderTractOnnx;
use model_provider::interface::ModelProvider;
use std::sync::Arc;

mod config;
mod identifier;
mod image_picker;
mod library;
mod model_provider;
mod staged_image;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let model_provider: Arc<dyn ModelProvider + Send + Sync> = match &config.provider {
        ProviderConfig::Fake(fake_config) => {
            Arc::new(ModelProviderFake::new(fake_config.clone(), logger.clone()))
        }
        ProviderConfig::TractOnnx(model_config) => Arc::new(ModelProviderTractOnnx::new(
            model_config.clone(),
            logger.clone(),
        )),
    };

    let image_picker = Arc::new(ImagePickerRfd::new(logger.clone()));

    let _ = logger.info(&format!("Starting with provider {:?}", config.provider));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let title = config.window_title.clone();
    let app = IdentifierApp::new(config, logger, model_provider, image_picker);

    eframe::run_native(&title, options, Box::new(move |_cc| Box::new(app)))?;

    Ok(())
}
