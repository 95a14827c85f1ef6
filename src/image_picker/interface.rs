use crate::staged_image::StagedImage;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub trait ImagePicker: Send + Sync {
    /// `Ok(None)` when the user cancelled. A selection may hold zero images.
    fn pick(&self) -> Result<Option<Vec<StagedImage>>, Box<dyn std::error::Error + Send + Sync>>;
}
