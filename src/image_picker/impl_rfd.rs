use crate::image_picker::interface::{ImagePicker, IMAGE_EXTENSIONS};
use crate::library::logger::interface::Logger;
use crate::staged_image::StagedImage;
use std::sync::Arc;

pub struct ImagePickerRfd {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImagePickerRfd {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_picker").with_namespace("rfd"),
        }
    }
}

impl ImagePicker for ImagePickerRfd {
    fn pick(&self) -> Result<Option<Vec<StagedImage>>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Opening file dialog...")?;

        let Some(path) = rfd::FileDialog::new()
            .set_title("Upload photo")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        else {
            self.logger.info("File dialog cancelled")?;
            return Ok(None);
        };

        self.logger.info(&format!("Decoding {}", path.display()))?;
        let image = StagedImage::open(&path)?;

        Ok(Some(vec![image]))
    }
}
