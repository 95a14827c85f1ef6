use crate::image_picker::interface::ImagePicker;
use crate::staged_image::StagedImage;

pub struct ImagePickerFake {
    selection: Option<Vec<StagedImage>>,
}

impl ImagePickerFake {
    pub fn new(selection: Option<Vec<StagedImage>>) -> Self {
        Self { selection }
    }
}

impl ImagePicker for ImagePickerFake {
    fn pick(&self) -> Result<Option<Vec<StagedImage>>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.selection.clone())
    }
}
