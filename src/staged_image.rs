use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A decoded image the user picked, ready to preview and classify.
///
/// Cloning is cheap: the pixels are shared. Two staged images are equal only
/// when they come from the same pick.
#[derive(Clone)]
pub struct StagedImage {
    id: u64,
    name: String,
    source: Option<PathBuf>,
    pixels: Arc<RgbaImage>,
}

impl StagedImage {
    pub fn new(name: impl Into<String>, source: Option<PathBuf>, image: DynamicImage) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            source,
            pixels: Arc::new(image.to_rgba8()),
        }
    }

    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let image = image::open(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, Some(path.to_path_buf()), image))
    }

    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::new(name, None, image))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.pixels.as_ref().clone())
    }
}

impl PartialEq for StagedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// Pixels are left out so state logs stay readable.
impl fmt::Debug for StagedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("StagedImage")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size", &format_args!("{}x{}", width, height))
            .finish()
    }
}
