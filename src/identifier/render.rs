use crate::identifier::view::{Affordance, Preview, View};
use crate::staged_image::StagedImage;
use eframe::egui;
use image::{imageops, RgbaImage};
use std::borrow::Cow;

pub struct Render {
    preview_max_size: f32,
    preview_texture: Option<(u64, egui::TextureHandle)>,
}

impl Render {
    pub fn new(preview_max_size: f32) -> Self {
        Self {
            preview_max_size,
            preview_texture: None,
        }
    }

    /// Draws the view and returns the affordance the user activated this frame.
    pub fn render(&mut self, ctx: &egui::Context, view: &View) -> Option<Affordance> {
        let mut activated = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);

                if let Some(model_name) = view.model_name {
                    ui.weak(format!("Model: {}", model_name));
                    ui.add_space(8.0);
                }

                match &view.preview {
                    Some(Preview::Image(image)) => {
                        let texture = self.preview_texture(ctx, image);
                        let size = fit_within(image.dimensions(), self.preview_max_size);
                        let hover = image
                            .source()
                            .map(|path| path.display().to_string())
                            .unwrap_or_else(|| image.name().to_string());
                        ui.add(egui::Image::new(egui::load::SizedTexture::new(
                            texture.id(),
                            size,
                        )))
                        .on_hover_text(hover);
                    }
                    Some(Preview::Empty) => {
                        ui.weak("No image selected");
                    }
                    None => {}
                }

                if view.is_results_visible() {
                    ui.add_space(8.0);
                    for row in &view.results {
                        ui.label(egui::RichText::new(row).monospace());
                    }
                }

                if let Some(error) = view.error {
                    ui.add_space(8.0);
                    ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
                }

                ui.add_space(16.0);
                activated = render_affordance(ui, view.affordance);
            });
        });

        activated
    }

    fn preview_texture(&mut self, ctx: &egui::Context, image: &StagedImage) -> egui::TextureHandle {
        if let Some((id, texture)) = &self.preview_texture {
            if *id == image.id() {
                return texture.clone();
            }
        }

        let pixels = preview_pixels(image.pixels(), self.preview_max_size);
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        let texture = ctx.load_texture(
            format!("preview-{}", image.id()),
            color_image,
            egui::TextureOptions::LINEAR,
        );

        self.preview_texture = Some((image.id(), texture.clone()));
        texture
    }
}

fn render_affordance(ui: &mut egui::Ui, affordance: Affordance) -> Option<Affordance> {
    let clicked = match affordance {
        Affordance::LoadModel => ui.button("Load Model").clicked(),
        Affordance::Busy(message) => {
            ui.spinner();
            ui.label(message);
            false
        }
        Affordance::PickImage => {
            let clicked = ui.button("Upload photo").clicked();
            ui.weak("or drop an image onto the window");
            clicked
        }
        Affordance::Identify => ui.button("Identify").clicked(),
        Affordance::Reset => ui.button("Reset").clicked(),
        Affordance::Retry => ui.button("Try again").clicked(),
    };

    clicked.then_some(affordance)
}

/// Scales down so the longest side is at most `max_size`. Never scales up.
pub fn fit_within((width, height): (u32, u32), max_size: f32) -> egui::Vec2 {
    let (width, height) = (width.max(1) as f32, height.max(1) as f32);
    let scale = (max_size / width.max(height)).min(1.0);
    egui::vec2(width * scale, height * scale)
}

/// Pixels to upload for the preview texture, shrunk to the displayed size.
pub fn preview_pixels(pixels: &RgbaImage, max_size: f32) -> Cow<'_, RgbaImage> {
    let size = fit_within(pixels.dimensions(), max_size);
    let (width, height) = (
        (size.x.round() as u32).max(1),
        (size.y.round() as u32).max(1),
    );

    if (width, height) == pixels.dimensions() {
        return Cow::Borrowed(pixels);
    }

    Cow::Owned(imageops::thumbnail(pixels, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_scales_down_longest_side() {
        let size = fit_within((800, 400), 360.0);
        assert_eq!(size, egui::vec2(360.0, 180.0));
    }

    #[test]
    fn test_fit_within_never_scales_up() {
        let size = fit_within((100, 50), 360.0);
        assert_eq!(size, egui::vec2(100.0, 50.0));
    }

    #[test]
    fn test_preview_pixels_shrinks_large_image() {
        let pixels = RgbaImage::new(1200, 600);

        let preview = preview_pixels(&pixels, 360.0);

        assert_eq!(preview.dimensions(), (360, 180));
    }

    #[test]
    fn test_preview_pixels_keeps_small_image() {
        let pixels = RgbaImage::new(100, 50);

        let preview = preview_pixels(&pixels, 360.0);

        assert!(matches!(preview, Cow::Borrowed(_)));
        assert_eq!(preview.dimensions(), (100, 50));
    }
}
