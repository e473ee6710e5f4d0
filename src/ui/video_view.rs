use eframe::egui;

use crate::player::pipeline::VideoFrame;

/// Displays the decoded frame, scaled to fit the available space. Clicking
/// the surface toggles playback, so the caller gets the click back.
pub struct VideoView {
    texture: Option<egui::TextureHandle>,
    last_timestamp: Option<f64>,
}

impl VideoView {
    pub fn new() -> Self {
        Self {
            texture: None,
            last_timestamp: None,
        }
    }

    pub fn clear(&mut self) {
        self.texture = None;
        self.last_timestamp = None;
    }

    /// Upload the frame into an egui texture. Re-uploads are skipped when the
    /// frame timestamp has not moved.
    pub fn update_texture(&mut self, frame: &VideoFrame, ctx: &egui::Context) {
        if self.texture.is_some() && self.last_timestamp == Some(frame.timestamp) {
            return;
        }
        self.last_timestamp = Some(frame.timestamp);

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    /// Show the frame; returns true when the surface was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label("Open a video to start reviewing");
            });
            return false;
        };

        let available = ui.available_size();
        let tex_size = texture.size_vec2();
        if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
            return false;
        }
        let scale = (available.x / tex_size.x).min(available.y / tex_size.y);
        let size = tex_size * scale;

        let response = ui
            .with_layout(
                egui::Layout::centered_and_justified(egui::Direction::TopDown),
                |ui| {
                    ui.add(
                        egui::Image::new((texture.id(), size))
                            .fit_to_exact_size(size)
                            .sense(egui::Sense::click()),
                    )
                },
            )
            .inner;
        response.clicked()
    }
}

impl Default for VideoView {
    fn default() -> Self {
        Self::new()
    }
}
