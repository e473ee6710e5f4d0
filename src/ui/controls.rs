use eframe::egui;

use crate::ops::commands::{Command, RATE_MAX, RATE_MIN};
use crate::types::media::MediaInfo;
use crate::types::repeat_range::RepeatRange;
use crate::ui::seek_bar::format_time;

/// What the controls strip asked for this frame. Button presses reduce to
/// the same `Command` values the keyboard produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlsEvent {
    Command(Command),
    OpenFile,
    SetRate(f64),
    ToggleTheme,
}

/// The transport strip under the seek bar: buttons, rate control, and the
/// time/range readouts.
pub struct ControlsPanel<'a> {
    pub media: Option<&'a MediaInfo>,
    pub range: &'a RepeatRange,
    pub position: f64,
    pub duration: Option<f64>,
    pub rate: f64,
    pub paused: bool,
    pub rate_step: f64,
}

impl ControlsPanel<'_> {
    pub fn show(&self, ui: &mut egui::Ui) -> Vec<ControlsEvent> {
        let mut events = Vec::new();

        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                events.push(ControlsEvent::OpenFile);
            }
            let play_label = if self.paused { "▶ Play" } else { "⏸ Pause" };
            if ui.button(play_label).clicked() {
                events.push(ControlsEvent::Command(Command::TogglePlay));
            }
            if ui.button("⏮ Go to start").clicked() {
                events.push(ControlsEvent::Command(Command::GoToStart));
            }
            if ui.button("Set start").on_hover_text("Z").clicked() {
                events.push(ControlsEvent::Command(Command::SetStart(None)));
            }
            if ui.button("Set end").on_hover_text("X").clicked() {
                events.push(ControlsEvent::Command(Command::SetEnd(None)));
            }
            if ui.button("Reset").on_hover_text("C").clicked() {
                events.push(ControlsEvent::Command(Command::Reset));
            }
            ui.separator();
            ui.label(format!(
                "{} / {}",
                format_time(self.position),
                format_time(self.duration.unwrap_or(0.0))
            ));
            ui.separator();
            ui.label(self.range.describe());
        });

        ui.horizontal(|ui| {
            ui.label("Speed");
            let mut rate = self.rate;
            if ui
                .add(egui::Slider::new(&mut rate, RATE_MIN..=RATE_MAX).fixed_decimals(2))
                .changed()
            {
                events.push(ControlsEvent::SetRate(rate));
            }
            if ui.button("-").clicked() {
                events.push(ControlsEvent::Command(Command::NudgeRate(-self.rate_step)));
            }
            if ui.button("+").clicked() {
                events.push(ControlsEvent::Command(Command::NudgeRate(self.rate_step)));
            }
            if let Some(media) = self.media {
                ui.separator();
                let label = match media.resolution {
                    Some((width, height)) => {
                        format!("{} ({}x{})", media.file_name, width, height)
                    }
                    None => media.file_name.clone(),
                };
                ui.label(label)
                    .on_hover_text(media.path.display().to_string());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("🌓")
                    .on_hover_text("Toggle light/dark theme")
                    .clicked()
                {
                    events.push(ControlsEvent::ToggleTheme);
                }
            });
        });

        events
    }
}
