use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use log::{error, info};

use crate::ops::commands::{self, Command, RATE_MAX, RATE_MIN};
use crate::ops::repeat_enforcer;
use crate::player::clock::{ClockSource, PlayerEvent};
use crate::player::pipeline::GstPlayer;
use crate::player::probe;
use crate::types::media::MediaInfo;
use crate::types::preferences::Preferences;
use crate::types::session::ReviewSession;
use crate::ui::controls::{ControlsEvent, ControlsPanel};
use crate::ui::seek_bar::{SeekBar, SeekBarEvent, SeekBarState};
use crate::ui::toast::Toasts;
use crate::ui::video_view::VideoView;

/// The controls strip stays visible this long after the last input while
/// playback runs.
const CONTROLS_HIDE_AFTER: Duration = Duration::from_millis(2500);

pub struct AppState {
    pub session: ReviewSession,
    pub player: GstPlayer,
    pub preferences: Preferences,
    pub seek_bar: SeekBarState,
    pub video_view: VideoView,
    pub toasts: Toasts,
    pub last_activity: Instant,
}

pub struct LoopioApp {
    pub state: AppState,
}

impl LoopioApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        player: GstPlayer,
        preferences: Preferences,
    ) -> Self {
        cc.egui_ctx.options_mut(|options| {
            options.theme_preference = theme_preference(preferences.dark_theme);
        });

        Self {
            state: AppState {
                session: ReviewSession::new(),
                player,
                preferences,
                seek_bar: SeekBarState::default(),
                video_view: VideoView::new(),
                toasts: Toasts::new(),
                last_activity: Instant::now(),
            },
        }
    }

    fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Video", &["mp4", "mov", "mkv", "webm", "avi"]);
        if let Some(dir) = &self.state.preferences.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_video(path);
        }
    }

    fn load_video(&mut self, path: PathBuf) {
        if let Some(dir) = path.parent() {
            self.state.preferences.last_open_dir = Some(dir.to_path_buf());
            self.save_preferences();
        }

        let media = probe::probe_media(&path)
            .unwrap_or_else(|| MediaInfo::new(&path, None, None));

        match self.state.player.open(&path, media.duration) {
            Ok(()) => {
                info!("loaded {}", path.display());
                self.state.session.load(media);
                self.state.video_view.clear();
            }
            Err(err) => {
                error!("failed to open {}: {}", path.display(), err);
                self.state
                    .toasts
                    .push(format!("Could not open video: {}", err));
            }
        }
    }

    fn save_preferences(&self) {
        if let Some(path) = Preferences::default_path() {
            if let Err(err) = self.state.preferences.save_to_file(&path) {
                error!("failed to save preferences: {}", err);
            }
        }
    }

    /// Keyboard adapter: map key presses onto the same commands the buttons
    /// and seek bar produce. Suppressed while a text widget has focus so
    /// typed characters are not hijacked.
    fn keyboard_commands(&self, ctx: &egui::Context) -> Vec<Command> {
        let mut queued = Vec::new();
        if ctx.wants_keyboard_input() {
            return queued;
        }
        let step = self.state.preferences.rate_step;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Z) {
                queued.push(Command::SetStart(None));
            }
            if i.key_pressed(egui::Key::X) {
                queued.push(Command::SetEnd(None));
            }
            if i.key_pressed(egui::Key::C) {
                queued.push(Command::Reset);
            }
            if i.key_pressed(egui::Key::V) {
                queued.push(Command::GoToStart);
            }
            if i.key_pressed(egui::Key::Space) {
                queued.push(Command::TogglePlay);
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                queued.push(Command::NudgeRate(step));
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                queued.push(Command::NudgeRate(-step));
            }
        });
        queued
    }
}

impl eframe::App for LoopioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Activity tracking for the controls auto-hide debounce
        let had_input = ctx.input(|i| {
            i.pointer.any_down() || i.pointer.is_moving() || !i.events.is_empty()
        });
        if had_input {
            self.state.last_activity = Instant::now();
        }

        // Drain player notifications; every position tick runs the enforcer,
        // unless a scrub is in progress.
        for event in self.state.player.poll() {
            match event {
                PlayerEvent::PositionAdvanced(_) => {
                    repeat_enforcer::enforce(
                        &self.state.session.range,
                        &mut self.state.player,
                        self.state.seek_bar.is_dragging(),
                    );
                }
                PlayerEvent::MetadataReady { duration } => {
                    info!("media ready, duration {:.2}s", duration);
                    if let Some(media) = &mut self.state.session.media {
                        if media.duration.is_none() {
                            media.duration = Some(duration);
                        }
                    }
                }
                PlayerEvent::EndOfStream => {
                    repeat_enforcer::enforce(
                        &self.state.session.range,
                        &mut self.state.player,
                        self.state.seek_bar.is_dragging(),
                    );
                }
                PlayerEvent::Error(message) => {
                    error!("pipeline error: {}", message);
                    self.state.toasts.push(format!("Playback error: {}", message));
                }
                PlayerEvent::Playing | PlayerEvent::Paused => {}
            }
        }

        let mut queued = self.keyboard_commands(ctx);

        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::F)) {
            let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }

        let controls_visible = self.state.player.is_paused()
            || self.state.session.media.is_none()
            || self.state.seek_bar.is_dragging()
            || self.state.last_activity.elapsed() < CONTROLS_HIDE_AFTER;

        let mut bar_events = Vec::new();
        let mut control_events = Vec::new();

        if controls_visible {
            egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
                ui.add_space(6.0);
                bar_events = SeekBar::new(
                    &mut self.state.seek_bar,
                    &self.state.session.range,
                    self.state.player.position(),
                    self.state.player.duration(),
                )
                .show(ui);
                ui.add_space(4.0);
                control_events = ControlsPanel {
                    media: self.state.session.media.as_ref(),
                    range: &self.state.session.range,
                    position: self.state.player.position(),
                    duration: self.state.player.duration(),
                    rate: self.state.player.rate(),
                    paused: self.state.player.is_paused(),
                    rate_step: self.state.preferences.rate_step,
                }
                .show(ui);
                ui.add_space(6.0);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(frame) = self.state.player.latest_frame() {
                self.state.video_view.update_texture(frame, ctx);
            }
            if self.state.video_view.show(ui) {
                queued.push(Command::TogglePlay);
            }
        });

        for event in bar_events {
            match event {
                SeekBarEvent::Seek(time) => self.state.player.set_position(time),
                SeekBarEvent::SetStart(time) => queued.push(Command::SetStart(Some(time))),
                SeekBarEvent::SetEnd(time) => queued.push(Command::SetEnd(Some(time))),
            }
        }

        let mut open_file = false;
        for event in control_events {
            match event {
                ControlsEvent::Command(command) => queued.push(command),
                ControlsEvent::OpenFile => open_file = true,
                ControlsEvent::SetRate(rate) => {
                    self.state.player.set_rate(rate.clamp(RATE_MIN, RATE_MAX));
                }
                ControlsEvent::ToggleTheme => {
                    self.state.preferences.dark_theme = !self.state.preferences.dark_theme;
                    ctx.options_mut(|options| {
                        options.theme_preference =
                            theme_preference(self.state.preferences.dark_theme);
                    });
                    self.save_preferences();
                }
            }
        }

        for command in queued {
            commands::dispatch(
                command,
                &mut self.state.session.range,
                &mut self.state.player,
                &mut self.state.toasts,
            );
        }

        if open_file {
            self.open_file_dialog();
        }

        self.state.toasts.show(ctx);

        // Keep frames coming while the pipeline runs
        if !self.state.player.is_paused() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

fn theme_preference(dark: bool) -> egui::ThemePreference {
    if dark {
        egui::ThemePreference::Dark
    } else {
        egui::ThemePreference::Light
    }
}
