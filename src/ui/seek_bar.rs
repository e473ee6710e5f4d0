use eframe::egui;

use crate::types::repeat_range::RepeatRange;

/// Pixels the pointer must travel from the press origin before the press is
/// classified as a scrub rather than a click.
const DRAG_THRESHOLD_PX: f32 = 4.0;
const BAR_HEIGHT: f32 = 18.0;
const MARKER_WIDTH: f32 = 3.0;

const START_MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 220, 120);
const END_MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 180, 255);
const PLAYHEAD_COLOR: egui::Color32 = egui::Color32::RED;

/// Which loop boundary a modifier-qualified press edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryModifier {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    /// Pointer is down but has not crossed the drag threshold yet.
    Pending {
        origin_x: f32,
        modifier: Option<BoundaryModifier>,
    },
    Scrubbing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    ScrubTo(f32),
    Click {
        x: f32,
        modifier: Option<BoundaryModifier>,
    },
    ScrubEnded,
}

/// Classifies pointer input over the bar into clicks and scrubs. Presses
/// qualified by a boundary modifier never become scrubs; they are reserved
/// for boundary-setting clicks.
#[derive(Debug, Clone, Copy)]
pub struct GestureTracker {
    state: GestureState,
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker {
            state: GestureState::Idle,
        }
    }
}

impl GestureTracker {
    pub fn is_scrubbing(&self) -> bool {
        matches!(self.state, GestureState::Scrubbing)
    }

    pub fn pointer_down(&mut self, x: f32, modifier: Option<BoundaryModifier>) {
        if matches!(self.state, GestureState::Idle) {
            self.state = GestureState::Pending {
                origin_x: x,
                modifier,
            };
        }
    }

    pub fn pointer_moved(&mut self, x: f32) -> Option<GestureAction> {
        match self.state {
            GestureState::Pending {
                origin_x,
                modifier: None,
            } if (x - origin_x).abs() > DRAG_THRESHOLD_PX => {
                self.state = GestureState::Scrubbing;
                Some(GestureAction::ScrubTo(x))
            }
            GestureState::Scrubbing => Some(GestureAction::ScrubTo(x)),
            _ => None,
        }
    }

    /// Release is global: the pointer may be anywhere by now.
    pub fn pointer_up(&mut self, x: f32) -> Option<GestureAction> {
        let action = match self.state {
            GestureState::Pending { modifier, .. } => Some(GestureAction::Click { x, modifier }),
            GestureState::Scrubbing => Some(GestureAction::ScrubEnded),
            GestureState::Idle => None,
        };
        self.state = GestureState::Idle;
        action
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeekBarEvent {
    /// Absolute seek from a plain click or an in-progress scrub.
    Seek(f64),
    SetStart(f64),
    SetEnd(f64),
}

/// Seek-bar state that persists between frames.
#[derive(Default)]
pub struct SeekBarState {
    gesture: GestureTracker,
    /// Pointer-derived time while scrubbing. The fill is drawn from this
    /// instead of the clock snapshot so the bar tracks the pointer within
    /// the same input tick.
    scrub_time: Option<f64>,
}

impl SeekBarState {
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_scrubbing()
    }
}

/// The timeline surface: a progress bar with loop markers that doubles as
/// the scrub/boundary-click target.
pub struct SeekBar<'a> {
    state: &'a mut SeekBarState,
    range: &'a RepeatRange,
    position: f64,
    duration: Option<f64>,
}

impl<'a> SeekBar<'a> {
    pub fn new(
        state: &'a mut SeekBarState,
        range: &'a RepeatRange,
        position: f64,
        duration: Option<f64>,
    ) -> Self {
        Self {
            state,
            range,
            position,
            duration,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<SeekBarEvent> {
        let mut events = Vec::new();

        let desired = egui::vec2(ui.available_width(), BAR_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let Some(duration) = self.duration.filter(|d| *d > 0.0) else {
            // Inert track until media is loaded.
            painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));
            return events;
        };

        response.on_hover_text(
            "Click to seek. Shift-click sets the loop start, Alt-click the loop end.",
        );

        let modifier = ui.input(|i| {
            if i.modifiers.shift {
                Some(BoundaryModifier::Start)
            } else if i.modifiers.alt {
                Some(BoundaryModifier::End)
            } else {
                None
            }
        });
        let pointer_pos = ui.input(|i| i.pointer.latest_pos());
        let pressed = ui.input(|i| i.pointer.primary_pressed());
        let released = ui.input(|i| i.pointer.any_released());

        if pressed {
            if let Some(pos) = pointer_pos {
                if rect.contains(pos) {
                    self.state.gesture.pointer_down(pos.x, modifier);
                }
            }
        }

        if let Some(pos) = pointer_pos {
            if let Some(GestureAction::ScrubTo(x)) = self.state.gesture.pointer_moved(pos.x) {
                let time = x_to_time(x, rect.left(), rect.width(), duration);
                if self.state.scrub_time != Some(time) {
                    events.push(SeekBarEvent::Seek(time));
                }
                self.state.scrub_time = Some(time);
            }
        }

        if released {
            let x = pointer_pos.map(|pos| pos.x).unwrap_or(rect.left());
            if let Some(GestureAction::Click { x, modifier }) = self.state.gesture.pointer_up(x) {
                let time = x_to_time(x, rect.left(), rect.width(), duration);
                events.push(match modifier {
                    None => SeekBarEvent::Seek(time),
                    Some(BoundaryModifier::Start) => SeekBarEvent::SetStart(time),
                    Some(BoundaryModifier::End) => SeekBarEvent::SetEnd(time),
                });
            }
            self.state.scrub_time = None;
        }

        self.draw(&painter, rect, duration);
        events
    }

    fn draw(&self, painter: &egui::Painter, rect: egui::Rect, duration: f64) {
        painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));

        // Shade the loop region when both boundaries are set
        if let (Some(start), Some(end)) = (self.range.start(), self.range.end()) {
            let left = time_to_x(start, rect.left(), rect.width(), duration);
            let right = time_to_x(end, rect.left(), rect.width(), duration);
            let region = egui::Rect::from_min_max(
                egui::pos2(left, rect.top()),
                egui::pos2(right, rect.bottom()),
            );
            painter.rect_filled(region, 0.0, egui::Color32::from_gray(70));
        }

        let display_time = self.state.scrub_time.unwrap_or(self.position);
        let fill_width = (display_time / duration).clamp(0.0, 1.0) as f32 * rect.width();
        let fill_rect =
            egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
        painter.rect_filled(fill_rect, 4.0, egui::Color32::from_gray(110));

        if let Some(start) = self.range.start() {
            self.draw_marker(painter, rect, duration, start, START_MARKER_COLOR);
        }
        if let Some(end) = self.range.end() {
            self.draw_marker(painter, rect, duration, end, END_MARKER_COLOR);
        }
        self.draw_marker(painter, rect, duration, display_time, PLAYHEAD_COLOR);
    }

    fn draw_marker(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        duration: f64,
        time: f64,
        color: egui::Color32,
    ) {
        let x = time_to_x(time, rect.left(), rect.width(), duration);
        let marker = egui::Rect::from_center_size(
            egui::pos2(x, rect.center().y),
            egui::vec2(MARKER_WIDTH, rect.height()),
        );
        painter.rect_filled(marker, 1.0, color);
    }
}

/// Map a screen x position proportionally across the bar to media time.
pub fn x_to_time(x: f32, left: f32, width: f32, duration: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let ratio = ((x - left) / width).clamp(0.0, 1.0);
    ratio as f64 * duration
}

/// Map a media time to a screen x position on the bar.
pub fn time_to_x(time: f64, left: f32, width: f32, duration: f64) -> f32 {
    let ratio = (time / duration).clamp(0.0, 1.0) as f32;
    left + ratio * width
}

/// Format seconds as MM:SS for the time display.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let minutes = (seconds / 60.0) as i64;
    let secs = (seconds % 60.0) as i64;
    format!("{:02}:{:02}", minutes, secs)
}
