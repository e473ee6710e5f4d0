use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui;

/// At most this many toasts are kept; older ones roll off when new messages
/// arrive.
const MAX_VISIBLE: usize = 4;
const TOAST_TTL: Duration = Duration::from_millis(2500);

struct Toast {
    message: String,
    created: Instant,
}

/// Fire-and-forget notification channel. Validation failures and
/// confirmations land here and expire after a short delay.
#[derive(Default)]
pub struct Toasts {
    entries: VecDeque<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_back(Toast {
            message: message.into(),
            created: Instant::now(),
        });
        while self.entries.len() > MAX_VISIBLE {
            self.entries.pop_front();
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|toast| toast.message.as_str())
    }

    fn prune(&mut self) {
        let now = Instant::now();
        self.entries
            .retain(|toast| now.duration_since(toast.created) < TOAST_TTL);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune();
        if self.entries.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.entries {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(&toast.message);
                    });
                }
            });
        // Wake up again so expired toasts disappear without user input.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
