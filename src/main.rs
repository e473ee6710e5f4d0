mod ops;
mod player;
mod types;
mod ui;

use eframe::egui;

use crate::player::pipeline::GstPlayer;
use crate::types::preferences::Preferences;
use crate::ui::app::LoopioApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let player = match GstPlayer::new() {
        Ok(player) => player,
        Err(err) => {
            eprintln!("failed to start playback engine: {}", err);
            std::process::exit(1);
        }
    };
    let preferences = Preferences::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_title("Loopio"),
        ..Default::default()
    };
    eframe::run_native(
        "Loopio",
        native_options,
        Box::new(move |cc| Ok(Box::new(LoopioApp::new(cc, player, preferences)))),
    )
}
