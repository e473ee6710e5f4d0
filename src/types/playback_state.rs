/// Snapshot of the decoder clock. The player owns and updates this; the rest
/// of the application only reads it and issues mutation requests through the
/// `ClockSource` trait.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub position: f64,
    pub duration: Option<f64>,
    pub rate: f64,
    pub paused: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            duration: None,
            rate: 1.0,
            paused: true,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
