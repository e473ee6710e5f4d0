/// The decoder clock as the rest of the application sees it. `GstPlayer` is
/// the production implementation; tests drive the enforcer and command
/// dispatch with an in-memory fake.
pub trait ClockSource {
    fn position(&self) -> f64;
    fn set_position(&mut self, time: f64);
    fn duration(&self) -> Option<f64>;
    fn rate(&self) -> f64;
    fn set_rate(&mut self, rate: f64);
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
}

/// Discrete notifications drained from the player once per UI frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Duration became known after the pipeline prerolled.
    MetadataReady { duration: f64 },
    /// The play-head moved; carries the new position in seconds.
    PositionAdvanced(f64),
    Playing,
    Paused,
    EndOfStream,
    Error(String),
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ClockSource;

    /// In-memory clock that records every seek it receives.
    pub struct FakeClock {
        pub position: f64,
        pub duration: Option<f64>,
        pub rate: f64,
        pub paused: bool,
        pub seeks: Vec<f64>,
    }

    impl FakeClock {
        pub fn with_duration(duration: f64) -> Self {
            FakeClock {
                position: 0.0,
                duration: Some(duration),
                rate: 1.0,
                paused: false,
                seeks: Vec::new(),
            }
        }

        pub fn unloaded() -> Self {
            FakeClock {
                position: 0.0,
                duration: None,
                rate: 1.0,
                paused: true,
                seeks: Vec::new(),
            }
        }
    }

    impl ClockSource for FakeClock {
        fn position(&self) -> f64 {
            self.position
        }

        fn set_position(&mut self, time: f64) {
            self.position = time;
            self.seeks.push(time);
        }

        fn duration(&self) -> Option<f64> {
            self.duration
        }

        fn rate(&self) -> f64 {
            self.rate
        }

        fn set_rate(&mut self, rate: f64) {
            self.rate = rate;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn play(&mut self) {
            self.paused = false;
        }

        fn pause(&mut self) {
            self.paused = true;
        }
    }
}
