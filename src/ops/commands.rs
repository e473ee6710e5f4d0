use log::debug;

use crate::player::clock::ClockSource;
use crate::types::repeat_range::RepeatRange;
use crate::ui::toast::Toasts;

pub const RATE_MIN: f64 = 0.25;
pub const RATE_MAX: f64 = 4.0;

/// A user-triggered operation. Keyboard keys, seek-bar modifier clicks, and
/// the on-screen buttons all reduce to these values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set the loop start; `None` means the current play-head position.
    SetStart(Option<f64>),
    /// Set the loop end; `None` means the current play-head position.
    SetEnd(Option<f64>),
    Reset,
    GoToStart,
    TogglePlay,
    NudgeRate(f64),
}

pub fn dispatch(
    command: Command,
    range: &mut RepeatRange,
    clock: &mut dyn ClockSource,
    toasts: &mut Toasts,
) {
    debug!("dispatch {:?}", command);
    match command {
        Command::SetStart(at) => {
            let time = at.unwrap_or_else(|| clock.position());
            match range.set_start(time, clock.duration()) {
                Ok(()) => {
                    if let Some(start) = range.start() {
                        toasts.push(format!("Loop start set to {:.2}s", start));
                    }
                }
                Err(err) => toasts.push(err.to_string()),
            }
        }
        Command::SetEnd(at) => {
            let time = at.unwrap_or_else(|| clock.position());
            match range.set_end(time, clock.duration()) {
                Ok(()) => {
                    if let Some(end) = range.end() {
                        toasts.push(format!("Loop end set to {:.2}s", end));
                    }
                }
                Err(err) => toasts.push(err.to_string()),
            }
        }
        Command::Reset => {
            range.reset();
            toasts.push("Repeat range cleared");
        }
        Command::GoToStart => {
            if let Some(start) = range.start() {
                clock.set_position(start);
            }
        }
        Command::TogglePlay => {
            if clock.duration().is_none() {
                return;
            }
            if clock.is_paused() {
                clock.play();
            } else {
                clock.pause();
            }
        }
        Command::NudgeRate(delta) => {
            let rate = (clock.rate() + delta).clamp(RATE_MIN, RATE_MAX);
            clock.set_rate(rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::clock::testing::FakeClock;

    #[test]
    fn test_set_start_uses_current_position() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 3.0;
        let mut toasts = Toasts::new();

        dispatch(Command::SetStart(None), &mut range, &mut clock, &mut toasts);
        assert_eq!(range.start(), Some(3.0));
        assert_eq!(toasts.messages().count(), 1);
    }

    #[test]
    fn test_set_end_without_start_toasts_and_rolls_back() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 30.0;
        let mut toasts = Toasts::new();

        dispatch(Command::SetEnd(None), &mut range, &mut clock, &mut toasts);
        assert_eq!(range, RepeatRange::new());
        assert_eq!(
            toasts.messages().next(),
            Some("Set the start point first")
        );
    }

    #[test]
    fn test_explicit_times_from_boundary_clicks() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        let mut toasts = Toasts::new();

        dispatch(
            Command::SetStart(Some(10.0)),
            &mut range,
            &mut clock,
            &mut toasts,
        );
        dispatch(
            Command::SetEnd(Some(20.0)),
            &mut range,
            &mut clock,
            &mut toasts,
        );
        assert_eq!(range.start(), Some(10.0));
        assert_eq!(range.end(), Some(20.0));
        // Boundary clicks never move the play-head
        assert!(clock.seeks.is_empty());
    }

    #[test]
    fn test_no_media_set_start_toasts() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::unloaded();
        let mut toasts = Toasts::new();

        dispatch(Command::SetStart(None), &mut range, &mut clock, &mut toasts);
        assert_eq!(range, RepeatRange::new());
        assert_eq!(toasts.messages().count(), 1);
    }

    #[test]
    fn test_reset_always_succeeds() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        let mut toasts = Toasts::new();
        range.set_start(1.0, Some(100.0)).unwrap();

        dispatch(Command::Reset, &mut range, &mut clock, &mut toasts);
        assert_eq!(range, RepeatRange::new());
        assert_eq!(
            toasts.messages().next(),
            Some("Repeat range cleared")
        );
    }

    #[test]
    fn test_go_to_start_seeks_only_when_start_present() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        let mut toasts = Toasts::new();

        dispatch(Command::GoToStart, &mut range, &mut clock, &mut toasts);
        assert!(clock.seeks.is_empty());

        range.set_start(12.0, Some(100.0)).unwrap();
        dispatch(Command::GoToStart, &mut range, &mut clock, &mut toasts);
        assert_eq!(clock.seeks, vec![12.0]);
    }

    #[test]
    fn test_toggle_play_flips_paused() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        let mut toasts = Toasts::new();

        dispatch(Command::TogglePlay, &mut range, &mut clock, &mut toasts);
        assert!(clock.paused);
        dispatch(Command::TogglePlay, &mut range, &mut clock, &mut toasts);
        assert!(!clock.paused);
    }

    #[test]
    fn test_toggle_play_without_media_is_a_no_op() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::unloaded();
        let mut toasts = Toasts::new();

        dispatch(Command::TogglePlay, &mut range, &mut clock, &mut toasts);
        assert!(clock.paused);
    }

    #[test]
    fn test_nudge_rate_clamps_at_both_ends() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        let mut toasts = Toasts::new();

        for _ in 0..10 {
            dispatch(
                Command::NudgeRate(0.1),
                &mut range,
                &mut clock,
                &mut toasts,
            );
        }
        assert!(clock.rate <= RATE_MAX);
        assert!((clock.rate - 2.0).abs() < 1e-9);

        clock.rate = 0.25;
        dispatch(
            Command::NudgeRate(-0.1),
            &mut range,
            &mut clock,
            &mut toasts,
        );
        assert_eq!(clock.rate, RATE_MIN);

        clock.rate = 3.95;
        dispatch(Command::NudgeRate(0.5), &mut range, &mut clock, &mut toasts);
        assert_eq!(clock.rate, RATE_MAX);
    }
}
