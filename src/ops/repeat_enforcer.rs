use crate::player::clock::ClockSource;
use crate::types::repeat_range::RepeatRange;

/// Reconcile the play-head against the repeat range. Invoked on every
/// position notification from the player; returns true when a corrective
/// seek was issued.
///
/// Never runs while the user is scrubbing: a programmatic seek mid-drag
/// would fight the pointer-driven position writes.
pub fn enforce(range: &RepeatRange, clock: &mut dyn ClockSource, drag_active: bool) -> bool {
    if drag_active {
        return false;
    }
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return false;
    };

    let position = clock.position();
    if position >= end || position < start {
        clock.set_position(start);
        if clock.is_paused() {
            clock.play();
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::clock::testing::FakeClock;

    fn range(start: f64, end: f64) -> RepeatRange {
        let mut range = RepeatRange::new();
        range.set_start(start, Some(100.0)).unwrap();
        range.set_end(end, Some(100.0)).unwrap();
        range
    }

    #[test]
    fn test_seeks_back_when_position_passes_end() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 20.1;

        assert!(enforce(&range, &mut clock, false));
        assert_eq!(clock.seeks, vec![10.0]);
        assert!(!clock.paused);
    }

    #[test]
    fn test_seeks_back_when_position_before_start() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 5.0;

        assert!(enforce(&range, &mut clock, false));
        assert_eq!(clock.seeks, vec![10.0]);
    }

    #[test]
    fn test_idempotent_at_range_start() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 20.5;

        assert!(enforce(&range, &mut clock, false));
        // The reentrant notification at the corrected position must not seek
        // again.
        assert!(!enforce(&range, &mut clock, false));
        assert!(!enforce(&range, &mut clock, false));
        assert_eq!(clock.seeks, vec![10.0]);
    }

    #[test]
    fn test_no_op_inside_range() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 19.9;

        assert!(!enforce(&range, &mut clock, false));
        assert!(clock.seeks.is_empty());
    }

    #[test]
    fn test_no_op_when_range_incomplete() {
        let mut range = RepeatRange::new();
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 50.0;
        assert!(!enforce(&range, &mut clock, false));

        range.set_start(10.0, Some(100.0)).unwrap();
        assert!(!enforce(&range, &mut clock, false));
        assert!(clock.seeks.is_empty());
    }

    #[test]
    fn test_suppressed_while_dragging() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 95.0;

        assert!(!enforce(&range, &mut clock, true));
        assert!(clock.seeks.is_empty());
    }

    #[test]
    fn test_resumes_paused_clock_after_correction() {
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);
        clock.position = 25.0;
        clock.paused = true;

        assert!(enforce(&range, &mut clock, false));
        assert!(!clock.paused);
    }

    #[test]
    fn test_loop_scenario() {
        // duration=100s, range {10, 20}: advancing 19.9 -> 20.1 corrects to
        // 10, and a later position of 5 corrects below-start as well.
        let range = range(10.0, 20.0);
        let mut clock = FakeClock::with_duration(100.0);

        clock.position = 19.9;
        assert!(!enforce(&range, &mut clock, false));
        clock.position = 20.1;
        assert!(enforce(&range, &mut clock, false));
        assert_eq!(clock.seeks, vec![10.0]);
        assert_eq!(clock.position, 10.0);

        clock.position = 5.0;
        assert!(enforce(&range, &mut clock, false));
        assert_eq!(clock.seeks, vec![10.0, 10.0]);
    }
}
