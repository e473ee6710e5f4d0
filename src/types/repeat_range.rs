use thiserror::Error;

/// Validation failures for repeat-range edits. The messages are shown to the
/// user as-is through the toast channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Load a video before setting a repeat range")]
    NoMedia,
    #[error("Set the start point first")]
    StartNotSet,
    #[error("The end point must come after the start point")]
    EndNotAfterStart,
}

/// The repeat range over the video timeline. This is the single source of
/// truth for the loop boundaries and the seek-bar markers; every mutation
/// goes through the validated setters or `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatRange {
    start: Option<f64>,
    end: Option<f64>,
}

impl RepeatRange {
    pub fn new() -> Self {
        RepeatRange {
            start: None,
            end: None,
        }
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Both boundaries set, so there is a loop to enforce.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Set the loop start, clamped to the media duration. A start that lands
    /// at or past an existing end clears that end: the range is defined
    /// start-first, and an overtaken end is stale.
    pub fn set_start(&mut self, time: f64, duration: Option<f64>) -> Result<(), RangeError> {
        let duration = duration.ok_or(RangeError::NoMedia)?;
        let time = time.clamp(0.0, duration);
        if let Some(end) = self.end {
            if time >= end {
                self.end = None;
            }
        }
        self.start = Some(time);
        Ok(())
    }

    /// Set the loop end, clamped to the media duration. Requires an existing
    /// start and must land strictly after it.
    pub fn set_end(&mut self, time: f64, duration: Option<f64>) -> Result<(), RangeError> {
        let duration = duration.ok_or(RangeError::NoMedia)?;
        let time = time.clamp(0.0, duration);
        let start = self.start.ok_or(RangeError::StartNotSet)?;
        if time <= start {
            return Err(RangeError::EndNotAfterStart);
        }
        self.end = Some(time);
        Ok(())
    }

    /// Clear both boundaries. Always succeeds.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Human-readable summary for the controls strip.
    pub fn describe(&self) -> String {
        match (self.start, self.end) {
            (None, _) => "Repeat: not set".to_string(),
            (Some(start), None) => format!("Repeat: {:.2}s - not set", start),
            (Some(start), Some(end)) => format!("Repeat: {:.2}s - {:.2}s", start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_start_then_end() {
        let mut range = RepeatRange::new();
        range.set_start(10.0, Some(100.0)).unwrap();
        range.set_end(20.0, Some(100.0)).unwrap();
        assert_eq!(range.start(), Some(10.0));
        assert_eq!(range.end(), Some(20.0));
        assert!(range.is_complete());
    }

    #[test]
    fn test_set_end_without_start_fails() {
        let mut range = RepeatRange::new();
        let result = range.set_end(20.0, Some(100.0));
        assert_eq!(result, Err(RangeError::StartNotSet));
        assert_eq!(range, RepeatRange::new());
    }

    #[test]
    fn test_set_end_not_after_start_fails() {
        let mut range = RepeatRange::new();
        range.set_start(10.0, Some(100.0)).unwrap();
        assert_eq!(
            range.set_end(10.0, Some(100.0)),
            Err(RangeError::EndNotAfterStart)
        );
        assert_eq!(
            range.set_end(5.0, Some(100.0)),
            Err(RangeError::EndNotAfterStart)
        );
        // Failed setters leave the range untouched
        assert_eq!(range.start(), Some(10.0));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_start_overtaking_end_clears_end() {
        let mut range = RepeatRange::new();
        range.set_start(5.0, Some(100.0)).unwrap();
        range.set_end(8.0, Some(100.0)).unwrap();

        range.set_start(9.0, Some(100.0)).unwrap();
        assert_eq!(range.start(), Some(9.0));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_start_equal_to_end_clears_end() {
        let mut range = RepeatRange::new();
        range.set_start(5.0, Some(100.0)).unwrap();
        range.set_end(8.0, Some(100.0)).unwrap();

        range.set_start(8.0, Some(100.0)).unwrap();
        assert_eq!(range.start(), Some(8.0));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn test_start_before_existing_end_keeps_end() {
        let mut range = RepeatRange::new();
        range.set_start(5.0, Some(100.0)).unwrap();
        range.set_end(8.0, Some(100.0)).unwrap();

        range.set_start(2.0, Some(100.0)).unwrap();
        assert_eq!(range.start(), Some(2.0));
        assert_eq!(range.end(), Some(8.0));
    }

    #[test]
    fn test_no_media_fails() {
        let mut range = RepeatRange::new();
        assert_eq!(range.set_start(10.0, None), Err(RangeError::NoMedia));
        assert_eq!(range.set_end(20.0, None), Err(RangeError::NoMedia));
        assert_eq!(range, RepeatRange::new());
    }

    #[test]
    fn test_times_clamped_to_duration() {
        let mut range = RepeatRange::new();
        range.set_start(-5.0, Some(10.0)).unwrap();
        assert_eq!(range.start(), Some(0.0));
        range.set_end(15.0, Some(10.0)).unwrap();
        assert_eq!(range.end(), Some(10.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut range = RepeatRange::new();
        range.set_start(10.0, Some(100.0)).unwrap();
        range.set_end(20.0, Some(100.0)).unwrap();
        range.reset();
        assert_eq!(range.start(), None);
        assert_eq!(range.end(), None);
        assert!(!range.is_complete());
    }

    #[test]
    fn test_describe() {
        let mut range = RepeatRange::new();
        assert_eq!(range.describe(), "Repeat: not set");
        range.set_start(10.0, Some(100.0)).unwrap();
        assert_eq!(range.describe(), "Repeat: 10.00s - not set");
        range.set_end(20.5, Some(100.0)).unwrap();
        assert_eq!(range.describe(), "Repeat: 10.00s - 20.50s");
    }
}
