use crate::core::ViewFrame;
use crate::tracker::{FrameSource, TrackerError};

/// In-memory recording of viewer frames
///
/// A frame covers virtual time from its own timestamp up to the next frame's
/// timestamp. The last frame covers everything after it, unless a trailing
/// coverage window is set.
#[derive(Debug, Clone, Default)]
pub struct ViewTracker {
    frames: Vec<ViewFrame>,
    trailing_coverage_ms: Option<i64>,
}

impl ViewTracker {
    /// Create an empty tracker
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a tracker from frames, which must be sorted by timestamp
    pub fn new(frames: Vec<ViewFrame>) -> Result<Self, TrackerError> {
        let mut tracker = Self::empty();
        for frame in frames {
            tracker.push_frame(frame)?;
        }
        Ok(tracker)
    }

    /// Limit how long after its timestamp the last frame still covers time
    pub fn with_trailing_coverage(mut self, coverage_ms: Option<i64>) -> Self {
        self.trailing_coverage_ms = coverage_ms;
        self
    }

    /// Append a frame to the end of the recording
    pub fn push_frame(&mut self, frame: ViewFrame) -> Result<(), TrackerError> {
        if let Some(last) = self.frames.last() {
            if frame.timestamp < last.timestamp {
                return Err(TrackerError::OutOfOrder {
                    timestamp: frame.timestamp,
                    previous: last.timestamp,
                });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Get all frames
    pub fn frames(&self) -> &[ViewFrame] {
        &self.frames
    }

    /// Get the final frame
    pub fn last_frame(&self) -> Option<&ViewFrame> {
        self.frames.last()
    }

    /// Get the recording length in milliseconds
    pub fn duration_ms(&self) -> i64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0,
        }
    }
}

impl FrameSource for ViewTracker {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_at(&self, index: usize) -> Option<&ViewFrame> {
        self.frames.get(index)
    }

    fn frame_for_time(&self, time: i64) -> Option<&ViewFrame> {
        // Index of the first frame strictly after `time`; with duplicate
        // timestamps the latest one wins
        let idx = self.frames.partition_point(|f| f.timestamp <= time);
        if idx == 0 {
            return None;
        }

        let frame = &self.frames[idx - 1];
        if idx == self.frames.len() {
            if let Some(coverage) = self.trailing_coverage_ms {
                if time > frame.timestamp.saturating_add(coverage) {
                    return None;
                }
            }
        }
        Some(frame)
    }

    fn is_last_frame(&self, frame: &ViewFrame) -> bool {
        // Compared by identity: frames may hold NaN and never equal themselves
        self.frames.last().is_some_and(|last| std::ptr::eq(last, frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImageBounds, ViewSize};

    fn frame_at_time(timestamp: i64) -> ViewFrame {
        ViewFrame::new(
            timestamp,
            ViewSize::new(800, 600),
            1.0,
            ImageBounds::new(timestamp as i32, 0, 800, 600),
            0.0,
        )
    }

    fn make_tracker(times: &[i64]) -> ViewTracker {
        ViewTracker::new(times.iter().map(|&t| frame_at_time(t)).collect()).unwrap()
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = ViewTracker::empty();
        assert!(tracker.is_empty());
        assert_eq!(tracker.frame_count(), 0);
        assert!(tracker.frame_for_time(0).is_none());
        assert_eq!(tracker.duration_ms(), 0);
    }

    #[test]
    fn test_frame_for_time_picks_latest_at_or_before() {
        let tracker = make_tracker(&[0, 100, 250, 400]);

        assert_eq!(tracker.frame_for_time(0).unwrap().timestamp, 0);
        assert_eq!(tracker.frame_for_time(99).unwrap().timestamp, 0);
        assert_eq!(tracker.frame_for_time(100).unwrap().timestamp, 100);
        assert_eq!(tracker.frame_for_time(249).unwrap().timestamp, 100);
        assert_eq!(tracker.frame_for_time(250).unwrap().timestamp, 250);
        assert_eq!(tracker.frame_for_time(400).unwrap().timestamp, 400);
    }

    #[test]
    fn test_frame_for_time_before_first() {
        let tracker = make_tracker(&[0, 100, 250, 400]);
        assert!(tracker.frame_for_time(-1).is_none());

        let tracker = make_tracker(&[20, 40]);
        assert!(tracker.frame_for_time(10).is_none());
        assert_eq!(tracker.frame_for_time(20).unwrap().timestamp, 20);
    }

    #[test]
    fn test_last_frame_covers_without_window() {
        let tracker = make_tracker(&[0, 100, 250, 400]);
        let frame = tracker.frame_for_time(10_000).unwrap();
        assert_eq!(frame.timestamp, 400);
        assert!(tracker.is_last_frame(frame));
    }

    #[test]
    fn test_trailing_coverage_window() {
        let tracker = make_tracker(&[0, 100, 250, 400]).with_trailing_coverage(Some(50));

        assert_eq!(tracker.frame_for_time(450).unwrap().timestamp, 400);
        assert!(tracker.frame_for_time(451).is_none());
        // Window only applies after the last frame
        assert_eq!(tracker.frame_for_time(399).unwrap().timestamp, 250);
    }

    #[test]
    fn test_duplicate_timestamps_resolve_to_latest() {
        let mut frames = vec![frame_at_time(0), frame_at_time(50), frame_at_time(50)];
        frames[2].rotation = 1.0;
        let tracker = ViewTracker::new(frames).unwrap();

        let frame = tracker.frame_for_time(60).unwrap();
        assert_eq!(frame.rotation, 1.0);
        assert!(tracker.is_last_frame(frame));
    }

    #[test]
    fn test_is_last_frame() {
        let tracker = make_tracker(&[0, 50, 120]);
        assert!(!tracker.is_last_frame(tracker.frame_at(0).unwrap()));
        assert!(!tracker.is_last_frame(tracker.frame_at(1).unwrap()));
        assert!(tracker.is_last_frame(tracker.frame_at(2).unwrap()));
        assert!(tracker.frame_at(3).is_none());
    }

    #[test]
    fn test_last_frame_with_nan_cursor() {
        let frames = vec![
            frame_at_time(0),
            frame_at_time(100).with_cursor_position(f64::NAN, f64::NAN),
        ];
        let tracker = ViewTracker::new(frames).unwrap();

        let frame = tracker.frame_for_time(150).unwrap();
        assert_eq!(frame.timestamp, 100);
        assert!(tracker.is_last_frame(frame));

        // Only frames held by the tracker count
        let copy = frame.clone();
        assert!(!tracker.is_last_frame(&copy));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let result = ViewTracker::new(vec![frame_at_time(100), frame_at_time(50)]);
        assert_eq!(
            result.unwrap_err(),
            TrackerError::OutOfOrder { timestamp: 50, previous: 100 }
        );
    }

    #[test]
    fn test_duration() {
        let tracker = make_tracker(&[20, 100, 250]);
        assert_eq!(tracker.duration_ms(), 230);
        assert_eq!(tracker.last_frame().unwrap().timestamp, 250);
    }
}
