use crate::config::PlaybackConfig;
use crate::core::ViewFrame;
use crate::playback::apply::apply_frame;
use crate::playback::clock::{Clock, SystemClock};
use crate::playback::ticker::Ticker;
use crate::playback::PlaybackState;
use crate::tracker::FrameSource;
use crate::viewer::Viewer;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Replays a recorded frame sequence against a viewer in real time
///
/// All methods are expected to run on the thread that owns the viewer. Each
/// tick maps elapsed wall-clock time onto recording time, offset by the
/// baseline frame's timestamp, and applies whichever frame covers it.
pub struct PlaybackController<V: Viewer> {
    viewer: V,
    source: Option<Arc<dyn FrameSource>>,
    clock: Arc<dyn Clock>,
    ticker: Ticker,
    /// Wall-clock time of the most recent start
    start_time: DateTime<Utc>,
    /// Frame whose timestamp lines up with `start_time`
    first_frame: Option<ViewFrame>,
    running: watch::Sender<bool>,
    current_frame: watch::Sender<Option<ViewFrame>>,
}

impl<V: Viewer> PlaybackController<V> {
    /// Create a controller bound to a viewer, using the system clock
    pub fn new(viewer: V, config: &PlaybackConfig) -> Self {
        Self::with_clock(viewer, Arc::new(SystemClock), config.tick_interval())
    }

    /// Create a controller with an explicit clock and tick interval
    pub fn with_clock(viewer: V, clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        let start_time = clock.now();
        Self {
            viewer,
            source: None,
            clock,
            ticker: Ticker::new(tick_interval),
            start_time,
            first_frame: None,
            running: watch::Sender::new(false),
            current_frame: watch::Sender::new(None),
        }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn frame_source(&self) -> Option<&Arc<dyn FrameSource>> {
        self.source.as_ref()
    }

    pub fn tick_interval(&self) -> Duration {
        self.ticker.period()
    }

    /// Check if playback is running
    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.is_running().into()
    }

    /// Watch the running flag; receivers are notified only when it changes
    pub fn subscribe_running(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }

    /// Get the most recently applied (or reset) frame
    pub fn current_frame(&self) -> Option<ViewFrame> {
        self.current_frame.borrow().clone()
    }

    /// Watch the current frame, e.g. to drive a progress indicator
    pub fn subscribe_current_frame(&self) -> watch::Receiver<Option<ViewFrame>> {
        self.current_frame.subscribe()
    }

    /// Get the frame used as the time origin for playback
    pub fn baseline_frame(&self) -> Option<&ViewFrame> {
        self.first_frame.as_ref()
    }

    /// Bind a new frame source and rewind to its first frame
    ///
    /// Stops playback first if it is running.
    pub fn set_frame_source(&mut self, source: Arc<dyn FrameSource>) {
        if self.is_running() {
            debug!("Frame source replaced during playback, stopping");
            self.stop();
        }

        self.first_frame = source.frame_at(0).cloned();
        self.current_frame.send_replace(self.first_frame.clone());
        debug!("Frame source set with {} frames", source.frame_count());
        self.source = Some(source);
    }

    /// Use a different frame as the time origin, without changing the source
    ///
    /// The next `start()` plays from this frame's timestamp onwards.
    pub fn set_baseline_frame(&mut self, frame: ViewFrame) {
        self.current_frame.send_replace(Some(frame.clone()));
        self.first_frame = Some(frame);
    }

    /// Start playback from the baseline frame
    ///
    /// Returns false (and stays stopped) if there is nothing to play back.
    /// Calling this while running restarts timing from now.
    pub fn start(&mut self) -> bool {
        let has_frames = self.source.as_ref().is_some_and(|s| !s.is_empty());
        if !has_frames || self.first_frame.is_none() {
            debug!("Nothing to play back");
            return false;
        }

        if self.ticker.is_running() {
            debug!("Restarting playback");
        }
        self.start_time = self.clock.now();
        self.ticker.play_from_start(self.start_time);
        self.set_running_flag(true);
        info!(
            "Playback started from {} ms",
            self.first_frame.as_ref().map_or(0, |f| f.timestamp)
        );
        true
    }

    /// Stop playback. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.ticker.stop();
        self.set_running_flag(false);
        info!("Playback stopped");
    }

    /// Start or stop playback, as a toggle control would
    ///
    /// Returns whether playback is running afterwards.
    pub fn set_running(&mut self, running: bool) -> bool {
        if running {
            self.start()
        } else {
            self.stop();
            false
        }
    }

    /// Fire a tick if the ticker is due; returns true if a tick ran
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        if self.ticker.poll(now) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Apply the frame for the current time, stopping at the end of the recording
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(source) = self.source.clone() else {
            return;
        };
        if source.is_empty() {
            return;
        }
        let Some(baseline) = self.first_frame.as_ref().map(|f| f.timestamp) else {
            return;
        };

        let elapsed = (self.clock.now() - self.start_time).num_milliseconds();
        let time = elapsed.saturating_add(baseline);

        let request_stop = match source.frame_for_time(time) {
            None => {
                debug!("No frame for {} ms, end of playback", time);
                true
            }
            Some(frame) => {
                self.current_frame.send_replace(Some(frame.clone()));
                if let Err(e) = apply_frame(&mut self.viewer, frame) {
                    warn!("Failed to apply frame at {} ms: {}", frame.timestamp, e);
                }
                source.is_last_frame(frame)
            }
        };

        if request_stop {
            self.stop();
        }
    }

    fn set_running_flag(&self, running: bool) {
        self.running.send_if_modified(|current| {
            if *current == running {
                false
            } else {
                *current = running;
                true
            }
        });
    }
}
