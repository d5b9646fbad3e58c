use crate::core::ViewFrame;
use crate::playback::engine::PlaybackController;
use crate::tracker::FrameSource;
use crate::viewer::Viewer;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Request from a UI control to the playback loop
#[derive(Clone)]
pub enum PlaybackCommand {
    Start,
    Stop,
    SetFrameSource(Arc<dyn FrameSource>),
    SetBaselineFrame(ViewFrame),
}

impl std::fmt::Debug for PlaybackCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackCommand::Start => write!(f, "Start"),
            PlaybackCommand::Stop => write!(f, "Stop"),
            PlaybackCommand::SetFrameSource(source) => {
                write!(f, "SetFrameSource({} frames)", source.frame_count())
            }
            PlaybackCommand::SetBaselineFrame(frame) => {
                write!(f, "SetBaselineFrame({} ms)", frame.timestamp)
            }
        }
    }
}

impl<V: Viewer> PlaybackController<V> {
    /// Apply a single command
    pub fn handle_command(&mut self, command: PlaybackCommand) {
        debug!("Playback command: {:?}", command);
        match command {
            PlaybackCommand::Start => {
                self.start();
            }
            PlaybackCommand::Stop => self.stop(),
            PlaybackCommand::SetFrameSource(source) => self.set_frame_source(source),
            PlaybackCommand::SetBaselineFrame(frame) => self.set_baseline_frame(frame),
        }
    }

    /// Run the playback loop on the current task until the command channel closes
    ///
    /// Commands and ticks are handled one at a time on this task, so the
    /// viewer is never touched concurrently. Playback is stopped on return.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<PlaybackCommand>) {
        let mut interval = time::interval(self.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    let starting = matches!(command, PlaybackCommand::Start);
                    self.handle_command(command);
                    if starting && self.is_running() {
                        // Line the interval up with the ticker's first fire
                        interval.reset_immediately();
                    }
                }
                _ = interval.tick(), if self.is_running() => {
                    self.poll();
                }
            }
        }

        debug!("Command channel closed, leaving playback loop");
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImageBounds, ViewSize};
    use crate::playback::clock::SystemClock;
    use crate::tracker::ViewTracker;
    use crate::viewer::MockViewer;
    use std::time::Duration;

    fn frame(timestamp: i64) -> ViewFrame {
        ViewFrame::new(
            timestamp,
            ViewSize::new(800, 600),
            1.0,
            ImageBounds::new(timestamp as i32, 0, 800, 600),
            0.0,
        )
    }

    fn controller() -> PlaybackController<MockViewer> {
        PlaybackController::with_clock(
            MockViewer::new(800, 600),
            Arc::new(SystemClock),
            Duration::from_millis(20),
        )
    }

    #[tokio::test]
    async fn test_run_plays_to_end() {
        let mut controller = controller();
        let source: Arc<dyn FrameSource> =
            Arc::new(ViewTracker::new(vec![frame(0), frame(50), frame(120)]).unwrap());
        let mut running = controller.subscribe_running();

        let (tx, rx) = mpsc::channel(8);
        tx.send(PlaybackCommand::SetFrameSource(source)).await.unwrap();
        tx.send(PlaybackCommand::Start).await.unwrap();

        let watcher = async move {
            running.wait_for(|r| *r).await.unwrap();
            running.wait_for(|r| !*r).await.unwrap();
            drop(tx);
        };

        time::timeout(Duration::from_secs(5), async {
            tokio::join!(controller.run(rx), watcher);
        })
        .await
        .expect("playback did not finish");

        assert!(!controller.is_running());
        assert_eq!(controller.current_frame().unwrap().timestamp, 120);
        // Last frame's center
        assert_eq!(controller.viewer().center().x, 520.0);
    }

    #[tokio::test]
    async fn test_run_stop_command() {
        let mut controller = controller();
        let source: Arc<dyn FrameSource> =
            Arc::new(ViewTracker::new(vec![frame(0), frame(60_000)]).unwrap());
        let mut running = controller.subscribe_running();

        let (tx, rx) = mpsc::channel(8);
        tx.send(PlaybackCommand::SetFrameSource(source)).await.unwrap();
        tx.send(PlaybackCommand::Start).await.unwrap();

        let stopper = async move {
            running.wait_for(|r| *r).await.unwrap();
            time::sleep(Duration::from_millis(60)).await;
            tx.send(PlaybackCommand::Stop).await.unwrap();
            running.wait_for(|r| !*r).await.unwrap();
        };

        time::timeout(Duration::from_secs(5), async {
            tokio::join!(controller.run(rx), stopper);
        })
        .await
        .expect("playback loop did not exit");

        assert!(!controller.is_running());
        assert_eq!(controller.current_frame().unwrap().timestamp, 0);
        assert!(!controller.viewer().calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_without_source_is_ignored() {
        let mut controller = controller();
        let (tx, rx) = mpsc::channel(8);
        tx.send(PlaybackCommand::Start).await.unwrap();
        drop(tx);

        controller.run(rx).await;

        assert!(!controller.is_running());
        assert!(controller.viewer().calls().is_empty());
    }
}
