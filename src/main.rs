use anyhow::{Context, Result};
use std::f64::consts::PI;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use view_replay::viewer::LoggingViewer;
use view_replay::{
    FrameSource, ImageBounds, PlaybackCommand, PlaybackConfig, PlaybackController, ViewFrame,
    ViewSize, ViewTracker,
};

/// Length of the generated tour
const TOUR_MS: i64 = 3_000;

/// Spacing between generated frames
const FRAME_SPACING_MS: i64 = 100;

/// Build a short navigation session: pan across a large image while zooming in,
/// with a slow rotation, a gaze sample every half second and a z-slice change
/// halfway through.
fn demo_tour(config: &PlaybackConfig) -> Result<ViewTracker> {
    let size = ViewSize::new(1024, 768);
    let mut tracker = ViewTracker::empty().with_trailing_coverage(config.trailing_coverage_ms);

    for timestamp in (0..=TOUR_MS).step_by(FRAME_SPACING_MS as usize) {
        let progress = timestamp as f64 / TOUR_MS as f64;
        let downsample = 16.0 - 14.0 * progress;
        let width = (size.width as f64 * downsample) as i32;
        let height = (size.height as f64 * downsample) as i32;
        let x = (20_000.0 * progress) as i32;
        let y = (8_000.0 + 4_000.0 * (progress * PI).sin()) as i32;

        let mut frame = ViewFrame::new(
            timestamp,
            size,
            downsample,
            ImageBounds::new(x, y, width, height),
            progress * PI / 8.0,
        );
        if timestamp % 500 == 0 {
            frame = frame.with_eye_position(x as f64 + width as f64 * 0.4, y as f64 + height as f64 * 0.6);
        }
        if timestamp >= TOUR_MS / 2 {
            frame = frame.with_zt(1, 0);
        }
        tracker.push_frame(frame)?;
    }

    Ok(tracker)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PlaybackConfig::load_or_default();
    let tracker = demo_tour(&config).context("Failed to build demo recording")?;
    info!("Replaying {} frames over {} ms", tracker.frame_count(), tracker.duration_ms());

    // Single-threaded runtime: the viewer and all playback state stay on one thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    rt.block_on(async move {
        let viewer = LoggingViewer::new("demo", ViewSize::new(800, 600));
        let mut controller = PlaybackController::new(viewer, &config);
        let mut running = controller.subscribe_running();

        let (tx, rx) = mpsc::channel(16);
        let source: Arc<dyn FrameSource> = Arc::new(tracker);
        tx.send(PlaybackCommand::SetFrameSource(source)).await?;
        tx.send(PlaybackCommand::Start).await?;

        let control = async move {
            if running.wait_for(|r| *r).await.is_err() {
                return;
            }
            tokio::select! {
                _ = running.wait_for(|r| !*r) => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!("Failed to listen for Ctrl-C: {}", e);
                    }
                    info!("Interrupted");
                    let _ = tx.send(PlaybackCommand::Stop).await;
                }
            }
            // Dropping the sender ends the playback loop
        };

        tokio::join!(controller.run(rx), control);
        info!("Applied {} frames", controller.viewer().frames_applied());
        Ok::<(), anyhow::Error>(())
    })
}
