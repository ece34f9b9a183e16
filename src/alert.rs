//! Audible notification when the price moves past the trigger.
//!
//! Playback failures never escape this module as errors the loop has to act
//! on: [`Alerter::check`] reports them as [`AlertOutcome::Failed`] and the
//! caller just shows the message. Dropping the future returned by
//! [`Alerter::check`] tells the player to stop.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "audio")]
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::Result;

/// Something that can make a noise.
///
/// Implementations block until the sound ends, or return early once `stop`
/// is set.
pub trait SoundPlayer: Send + Sync + 'static {
    fn play(&self, stop: &AtomicBool) -> Result<()>;
}

/// How often a playing sound checks whether it was cancelled.
#[cfg(feature = "audio")]
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Decodes the sound file and plays it on the default output device.
#[cfg(feature = "audio")]
pub struct RodioPlayer {
    path: PathBuf,
}

#[cfg(feature = "audio")]
impl RodioPlayer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "audio")]
impl SoundPlayer for RodioPlayer {
    fn play(&self, stop: &AtomicBool) -> Result<()> {
        let file = open_sound(&self.path)?;
        let source = rodio::Decoder::new(std::io::BufReader::new(file)).map_err(|e| {
            crate::AlertError::Sound(format!("cannot decode {}: {e}", self.path.display()))
        })?;

        // Stream and sink are dropped at the end of this scope, releasing the device.
        let (_stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| crate::AlertError::Sound(format!("no audio output: {e}")))?;
        let sink = rodio::Sink::try_new(&handle)
            .map_err(|e| crate::AlertError::Sound(format!("cannot open sink: {e}")))?;
        sink.append(source);
        while !sink.empty() {
            if stop.load(Ordering::Acquire) {
                sink.stop();
                break;
            }
            std::thread::sleep(STOP_POLL_INTERVAL);
        }
        Ok(())
    }
}

/// Rings the terminal bell after checking the sound file is readable.
///
/// Fallback when the crate is built with `--no-default-features`; the file
/// is not decoded.
pub struct BellPlayer {
    path: PathBuf,
}

impl BellPlayer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SoundPlayer for BellPlayer {
    fn play(&self, _stop: &AtomicBool) -> Result<()> {
        open_sound(&self.path)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Player for the configured sound file: decoded audio with the `audio`
/// feature (the default), the terminal bell without it.
#[cfg(feature = "audio")]
pub fn default_player(path: impl Into<PathBuf>) -> RodioPlayer {
    RodioPlayer::new(path)
}

/// Player for the configured sound file: decoded audio with the `audio`
/// feature (the default), the terminal bell without it.
#[cfg(not(feature = "audio"))]
pub fn default_player(path: impl Into<PathBuf>) -> BellPlayer {
    BellPlayer::new(path)
}

fn open_sound(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| crate::AlertError::Sound(format!("cannot open {}: {e}", path.display())))
}

/// What happened when a sample was checked against the trigger.
#[derive(Debug, PartialEq, Eq)]
pub enum AlertOutcome {
    /// The move stayed within the trigger.
    Quiet,
    /// The sound played.
    Played,
    /// The move crossed the trigger but the sound could not be played.
    Failed(String),
}

/// Compares moves against the trigger and plays the sound.
pub struct Alerter<P> {
    trigger: Decimal,
    player: Arc<P>,
}

impl<P: SoundPlayer> Alerter<P> {
    pub fn new(trigger: Decimal, player: P) -> Self {
        Self {
            trigger,
            player: Arc::new(player),
        }
    }

    pub fn trigger(&self) -> Decimal {
        self.trigger
    }

    /// Strictly greater: a move exactly at the trigger stays quiet.
    pub fn should_alert(&self, percent: Decimal) -> bool {
        percent.abs() > self.trigger
    }

    /// Plays the sound if `percent` crosses the trigger.
    ///
    /// Playback runs on the blocking pool and is awaited, so the caller does
    /// not move on until the sound has finished. If this future is dropped
    /// first, the player is told to stop.
    pub async fn check(&self, percent: Decimal) -> AlertOutcome {
        if !self.should_alert(percent) {
            return AlertOutcome::Quiet;
        }

        info!(%percent, trigger = %self.trigger, "price move crossed trigger");
        let player = Arc::clone(&self.player);
        let stop = StopOnDrop(Arc::new(AtomicBool::new(false)));
        let flag = Arc::clone(&stop.0);
        let result = match tokio::task::spawn_blocking(move || player.play(&flag)).await {
            Ok(result) => result,
            Err(e) => Err(crate::AlertError::Sound(format!("playback task failed: {e}"))),
        };

        match result {
            Ok(()) => AlertOutcome::Played,
            Err(e) => {
                warn!("Sound playback failed: {e}");
                AlertOutcome::Failed(format!("Sound playback failed: {e}"))
            }
        }
    }
}

/// Raises the stop flag when the awaiting future goes away.
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}
