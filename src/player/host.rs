//! The media primitive the controller drives.
//!
//! A host decodes and outputs audio. It never decides anything: commands go
//! in, notifications come out through [`MediaHost::poll_event`].

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::library::TrackSource;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no source loaded")]
    NoSource,
    #[error("no audio output device")]
    NoOutputDevice,
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode audio: {0}")]
    Decode(String),
}

#[derive(Debug)]
pub enum MediaEvent {
    /// The loaded source was probed; `duration` is `None` for streams of unknown length.
    MetadataLoaded { duration: Option<Duration> },
    /// Playback position moved.
    TimeUpdate { position: Duration },
    /// The source played to its end.
    Ended,
    /// The loaded source failed to open or decode.
    Error(MediaError),
    /// Outcome of the latest [`MediaHost::play`] request.
    PlayResolved(Result<(), MediaError>),
}

pub trait MediaHost {
    /// Replace the current source. The host is paused afterwards.
    fn set_source(&mut self, source: &TrackSource);
    /// Request playback; the outcome arrives later as [`MediaEvent::PlayResolved`].
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Next pending notification, if any.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}
