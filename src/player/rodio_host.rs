//! [`MediaHost`] backed by `rodio`.
//!
//! Seeking rebuilds the sink and skips into the decoded stream, so the
//! reported position is `seek_base + sink.get_pos()`.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::library::TrackSource;

use super::host::{MediaError, MediaEvent, MediaHost};

const TIME_UPDATE_EVERY: Duration = Duration::from_millis(250);

pub struct RodioHost {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    source: Option<TrackSource>,
    seek_base: Duration,
    volume: f32,
    muted: bool,
    playing: bool,
    ended_sent: bool,
    last_update: Option<Instant>,
    events: VecDeque<MediaEvent>,
}

impl RodioHost {
    /// Open the default output device. Without one the host still works, but
    /// every load and play request fails with [`MediaError::NoOutputDevice`].
    pub fn open() -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when the stream is dropped, which would garble the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(err) => {
                warn!("no audio output device: {err}");
                None
            }
        };

        Self {
            stream,
            sink: None,
            source: None,
            seek_base: Duration::ZERO,
            volume: 1.0,
            muted: false,
            playing: false,
            ended_sent: false,
            last_update: None,
            events: VecDeque::new(),
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    fn position(&self) -> Duration {
        self.seek_base + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Build a paused sink for `source` starting at `start_at`.
    fn build_sink(
        &self,
        source: &TrackSource,
        start_at: Duration,
    ) -> Result<(Sink, Option<Duration>), MediaError> {
        let stream = self.stream.as_ref().ok_or(MediaError::NoOutputDevice)?;
        match source {
            TrackSource::Memory(bytes) => {
                sink_from_reader(stream, Cursor::new(Arc::clone(bytes)), start_at)
            }
            TrackSource::File(path) => {
                let file = File::open(path).map_err(|source| MediaError::Open {
                    path: path.clone(),
                    source,
                })?;
                sink_from_reader(stream, BufReader::new(file), start_at)
            }
        }
    }
}

fn sink_from_reader<R>(
    stream: &OutputStream,
    reader: R,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), MediaError>
where
    R: Read + Seek + Send + Sync + 'static,
{
    let decoder = Decoder::new(reader).map_err(|err| MediaError::Decode(err.to_string()))?;
    let duration = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, duration))
}

impl MediaHost for RodioHost {
    fn set_source(&mut self, source: &TrackSource) {
        self.stop_sink();
        self.source = Some(source.clone());
        self.seek_base = Duration::ZERO;
        self.playing = false;
        self.ended_sent = false;
        self.last_update = None;

        match self.build_sink(source, Duration::ZERO) {
            Ok((sink, duration)) => {
                debug!("loaded {} ({duration:?})", source.describe());
                sink.set_volume(self.effective_volume());
                self.sink = Some(sink);
                self.events
                    .push_back(MediaEvent::MetadataLoaded { duration });
            }
            Err(err) => {
                warn!("failed to load {}: {err}", source.describe());
                self.events.push_back(MediaEvent::Error(err));
            }
        }
    }

    fn play(&mut self) {
        let outcome = match self.sink.as_ref() {
            Some(sink) => {
                sink.play();
                self.playing = true;
                self.ended_sent = false;
                Ok(())
            }
            None if self.stream.is_none() => Err(MediaError::NoOutputDevice),
            None => Err(MediaError::NoSource),
        };
        self.events.push_back(MediaEvent::PlayResolved(outcome));
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        let Some(source) = self.source.clone() else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        self.stop_sink();
        match self.build_sink(&source, position) {
            Ok((sink, _)) => {
                sink.set_volume(self.effective_volume());
                if self.playing {
                    sink.play();
                }
                self.sink = Some(sink);
                self.seek_base = position;
                self.ended_sent = false;
                self.events.push_back(MediaEvent::TimeUpdate { position });
            }
            Err(err) => {
                warn!("seek failed: {err}");
                self.playing = false;
                self.events.push_back(MediaEvent::Error(err));
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.effective_volume());
        }
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }

        let sink = self.sink.as_ref()?;
        if self.playing && sink.empty() && !self.ended_sent {
            self.ended_sent = true;
            self.playing = false;
            return Some(MediaEvent::Ended);
        }

        if self.playing
            && self
                .last_update
                .is_none_or(|at| at.elapsed() >= TIME_UPDATE_EVERY)
        {
            self.last_update = Some(Instant::now());
            return Some(MediaEvent::TimeUpdate {
                position: self.position(),
            });
        }

        None
    }
}
