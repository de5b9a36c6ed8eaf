//! The queue/transport state machine.
//!
//! The controller is authoritative: transport decisions read its own state,
//! never the host's. Auto-skips after failures are plain deadlines fired
//! from [`PlaybackController::tick`].

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{AudioSettings, Locale};
use crate::library::Track;

use super::announce::{Announcement, Announcer};
use super::host::{MediaError, MediaEvent, MediaHost};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    /// Nothing loaded, or the loaded track played to its end.
    #[default]
    Stopped,
    Paused,
    /// A play request is in flight.
    Starting,
    Playing,
}

impl Transport {
    /// `true` while playing or while a play request is pending.
    pub fn is_active(self) -> bool {
        matches!(self, Transport::Starting | Transport::Playing)
    }
}

/// Why the queue is advancing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// User command or scheduled skip.
    Manual,
    /// End of track.
    Automatic,
}

#[derive(Debug, Copy, Clone)]
pub struct SkipDelays {
    /// After the host refused to start playback.
    pub on_reject: Duration,
    /// After the loaded source failed to open or decode.
    pub on_error: Duration,
}

impl Default for SkipDelays {
    fn default() -> Self {
        Self {
            on_reject: Duration::from_millis(1000),
            on_error: Duration::from_millis(2000),
        }
    }
}

impl From<&AudioSettings> for SkipDelays {
    fn from(settings: &AudioSettings) -> Self {
        Self {
            on_reject: Duration::from_millis(settings.reject_skip_ms),
            on_error: Duration::from_millis(settings.error_skip_ms),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct PendingSkip {
    due: Instant,
    /// Index that failed; one skip per failing track.
    from: Option<usize>,
}

pub struct PlaybackController<H: MediaHost> {
    host: H,
    queue: Vec<Track>,
    current: Option<usize>,
    transport: Transport,
    repeat: bool,
    shuffle: bool,
    volume: f32,
    muted: bool,
    position: Duration,
    duration: Option<Duration>,
    pending_skips: Vec<PendingSkip>,
    delays: SkipDelays,
    announcer: Announcer,
    rng: StdRng,
    loads: u64,
}

impl<H: MediaHost> PlaybackController<H> {
    pub fn new(mut host: H, locale: Locale, delays: SkipDelays) -> Self {
        host.set_volume(1.0);
        host.set_muted(false);
        Self {
            host,
            queue: Vec::new(),
            current: None,
            transport: Transport::Stopped,
            repeat: false,
            shuffle: false,
            volume: 1.0,
            muted: false,
            position: Duration::ZERO,
            duration: None,
            pending_skips: Vec::new(),
            delays,
            announcer: Announcer::new(locale),
            rng: StdRng::from_os_rng(),
            loads: 0,
        }
    }

    /// Replace the random source used by shuffle.
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ---- queue ----

    /// Replace the queue. `current` is kept as is; the caller reloads if needed.
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.queue = tracks;
        if self.current.is_some_and(|i| i >= self.queue.len()) {
            self.current = None;
        }
        self.announce(Announcement::QueueUpdated(self.queue.len()));
    }

    /// Append tracks to the end of the queue; returns how many were added.
    pub fn append(&mut self, tracks: Vec<Track>) -> usize {
        let added = tracks.len();
        self.queue.extend(tracks);
        added
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    /// First queue position holding a track with `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.queue.iter().position(|t| t.id == id)
    }

    // ---- transport ----

    /// Load the track at `index`, paused. Out-of-range indices are ignored.
    pub fn load(&mut self, index: usize) {
        let Some(track) = self.queue.get(index) else {
            debug!("load({index}) ignored, queue has {} tracks", self.queue.len());
            return;
        };

        self.host.set_source(&track.source);
        self.current = Some(index);
        self.transport = Transport::Paused;
        self.position = Duration::ZERO;
        self.duration = track.duration;
        self.loads += 1;

        let announcement = Announcement::Loaded {
            title: track.title.clone(),
            artist: track.artist.clone(),
        };
        self.announce(announcement);
    }

    pub fn play(&mut self) {
        if self.current.is_none() && !self.queue.is_empty() {
            self.load(0);
        }
        if self.current.is_none() {
            self.announce(Announcement::NoMedia);
            return;
        }

        self.transport = Transport::Starting;
        self.host.play();
    }

    pub fn pause(&mut self) {
        self.host.pause();
        if self.current.is_some() {
            self.transport = Transport::Paused;
        }
        self.announce(Announcement::Paused);
    }

    pub fn toggle_play(&mut self) {
        if self.transport.is_active() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn prev(&mut self) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }

        let was_playing = self.transport.is_active();
        let index = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };

        self.load(index);
        if was_playing {
            self.play();
        }
    }

    pub fn next(&mut self, advance: Advance) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }

        let was_playing = self.transport.is_active();
        let index = self.next_index(advance);

        self.load(index);
        if was_playing || advance == Advance::Automatic {
            self.play();
        }
    }

    fn next_index(&mut self, advance: Advance) -> usize {
        let len = self.queue.len();

        if advance == Advance::Automatic && self.repeat && len == 1 {
            return self.current.unwrap_or(0);
        }

        if self.shuffle && len > 1 {
            return match self.current {
                Some(current) => {
                    let pick = self.rng.random_range(0..len - 1);
                    if pick >= current { pick + 1 } else { pick }
                }
                None => self.rng.random_range(0..len),
            };
        }

        match self.current {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        }
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
        self.announce(Announcement::Repeat(repeat));
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
        self.announce(Announcement::Shuffle(shuffle));
    }

    // ---- volume ----

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.host.set_volume(self.volume);
    }

    pub fn nudge_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.host.set_muted(self.muted);
        self.announce(Announcement::Muted(self.muted));
    }

    // ---- seeking ----

    /// Seek relative to the current position. Only while playing a track of known length.
    pub fn seek_by(&mut self, seconds: i64) {
        if self.transport != Transport::Playing {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };

        let delta = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds < 0 {
            self.position.saturating_sub(delta)
        } else {
            (self.position + delta).min(duration)
        };

        self.host.seek(target);
        self.position = target;
    }

    /// Seek to `fraction` of the track length, clamped to `0.0..=1.0`.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        if self.current.is_none() || !fraction.is_finite() {
            return;
        }

        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.host.seek(target);
        self.position = target;
    }

    // ---- events & timers ----

    /// Drain and handle every pending host event.
    pub fn pump(&mut self) {
        while let Some(event) = self.host.poll_event() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded { duration } => {
                if duration.is_some() {
                    self.duration = duration;
                }
            }
            MediaEvent::TimeUpdate { position } => self.position = position,
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error(err) => self.on_error(err),
            MediaEvent::PlayResolved(Ok(())) => {
                if self.transport == Transport::Starting {
                    self.transport = Transport::Playing;
                    self.announce(Announcement::Playing);
                }
            }
            MediaEvent::PlayResolved(Err(err)) => self.on_play_rejected(err),
        }
    }

    /// Fire every auto-skip due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .pending_skips
            .drain(..)
            .partition(|skip| skip.due <= now);
        self.pending_skips = pending;

        for _ in &due {
            self.next(Advance::Manual);
        }
        due.len()
    }

    fn on_ended(&mut self) {
        self.transport = Transport::Stopped;

        if self.repeat && self.queue.len() == 1 {
            self.host.seek(Duration::ZERO);
            self.position = Duration::ZERO;
            self.play();
        } else {
            self.next(Advance::Automatic);
        }
    }

    fn on_error(&mut self, err: MediaError) {
        warn!("media error: {err}");
        if self.current.is_some() {
            self.transport = Transport::Paused;
        }
        self.announce(Announcement::LoadError);
        self.schedule_skip(self.delays.on_error);
    }

    fn on_play_rejected(&mut self, err: MediaError) {
        warn!("playback refused: {err}");
        // A load error already announced the failure and paused the transport.
        if self.transport == Transport::Starting {
            self.transport = Transport::Paused;
            self.announce(Announcement::PlaybackFailed(err.to_string()));
        }
        self.schedule_skip(self.delays.on_reject);
    }

    /// Schedule a skip unless the current track is the last one.
    fn schedule_skip(&mut self, delay: Duration) {
        if !self.has_following() {
            return;
        }
        let from = self.current;
        if self.pending_skips.iter().any(|skip| skip.from == from) {
            return;
        }
        self.pending_skips.push(PendingSkip {
            due: Instant::now() + delay,
            from,
        });
    }

    fn has_following(&self) -> bool {
        match self.current {
            Some(i) => i + 1 < self.queue.len(),
            None => !self.queue.is_empty(),
        }
    }

    // ---- accessors ----

    pub fn announce(&mut self, announcement: Announcement) {
        self.announcer.announce(announcement);
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    #[cfg(test)]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.queue.get(i))
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// `(position, duration)` of the loaded source.
    pub fn progress(&self) -> (Duration, Option<Duration>) {
        (self.position, self.duration)
    }

    /// Number of loads performed so far.
    pub fn load_count(&self) -> u64 {
        self.loads
    }

    #[cfg(test)]
    pub fn pending_skips(&self) -> usize {
        self.pending_skips.len()
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
