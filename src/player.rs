//! Playback: the controller state machine and the media hosts it drives.

mod announce;
mod controller;
mod host;
mod rodio_host;

pub use announce::{Announcement, Announcer};
pub use controller::{Advance, PlaybackController, SkipDelays, Transport};
pub use host::{MediaError, MediaEvent, MediaHost};
pub use rodio_host::RodioHost;
