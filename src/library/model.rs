use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Where the bytes of a track come from.
#[derive(Clone, Debug)]
pub enum TrackSource {
    /// An encoded audio blob kept in memory (synthesized demo tracks).
    Memory(Arc<[u8]>),
    /// A file on disk.
    File(PathBuf),
}

impl TrackSource {
    /// Short human-readable description used in logs.
    pub fn describe(&self) -> String {
        match self {
            TrackSource::Memory(bytes) => format!("<memory: {} bytes>", bytes.len()),
            TrackSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub source: TrackSource,
    /// Advisory duration; `None` when it could not be determined.
    pub duration: Option<Duration>,
    pub is_user_import: bool,
}

impl Track {
    /// `true` when `query_lower` (already lowercased) is contained in the
    /// title or the artist, ignoring case.
    pub fn matches_lower(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.artist.to_lowercase().contains(query_lower)
    }
}
