//! Tracks, the builtin catalog, file import and search.

mod catalog;
mod display;
mod import;
mod model;
mod search;

pub use catalog::demo_catalog;
pub use display::{card_label, split_artist_title, unknown_artist};
pub use import::{ImportBatch, ImportError, ImportReport, import_paths, is_audio_file};
pub use model::{Track, TrackSource};
pub use search::search;
