use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use log::{debug, warn};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{LibrarySettings, Locale};

use super::display::{split_artist_title, unknown_artist};
use super::model::{Track, TrackSource};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not an audio file ({mime}): {}", path.display())]
    NotAudio { path: PathBuf, mime: String },
    #[error("no such file: {}", path.display())]
    Missing { path: PathBuf },
}

/// Identity shared by every track of one import batch.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    prefix: String,
    user: bool,
}

impl ImportBatch {
    /// A user import stamped with the current wall-clock time.
    pub fn user_now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self::user_at(millis)
    }

    /// A user import stamped with `millis`; ids read `user-{millis}-{n}`.
    pub fn user_at(millis: u128) -> Self {
        Self {
            prefix: format!("user-{millis}"),
            user: true,
        }
    }

    /// Catalog entries configured in settings; ids read `cat-{n}`.
    pub fn catalog() -> Self {
        Self {
            prefix: "cat".to_string(),
            user: false,
        }
    }
}

/// Result of one import: accepted tracks in input order and what was skipped.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub tracks: Vec<Track>,
    pub skipped: Vec<ImportError>,
}

/// Import files (and the contents of directories) as tracks.
///
/// Entries that do not declare an audio media type are skipped with a
/// warning; nothing here fails the batch.
pub fn import_paths(
    paths: &[PathBuf],
    settings: &LibrarySettings,
    locale: Locale,
    batch: &ImportBatch,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (n, path) in expand(paths, settings).into_iter().enumerate() {
        match import_file(&path, locale) {
            Ok(mut track) => {
                track.id = format!("{}-{n}", batch.prefix);
                track.is_user_import = batch.user;
                debug!("imported {} as {}", path.display(), track.id);
                report.tracks.push(track);
            }
            Err(e) => {
                warn!("skipping import: {e}");
                report.skipped.push(e);
            }
        }
    }

    report
}

/// `true` when the file name declares an `audio/*` media type.
pub fn is_audio_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|m| m.type_() == mime_guess::mime::AUDIO)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn expand(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut walker = WalkDir::new(path)
            .follow_links(settings.follow_links)
            .sort_by_file_name();
        if !settings.recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            let p = entry.path();
            // Folder drops carry cover art and playlists; only audio is interesting.
            if p.is_file() && is_audio_file(p) {
                files.push(p.to_path_buf());
            }
        }
    }

    files
}

#[derive(Debug, Default)]
struct Sniffed {
    title: Option<String>,
    artist: Option<String>,
    duration: Option<Duration>,
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn sniff_tags(path: &Path) -> Sniffed {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return Sniffed::default();
    };

    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
    let mut sniffed = Sniffed {
        duration,
        ..Sniffed::default()
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        sniffed.title = tag.title().as_deref().and_then(non_blank);
        sniffed.artist = tag.artist().as_deref().and_then(non_blank);
    }

    sniffed
}

fn import_file(path: &Path, locale: Locale) -> Result<Track, ImportError> {
    if !is_audio_file(path) {
        return Err(ImportError::NotAudio {
            path: path.to_path_buf(),
            mime: mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string(),
        });
    }
    if !path.is_file() {
        return Err(ImportError::Missing {
            path: path.to_path_buf(),
        });
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let (stem_artist, stem_title) = match split_artist_title(&stem) {
        Some((artist, title)) => (Some(artist), title),
        None => (None, stem),
    };

    let sniffed = sniff_tags(path);
    let title = sniffed.title.unwrap_or(stem_title);
    let artist = sniffed
        .artist
        .or(stem_artist)
        .unwrap_or_else(|| unknown_artist(locale).to_string());

    Ok(Track {
        id: String::new(),
        title,
        artist,
        source: TrackSource::File(path.to_path_buf()),
        duration: sniffed.duration,
        is_user_import: false,
    })
}
