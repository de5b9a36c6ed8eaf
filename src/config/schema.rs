use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/yfitops/config.toml` or `~/.config/yfitops/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `YFITOPS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub synth: SynthSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, in `0.0..=1.0`.
    pub initial_volume: f32,
    /// Amount added/removed by the volume keys.
    pub volume_step: f32,
    /// Seconds skipped by the seek keys.
    pub seek_seconds: u64,
    /// Delay before skipping a track whose playback start was refused (milliseconds).
    pub reject_skip_ms: u64,
    /// Delay before skipping a track that failed to load or decode (milliseconds).
    pub error_skip_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            volume_step: 0.1,
            seek_seconds: 10,
            reject_skip_ms: 1000,
            error_skip_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat starts enabled.
    pub repeat: bool,
    /// Load (but do not play) the first track at startup.
    pub autoload_first: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            autoload_first: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Language of announcements and labels.
    pub locale: Locale,
    /// Maximum number of cards shown for a search.
    pub search_result_limit: usize,
    /// Number of catalog tracks shown in the "Featured" section.
    pub featured_count: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ yfitops ~ ".to_string(),
            locale: Locale::En,
            search_result_limit: 6,
            featured_count: 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    #[serde(alias = "english", alias = "en-us", alias = "en-gb")]
    En,
    #[serde(alias = "french", alias = "fr-fr", alias = "francais")]
    Fr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Include the synthesized demo tracks in the catalog.
    pub demo_catalog: bool,
    /// Extra files or directories appended to the catalog at startup.
    pub catalog_paths: Vec<PathBuf>,
    /// Whether to recurse into subdirectories when importing a directory.
    pub recursive: bool,
    /// Whether to follow symlinks when importing a directory.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles) when importing a directory.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            demo_catalog: true,
            catalog_paths: Vec::new(),
            recursive: true,
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthSettings {
    /// Sample rate of the synthesized demo tracks (Hz).
    pub sample_rate: u32,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self { sample_rate: 44_100 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Override for the persisted state file (theme).
    pub state_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default log filter; `RUST_LOG` wins when set.
    pub level: String,
    /// Override for the log file.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
