use std::fs::{self, OpenOptions};

use log::{info, warn};

use crate::config;
use crate::library::{ImportBatch, Track, demo_catalog, import_paths};
use crate::player::{MediaHost, PlaybackController};

/// Send `log` output to the log file. A TUI owns stderr, so without a
/// writable file logging stays disabled.
pub fn init_logging(settings: &config::Settings) {
    let Some(path) = settings.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::new()
        .parse_filters(&settings.logging.level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

/// Demo tracks followed by the configured catalog paths.
pub fn build_catalog(settings: &config::Settings) -> Vec<Track> {
    let mut catalog = if settings.library.demo_catalog {
        demo_catalog(settings.synth.sample_rate)
    } else {
        Vec::new()
    };

    if !settings.library.catalog_paths.is_empty() {
        let report = import_paths(
            &settings.library.catalog_paths,
            &settings.library,
            settings.ui.locale,
            &ImportBatch::catalog(),
        );
        if !report.skipped.is_empty() {
            warn!("{} catalog entries skipped", report.skipped.len());
        }
        catalog.extend(report.tracks);
    }

    info!("catalog ready: {} tracks", catalog.len());
    catalog
}

pub fn apply_playback_defaults<H: MediaHost>(
    player: &mut PlaybackController<H>,
    settings: &config::Settings,
) {
    player.set_volume(settings.audio.initial_volume);
    if settings.playback.shuffle {
        player.set_shuffle(true);
    }
    if settings.playback.repeat {
        player.set_repeat(true);
    }
    if settings.playback.autoload_first {
        player.load(0);
    }
}
