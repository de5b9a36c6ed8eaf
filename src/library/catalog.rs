//! The builtin demo catalog.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::synth::{Style, render_wav};

use super::model::{Track, TrackSource};

struct DemoEntry {
    id: &'static str,
    title: &'static str,
    artist: &'static str,
    /// Synthesis style tag.
    style: &'static str,
    seconds: u32,
}

const DEMO_ENTRIES: [DemoEntry; 6] = [
    DemoEntry {
        id: "gen1",
        title: "Sunny Walk",
        artist: "Yfitops Studio",
        style: "melody",
        seconds: 45,
    },
    DemoEntry {
        id: "gen2",
        title: "Creative Minds",
        artist: "Yfitops Beats",
        style: "upbeat",
        seconds: 40,
    },
    DemoEntry {
        id: "gen3",
        title: "Acoustic Breeze",
        artist: "Yfitops Chill",
        style: "chill",
        seconds: 50,
    },
    DemoEntry {
        id: "gen4",
        title: "Happy Rock",
        artist: "Yfitops Energy",
        style: "electronic",
        seconds: 35,
    },
    DemoEntry {
        id: "gen5",
        title: "Groovy Piano",
        artist: "Yfitops Keys",
        style: "piano",
        seconds: 38,
    },
    DemoEntry {
        id: "gen6",
        title: "Bass Journey",
        artist: "Yfitops Deep",
        style: "melody",
        seconds: 42,
    },
];

/// Synthesize the demo tracks at `sample_rate`.
///
/// A track whose synthesis fails is left out of the catalog.
pub fn demo_catalog(sample_rate: u32) -> Vec<Track> {
    DEMO_ENTRIES
        .iter()
        .filter_map(|entry| synthesize(entry, sample_rate))
        .collect()
}

fn synthesize(entry: &DemoEntry, sample_rate: u32) -> Option<Track> {
    let style = Style::from_name(entry.style);
    match render_wav(style, entry.seconds, sample_rate) {
        Ok(bytes) => {
            debug!(
                "synthesized {} ({}, {}s, {} bytes)",
                entry.id,
                style.name(),
                entry.seconds,
                bytes.len()
            );
            Some(Track {
                id: entry.id.to_string(),
                title: entry.title.to_string(),
                artist: entry.artist.to_string(),
                source: TrackSource::Memory(Arc::from(bytes)),
                duration: Some(Duration::from_secs(u64::from(entry.seconds))),
                is_user_import: false,
            })
        }
        Err(e) => {
            warn!("skipping demo track {}: {e}", entry.id);
            None
        }
    }
}
