//! yfitops: a terminal music player with a synthesized demo catalog.

mod app;
mod config;
mod library;
mod player;
mod prefs;
mod runtime;
mod synth;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
