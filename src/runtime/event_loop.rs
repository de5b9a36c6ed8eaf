use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::config;
use crate::library::{ImportBatch, import_paths};
use crate::player::{Advance, Announcement, MediaHost, PlaybackController};
use crate::prefs::{KeyValueStore, save_theme};
use crate::ui;

/// Main terminal event loop: drains player events, fires due auto-skips,
/// draws and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<H: MediaHost>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaybackController<H>,
    store: &mut dyn KeyValueStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_load = player.load_count();

    loop {
        player.pump();
        player.tick(Instant::now());

        // Keep the cursor on the loaded track, unless the user is typing.
        if player.load_count() != last_load {
            last_load = player.load_count();
            if app.mode == InputMode::Normal {
                if let Some(track) = player.current_track() {
                    app.select_track(&track.id);
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app, player, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, store) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Import `paths` as user tracks: append them to the queue and the
/// "Your imports" section, then announce the count.
pub fn import_files<H: MediaHost>(
    paths: &[PathBuf],
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaybackController<H>,
) {
    let report = import_paths(
        paths,
        &settings.library,
        settings.ui.locale,
        &ImportBatch::user_now(),
    );
    debug!(
        "import: {} accepted, {} skipped",
        report.tracks.len(),
        report.skipped.len()
    );

    app.add_imports(&report.tracks);
    let added = player.append(report.tracks);
    player.announce(Announcement::Imported(added));
}

/// Handle one key press. Returns `true` when the app should quit.
fn handle_key_event<H: MediaHost>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlaybackController<H>,
    store: &mut dyn KeyValueStore,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        InputMode::Search => {
            match key.code {
                KeyCode::Esc => app.clear_search(),
                KeyCode::Enter => app.exit_search_mode(),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::Import => {
            match key.code {
                KeyCode::Esc => app.cancel_import(),
                KeyCode::Enter => {
                    let paths = app.take_import_paths();
                    if !paths.is_empty() {
                        import_files(&paths, settings, app, player);
                    }
                }
                KeyCode::Backspace => app.pop_import_char(),
                KeyCode::Char(c) if !c.is_control() => app.push_import_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::Normal => {}
    }

    let seek = settings.audio.seek_seconds.min(i64::MAX as u64) as i64;
    let step = settings.audio.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') => player.toggle_play(),
        KeyCode::Char('n') => player.next(Advance::Manual),
        KeyCode::Char('p') => player.prev(),
        KeyCode::Char('m') => player.toggle_mute(),
        KeyCode::Up => player.nudge_volume(step),
        KeyCode::Down => player.nudge_volume(-step),
        KeyCode::Right => player.seek_by(seek),
        KeyCode::Left => player.seek_by(-seek),
        KeyCode::Char('r') => player.set_repeat(!player.repeat()),
        KeyCode::Char('s') => player.set_shuffle(!player.shuffle()),
        KeyCode::Char('t') => {
            let theme = app.toggle_theme();
            save_theme(store, theme);
        }
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('i') => app.enter_import_mode(),
        KeyCode::Char('j') | KeyCode::Tab => app.next(),
        KeyCode::Char('k') | KeyCode::BackTab => app.prev(),
        KeyCode::Enter => {
            // Cards map to the queue by id; the first match wins.
            let index = app
                .selected_track()
                .and_then(|track| player.position_of(&track.id));
            if let Some(index) = index {
                player.load(index);
                player.play();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(tenths) = c.to_digit(10) {
                player.seek_to_fraction(f64::from(tenths) / 10.0);
            }
        }
        KeyCode::Char('a') => {
            if let Some(track) = app.selected_track() {
                player.announce(Announcement::AddedToQueue(track.title.clone()));
            }
        }
        _ => {}
    }

    false
}
