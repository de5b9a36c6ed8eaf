use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::player::{Announcement, PlaybackController, RodioHost, SkipDelays};
use crate::prefs::{FileStore, load_theme};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    startup::init_logging(&settings);

    let mut store = FileStore::new(settings.state_path());
    let theme = load_theme(&store);

    let catalog = startup::build_catalog(&settings);
    let mut app = App::new(catalog.clone(), &settings.ui, theme);

    let host = RodioHost::open();
    let mut player =
        PlaybackController::new(host, settings.ui.locale, SkipDelays::from(&settings.audio));
    player.set_queue(catalog);
    startup::apply_playback_defaults(&mut player, &settings);

    // Files given on the command line are imported like a drop.
    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if !args.is_empty() {
        event_loop::import_files(&args, &settings, &mut app, &mut player);
    }

    player.announce(Announcement::Ready);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut app, &mut player, &mut store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
