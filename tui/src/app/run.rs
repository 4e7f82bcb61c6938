use std::{env, fs::OpenOptions, io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use insurance_app::configs::{self, Settings};
use model::DiskStore;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{
    state::session::Session,
    ui::screens::{menu, Action, Screen},
};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Sends log records to the settings' log file, since the terminal belongs to the UI.
fn init_logger(settings: &Settings) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}

/// Runs the TUI application.
///
/// The first command line argument, if any, is the settings file.
///
/// # Errors
/// Returns an error if the settings cannot be loaded or terminal setup or rendering fails.
pub fn run() -> Result<()> {
    let explicit = env::args_os().nth(1).map(PathBuf::from);
    let settings = configs::load_or_default(explicit.as_deref())?;
    init_logger(&settings)?;
    log::info!("starting with model '{}' from {}", settings.model.name, settings.model.dir.display());

    let store = DiskStore::new(settings.model.dir.clone());
    let mut session = Session::new(settings, store);

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut screen = Screen::Menu(menu::MenuState::new());

    loop {
        terminal.draw(|f| screen.draw(f, &session))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(&mut session, k.code) {
                    Action::Quit => break,
                    Action::Transition(next) => screen = next,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    log::info!("shutting down");
    Ok(())
}
