pub mod batch;
pub mod menu;
pub mod online;

use crossterm::event::KeyCode;
use insurance_app::Mode;
use ratatui::Frame;

use crate::state::session::Session;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Online(online::OnlineState),
    Batch(batch::BatchState),
}

impl Screen {
    /// The screen showing `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Online => Screen::Online(online::OnlineState::new()),
            Mode::Batch => Screen::Batch(batch::BatchState::new()),
        }
    }

    pub fn draw(&self, f: &mut Frame, session: &Session) {
        match self {
            Screen::Menu(s) => menu::draw(f, s),
            Screen::Online(s) => online::draw(f, s, session),
            Screen::Batch(s) => batch::draw(f, s, session),
        }
    }

    pub fn handle_key(&mut self, session: &mut Session, key: KeyCode) -> Action {
        if let Screen::Menu(s) = self {
            return menu::handle_key(s, session, key);
        }

        if session.fault().is_some() {
            return handle_fault_key(session, key);
        }

        match self {
            Screen::Menu(_) => Action::None,
            Screen::Online(s) => online::handle_key(s, session, key),
            Screen::Batch(s) => batch::handle_key(s, session, key),
        }
    }
}

/// Keys on the error surface: any key goes back to the page.
fn handle_fault_key(session: &mut Session, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            session.dismiss_fault();
            Action::Transition(Screen::Menu(menu::MenuState::new()))
        }
        _ => {
            session.dismiss_fault();
            Action::None
        }
    }
}

/// Switches to the other workflow.
fn switch_mode(session: &mut Session) -> Action {
    let next = match session.mode {
        Mode::Online => Mode::Batch,
        Mode::Batch => Mode::Online,
    };
    session.switch_mode(next);
    Action::Transition(Screen::for_mode(next))
}
