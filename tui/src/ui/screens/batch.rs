use std::path::PathBuf;

use crossterm::event::KeyCode;
use insurance_app::batch::{is_csv, UPLOAD_EXTENSION};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    state::session::Session,
    ui::{
        draw::{draw as draw_page, Chrome},
        theme::Theme,
    },
};

use super::{menu, switch_mode, Action, Screen};

const HINTS: &[(&str, &str)] = &[
    ("enter", "upload"),
    ("↑↓", "scroll"),
    ("tab", "online"),
    ("esc", "menu"),
];

pub struct BatchState {
    path: String,
    scroll: usize,
    status: Option<String>,
}

impl BatchState {
    pub fn new() -> Self {
        Self {
            path: String::new(),
            scroll: 0,
            status: None,
        }
    }
}

pub fn handle_key(state: &mut BatchState, session: &mut Session, key: KeyCode) -> Action {
    state.status = None;

    match key {
        KeyCode::Char(c) => {
            state.path.push(c);
            Action::None
        }
        KeyCode::Backspace => {
            state.path.pop();
            Action::None
        }
        KeyCode::Enter => {
            try_upload(state, session);
            Action::None
        }
        KeyCode::Up => {
            state.scroll = state.scroll.saturating_sub(1);
            Action::None
        }
        KeyCode::Down => {
            let rows = session
                .page()
                .and_then(|p| p.table())
                .map_or(0, |t| t.nrows());
            if state.scroll + 1 < rows {
                state.scroll += 1;
            }
            Action::None
        }
        KeyCode::Tab => switch_mode(session),
        KeyCode::Esc => Action::Transition(Screen::Menu(menu::MenuState::new())),
        _ => Action::None,
    }
}

/// Hands the typed path to the session; the upload box only takes CSV files.
fn try_upload(state: &mut BatchState, session: &mut Session) {
    let trimmed = state.path.trim();
    if trimmed.is_empty() {
        state.status = Some("type the path of a CSV file to upload".into());
        return;
    }

    let path = PathBuf::from(trimmed);
    if !is_csv(&path) {
        state.status = Some(format!("only .{UPLOAD_EXTENSION} files can be uploaded"));
        return;
    }

    log::info!("uploading {}", path.display());
    state.scroll = 0;
    session.choose_upload(path);
}

pub fn draw(f: &mut Frame, state: &BatchState, session: &Session) {
    let chrome = Chrome {
        controls_height: 5,
        scroll: state.scroll,
        hints: HINTS,
        status: state.status.as_deref(),
    };

    draw_page(f, session, &chrome, |f, area| {
        draw_upload(f, area, state, session)
    });
}

fn draw_upload(f: &mut Frame, area: Rect, state: &BatchState, session: &Session) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focus())
        .title(" Upload CSV file for predictions ")
        .title_style(Theme::title());

    let input = if state.path.is_empty() {
        Line::from(vec![
            Span::styled("path/to/patients.csv", Theme::muted()),
            Span::styled("█", Theme::accent()),
        ])
    } else {
        Line::from(vec![
            Span::styled(state.path.as_str(), Theme::text()),
            Span::styled("█", Theme::accent()),
        ])
    };

    let current = match &session.upload {
        Some(path) => Line::from(vec![
            Span::styled("uploaded: ", Theme::dim()),
            Span::styled(path.display().to_string(), Theme::ok()),
        ]),
        None => Line::from(Span::styled("no file uploaded", Theme::muted())),
    };

    f.render_widget(Paragraph::new(vec![input, Line::from(""), current]).block(block), area);
}
