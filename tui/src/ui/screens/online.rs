use std::path::Path;

use crossterm::event::KeyCode;
use insurance_app::form::{Field, NumberInput, PatientForm};
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
    ("↑↓", "field"),
    ("←→", "adjust"),
    ("0-9 .", "type"),
    ("space", "toggle"),
    ("enter", "predict"),
    ("o / h", "images"),
    ("tab", "batch"),
    ("esc", "menu"),
];

const LABEL_WIDTH: usize = 20;

pub struct OnlineState {
    focus: Field,
    status: Option<String>,
}

impl OnlineState {
    pub fn new() -> Self {
        Self {
            focus: Field::Age,
            status: None,
        }
    }
}

pub fn handle_key(state: &mut OnlineState, session: &mut Session, key: KeyCode) -> Action {
    state.status = None;

    match key {
        KeyCode::Up => {
            leave_field(state, session);
            state.focus = state.focus.prev();
            Action::None
        }
        KeyCode::Down => {
            leave_field(state, session);
            state.focus = state.focus.next();
            Action::None
        }
        KeyCode::Left | KeyCode::Right => {
            if session.form.adjust(state.focus, key == KeyCode::Right) {
                session.rerender(false);
            }
            Action::None
        }
        KeyCode::Char(' ') if state.focus == Field::Smoker => {
            session.form.smoker.toggle();
            session.rerender(false);
            Action::None
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            if let Some(input) = session.form.number_mut(state.focus) {
                input.push_char(c);
            }
            Action::None
        }
        KeyCode::Backspace => {
            if let Some(input) = session.form.number_mut(state.focus) {
                input.backspace();
            }
            Action::None
        }
        KeyCode::Enter => {
            session.form.commit();
            session.rerender(state.focus == Field::Predict);
            Action::None
        }
        KeyCode::Char('o') => {
            let logo = session.settings.branding.logo.clone();
            view_image(state, &logo);
            Action::None
        }
        KeyCode::Char('h') => {
            let hospital = session.settings.branding.hospital.clone();
            view_image(state, &hospital);
            Action::None
        }
        KeyCode::Tab => switch_mode(session),
        KeyCode::Esc => Action::Transition(Screen::Menu(menu::MenuState::new())),
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

/// Applies typed text when the focus moves away from a number input.
fn leave_field(state: &OnlineState, session: &mut Session) {
    let Some(input) = session.form.number_mut(state.focus) else {
        return;
    };

    if input.is_editing() {
        input.commit();
        session.rerender(false);
    }
}

fn view_image(state: &mut OnlineState, path: &Path) {
    if let Err(e) = open::that(path) {
        log::warn!("could not open {}: {e}", path.display());
        state.status = Some(format!("could not open {}: {e}", path.display()));
    }
}

pub fn draw(f: &mut Frame, state: &OnlineState, session: &Session) {
    let chrome = Chrome {
        controls_height: Field::ALL.len() as u16 + 2,
        scroll: 0,
        hints: HINTS,
        status: state.status.as_deref(),
    };

    draw_page(f, session, &chrome, |f, area| {
        draw_form(f, area, &session.form, state.focus)
    });
}

fn draw_form(f: &mut Frame, area: Rect, form: &PatientForm, focus: Field) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focus())
        .title(" Patient Data ")
        .title_style(Theme::title());

    let lines = Field::ALL
        .iter()
        .map(|field| {
            let mut line = field_line(form, *field);
            if *field == focus {
                line.style = Theme::highlight_bg();
            }
            line
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(form: &PatientForm, field: Field) -> Line<'static> {
    match field {
        Field::Age => number_line(&form.age),
        Field::Bmi => number_line(&form.bmi),
        Field::Children => number_line(&form.children),
        Field::Sex => select_line(form.sex.label, form.sex.value().label()),
        Field::Region => select_line(form.region.label, form.region.value().label()),
        Field::Smoker => {
            let mark = if form.smoker.checked { "[x]" } else { "[ ]" };
            Line::from(vec![
                Span::styled(format!("{:<width$}", form.smoker.label, width = LABEL_WIDTH), Theme::dim()),
                Span::styled(mark, Theme::text()),
            ])
        }
        Field::Predict => Line::from(Span::styled("[ Predict ]", Theme::accent())),
    }
}

fn number_line(input: &NumberInput) -> Line<'static> {
    let (min, max) = input.bounds();
    let value_style = if input.is_editing() {
        Theme::warn()
    } else {
        Theme::text()
    };

    Line::from(vec![
        Span::styled(format!("{:<width$}", input.label, width = LABEL_WIDTH), Theme::dim()),
        Span::styled(format!("- {} +", input.display()), value_style),
        Span::styled(format!("   ({min} to {max})"), Theme::muted()),
    ])
}

fn select_line(label: &'static str, value: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), Theme::dim()),
        Span::styled(format!("◀ {value} ▶"), Theme::text()),
    ])
}
