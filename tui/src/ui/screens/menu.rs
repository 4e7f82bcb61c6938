use crossterm::event::KeyCode;
use insurance_app::{Mode, ABOUT, MODE_PROMPT, TITLE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    state::session::Session,
    ui::{layout::centered_rect, theme::Theme, widgets},
};

use super::{Action, Screen};

const LOGO: &str = r#"
   ┌───────┐
   │   ╋   │
   │  ╋╋╋  │
   │   ╋   │
   └───────┘
"#;

const QUIT: &str = "Quit";

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

fn item_count() -> usize {
    Mode::ALL.len() + 1
}

pub fn handle_key(state: &mut MenuState, session: &mut Session, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.selected > 0 {
                state.selected -= 1;
            }
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < item_count() - 1 {
                state.selected += 1;
            }
            Action::None
        }
        KeyCode::Enter => match Mode::ALL.get(state.selected) {
            Some(mode) => {
                session.switch_mode(*mode);
                Action::Transition(Screen::for_mode(*mode))
            }
            None => Action::Quit,
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(item_count() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    draw_logo(f, chunks[0]);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(TITLE, Theme::title())),
            Line::from(Span::styled(ABOUT, Theme::dim())),
        ])
        .alignment(Alignment::Center),
        chunks[1],
    );
    draw_menu(f, chunks[3], state);
    f.render_widget(
        widgets::hints(&[("↑↓ / j k", "navigate"), ("enter", "select"), ("q", "quit")]),
        chunks[5],
    );
}

fn draw_logo(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::accent())))
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focus())
        .title(format!(" {MODE_PROMPT} "))
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let labels = Mode::ALL
        .iter()
        .map(|m| m.label())
        .chain(std::iter::once(QUIT))
        .collect::<Vec<_>>();

    let item_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            labels
                .iter()
                .map(|_| Constraint::Length(2))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, item_area)) in labels.iter().zip(item_areas.iter()).enumerate() {
        let is_selected = i == state.selected;
        let (prefix, style) = if is_selected {
            ("▶ ", Theme::title().add_modifier(Modifier::BOLD))
        } else {
            ("  ", Theme::dim())
        };

        let line = Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(*label, style),
        ]);

        f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), *item_area);
    }
}
