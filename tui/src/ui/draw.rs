use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Frame,
};

use crate::state::session::Session;

use super::{layout, theme::Theme, widgets};

/// What a screen adds to the shared page frame.
pub struct Chrome<'a> {
    /// Height of the controls box at the top of the main panel, borders included.
    pub controls_height: u16,
    /// First table row shown.
    pub scroll: usize,
    pub hints: &'a [(&'a str, &'a str)],
    pub status: Option<&'a str>,
}

/// Draws the page of the last render, or the error surface if it failed.
///
/// `controls` draws the screen's own input widgets into the area it is given.
pub fn draw(
    f: &mut Frame,
    session: &Session,
    chrome: &Chrome<'_>,
    controls: impl FnOnce(&mut Frame, Rect),
) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let (header_area, body_area, hints_area) = layout::vertical(area);

    let Some(page) = session.page() else {
        f.render_widget(
            widgets::header(insurance_app::TITLE, session.mode),
            header_area,
        );
        if let Some(fault) = session.fault() {
            widgets::fault(f, body_area, fault);
        }
        f.render_widget(
            widgets::hints(&[("any key", "dismiss"), ("esc", "menu"), ("q", "quit")]),
            hints_area,
        );
        return;
    };

    f.render_widget(widgets::header(&page.title, session.mode), header_area);

    let (sidebar_area, main_area) = layout::body(body_area);
    f.render_widget(
        widgets::panel("Sidebar", widgets::element_lines(&page.sidebar)),
        sidebar_area,
    );

    let (controls_area, output_area) = layout::main(main_area, chrome.controls_height);
    controls(f, controls_area);

    match page.table() {
        Some(table) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(8), Constraint::Min(4)])
                .split(output_area);
            f.render_widget(
                widgets::panel("Output", widgets::element_lines(&page.main)),
                rows[0],
            );
            f.render_widget(widgets::results_table(table, chrome.scroll), rows[1]);
        }
        None => f.render_widget(
            widgets::panel("Output", widgets::element_lines(&page.main)),
            output_area,
        ),
    }

    f.render_widget(widgets::hints(chrome.hints), hints_area);

    if let Some(msg) = chrome.status {
        widgets::error_bar(f, body_area, msg);
    }
}
