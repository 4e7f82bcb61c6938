use std::error::Error;

use insurance_app::{page::Element, Mode, RenderFault};
use model::Table;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as TableWidget, Wrap},
    Frame,
};

use super::theme::Theme;

pub fn header<'a>(title: &'a str, mode: Mode) -> Paragraph<'a> {
    let tabs = Mode::ALL
        .iter()
        .flat_map(|m| {
            let style = if *m == mode {
                Theme::accent()
            } else {
                Theme::muted()
            };
            [Span::styled(format!(" {} ", m.label()), style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();

    let mut spans = vec![Span::styled(title, Theme::title()), Span::raw("  |  ")];
    spans.extend(tabs);

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    )
}

/// Turns page elements into text lines; tables are drawn separately.
pub fn element_lines(elements: &[Element]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for element in elements {
        match element {
            Element::Header(text) => {
                lines.push(Line::from(Span::styled(text.as_str(), Theme::title())));
                lines.push(Line::from(""));
            }
            Element::Subheader(text) => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(text.as_str(), Theme::accent())));
            }
            Element::Info(text) => lines.push(Line::from(vec![
                Span::styled("ℹ ", Theme::info()),
                Span::styled(text.as_str(), Theme::info()),
            ])),
            Element::Success(text) => lines.push(Line::from(vec![
                Span::styled("✔ ", Theme::ok()),
                Span::styled(text.as_str(), Theme::ok()),
            ])),
            Element::Error(text) => lines.push(Line::from(vec![
                Span::styled("✖ ", Theme::error()),
                Span::styled(text.as_str(), Theme::error()),
            ])),
            Element::Image(image) => lines.push(Line::from(vec![
                Span::styled("▣ ", Theme::dim()),
                Span::styled(image.caption(), Theme::dim()),
            ])),
            Element::Table(_) => {}
        }
    }

    lines
}

pub fn panel<'a>(title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(format!(" {title} "))
                .title_style(Theme::title()),
        )
        .style(Theme::text())
        .wrap(Wrap { trim: true })
}

/// Shows `table` starting at row `scroll`.
pub fn results_table(table: &Table, scroll: usize) -> TableWidget<'_> {
    let header = Row::new(
        table
            .columns()
            .iter()
            .map(|c| Cell::from(c.as_str()))
            .collect::<Vec<_>>(),
    )
    .style(Theme::title());

    let rows = table.rows().iter().skip(scroll).map(|row| {
        Row::new(
            row.iter()
                .map(|cell| Cell::from(cell.to_string()))
                .collect::<Vec<_>>(),
        )
        .style(Theme::text())
    });

    let ncols = table.ncols().max(1) as u32;
    let widths = (0..ncols)
        .map(|_| Constraint::Ratio(1, ncols))
        .collect::<Vec<_>>();

    TableWidget::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(format!(" {} row(s) ", table.nrows()))
                .title_style(Theme::dim()),
        )
}

/// Stands in for the page when a render failed.
pub fn fault(f: &mut Frame, area: Rect, fault: &RenderFault) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Error while {}", fault.stage),
            Theme::error(),
        )),
        Line::from(""),
        Line::from(Span::styled(fault.error.to_string(), Theme::text())),
    ];

    let mut source = fault.error.source();
    while let Some(cause) = source {
        lines.push(Line::from(Span::styled(
            format!("caused by: {cause}"),
            Theme::dim(),
        )));
        source = cause.source();
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::error())
                    .title(" Error ")
                    .title_style(Theme::error()),
            )
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn hints<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Theme::dim()),
                Span::styled(format!("  {action}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

pub fn error_bar(f: &mut Frame, area: Rect, msg: &str) {
    let bar = Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(1),
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", Theme::error()),
            Span::styled(msg, Theme::error()),
        ])),
        bar,
    );
}
