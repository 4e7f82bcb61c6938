use ratatui::style::{Color, Modifier, Style};

/// Clinic theme.
///
/// Base aesthetic:
/// - soft white foreground on a dark slate background
/// - teal for focus and titles
/// - green/red/blue for the success, error and info messages
pub struct Theme;

impl Theme {
    // Core palette
    pub const BG: Color = Color::Rgb(16, 22, 28);
    pub const FG: Color = Color::Rgb(230, 236, 240);
    pub const FG_DIM: Color = Color::Rgb(150, 165, 175);
    pub const FG_MUTED: Color = Color::Rgb(85, 95, 105);

    pub const ACCENT_TEAL: Color = Color::Rgb(0, 200, 180);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 220, 120);
    pub const ACCENT_BLUE: Color = Color::Rgb(110, 170, 255);
    pub const ACCENT_YELLOW: Color = Color::Rgb(255, 210, 90);
    pub const ACCENT_RED: Color = Color::Rgb(255, 95, 95);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Panel borders.
    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED).bg(Self::BG)
    }

    /// Border of the panel holding the focus.
    pub fn border_focus() -> Style {
        Style::default().fg(Self::ACCENT_TEAL).bg(Self::BG)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Focused form row.
    pub fn highlight_bg() -> Style {
        Style::default()
            .bg(Color::Rgb(20, 60, 60))
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default()
            .fg(Self::ACCENT_YELLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::ACCENT_BLUE)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }
}
