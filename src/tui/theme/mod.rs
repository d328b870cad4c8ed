mod palette;

use ratatui::prelude::*;

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    pub fn panel_border(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.palette.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.border_default)
        }
    }

    // Badge for the handler failure policy
    pub fn policy_badge(&self, strict: bool) -> Style {
        let bg = if strict {
            self.palette.accent_danger
        } else {
            self.palette.accent_success
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    // Hints, labels
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    // Log line whose default action was suppressed
    pub fn log_suppressed(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_danger)
            .add_modifier(Modifier::BOLD)
    }

    // Log line that produced canonical keys
    pub fn log_emitted(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    // Log line that emitted nothing
    pub fn log_silent(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    pub fn flag(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.palette.accent_success)
        } else {
            Style::default().fg(self.palette.text_muted)
        }
    }

    pub fn panel_title(&self, title: &str, active: bool) -> Line<'_> {
        let style = if active {
            Style::default()
                .fg(self.palette.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            self.text_muted()
        };
        Line::styled(format!(" {} ", title), style)
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}
