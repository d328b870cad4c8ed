use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, CLEAR_KEY, QUIRK_KEY, QUIT_KEY};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let status = Line::styled(format!("Status: {}", app.status), t.status_message());
    let hints = Line::from(vec![
        Span::styled("type or paste", t.key_hint()),
        Span::styled(":normalize  ", t.text_muted()),
        Span::styled(QUIRK_KEY, t.key_hint()),
        Span::styled(":hyphen quirk  ", t.text_muted()),
        Span::styled(CLEAR_KEY, t.key_hint()),
        Span::styled(":clear  ", t.text_muted()),
        Span::styled(QUIT_KEY, t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    frame.render_widget(Paragraph::new(vec![status, hints]), area);
}
