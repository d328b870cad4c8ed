use keyemit_core::DefaultAction;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("EVENTS", true))
        .borders(Borders::ALL)
        .border_style(t.panel_border(true))
        .border_type(BorderType::Thick);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.output.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No events yet. Press keys to see how they normalize.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    // Follow the tail of the log
    let visible_height = inner.height as usize;
    let start = app.output.len().saturating_sub(visible_height);

    let lines: Vec<Line> = app.output[start..]
        .iter()
        .map(|entry| {
            let style = if entry.default_action == DefaultAction::Suppress {
                t.log_suppressed()
            } else if entry.is_silent() {
                t.log_silent()
            } else {
                t.log_emitted()
            };
            Line::styled(entry.line(), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
