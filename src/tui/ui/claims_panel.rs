use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, CONTROL_KEYS};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("CLAIMS", false))
        .borders(Borders::ALL)
        .border_style(t.panel_border(false))
        .border_type(BorderType::Plain);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut claimed = vec![Span::styled("claimed: ", t.text_muted())];
    if app.claims().is_empty() {
        claimed.push(Span::styled("(none configured)", t.text_muted()));
    }
    for key in app.claims() {
        claimed.push(Span::styled(key.to_string(), t.text_secondary()));
        claimed.push(Span::raw("  "));
    }

    let mut control = vec![Span::styled("explorer: ", t.text_muted())];
    for key in CONTROL_KEYS {
        control.push(Span::styled(key, t.key_hint()));
        control.push(Span::raw("  "));
    }

    let quirk = app.hyphen_quirk();
    let flags = Line::from(vec![
        Span::styled("alternate hyphen code: ", t.text_muted()),
        Span::styled(if quirk { "[x] 173" } else { "[ ] 173" }, t.flag(quirk)),
        Span::styled("  ime sentinel: ", t.text_muted()),
        Span::styled(app.tables().ime_sentinel().code().to_string(), t.text_secondary()),
    ]);

    let para = Paragraph::new(vec![Line::from(claimed), Line::from(control), flags])
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}
