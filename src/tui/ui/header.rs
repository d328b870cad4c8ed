use keyemit_core::FailurePolicy;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let source = app
        .settings
        .source_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in settings".to_string());
    let count = source.chars().count();
    let source = if count > 45 {
        let tail: String = source.chars().skip(count - 42).collect();
        format!("...{}", tail)
    } else {
        source
    };

    let policy = app.settings.failure_policy();
    let line = Line::from(vec![
        Span::styled("keyemit ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("[on failure: {}] ", policy),
            t.policy_badge(policy == FailurePolicy::Suppress),
        ),
        Span::styled(source, t.text_muted()),
        Span::raw(" "),
        Span::styled(
            format!(
                "{} keys, {} suppressed, {} handler failures",
                app.emitted, app.suppressed, app.failures
            ),
            t.text_secondary(),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
