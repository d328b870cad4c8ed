mod claims_panel;
mod footer;
mod header;
mod output_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Event log
            Constraint::Length(5), // Claims and host flags
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    output_panel::render(frame, app, root[1]);
    claims_panel::render(frame, app, root[2]);
    footer::render(frame, app, root[3]);
}
