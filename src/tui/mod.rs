mod adapter;
mod app;
mod handlers;
mod theme;
mod ui;

use std::io;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use keyemit_core::Settings;
use ratatui::prelude::*;

use app::App;
use handlers::handle_event;
use ui::draw_ui;

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let mut app = App::new(settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: io::Result<()> = loop {
        if let Err(err) = terminal.draw(|f| draw_ui(f, &app)) {
            break Err(err);
        }

        if !event::poll(std::time::Duration::from_millis(200))? {
            continue;
        }

        let event = event::read()?;
        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Release {
                continue;
            }
        }

        handle_event(&mut app, &event);
        if app.should_quit {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    Ok(run_result?)
}
