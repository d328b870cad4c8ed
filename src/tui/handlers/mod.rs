use crossterm::event::Event;

use crate::tui::adapter;
use crate::tui::app::{App, CLEAR_KEY, QUIRK_KEY, QUIT_KEY};

/// Feed one terminal event through the emitter, then act on control keys
pub fn handle_event(app: &mut App, event: &Event) {
    let host_events = match event {
        Event::Key(key) => adapter::key_events(key, app.tables()),
        Event::Paste(text) => vec![adapter::paste_event(text)],
        _ => return,
    };

    for host_event in &host_events {
        let outcome = app.emitter.dispatch(host_event);
        app.record(&outcome);
    }

    for key in app.recorder.drain() {
        handle_control_key(app, key.as_str());
    }
}

fn handle_control_key(app: &mut App, key: &str) {
    match key {
        QUIT_KEY => app.should_quit = true,
        CLEAR_KEY => app.clear_output(),
        QUIRK_KEY => app.toggle_hyphen_quirk(),
        _ => {}
    }
}
