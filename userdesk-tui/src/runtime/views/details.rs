use crate::app::{App, DeleteOrigin};
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_details_key(key: KeyEvent, app: &mut App) {
    let Some(record) = app.details.clone() else {
        return app.close_details();
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.close_details(),
        KeyCode::Char('e') => app.open_edit_form(record),
        KeyCode::Char('d') => app.begin_delete(&record, DeleteOrigin::Details),
        _ => {}
    }
}
