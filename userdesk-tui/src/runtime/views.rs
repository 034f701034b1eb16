use crate::app::{self, App};
use crossterm::event::KeyEvent;

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod dashboard;
mod details;
mod form;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match &app.current_view {
        app::View::Dashboard => dashboard::handle_dashboard_key(key, app, action_tx),
        app::View::Details => details::handle_details_key(key, app),
        app::View::Form => form::handle_form_key(key, app, action_tx),
        app::View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
    }
}
