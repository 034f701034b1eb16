use crate::app::{App, DeleteOrigin};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx, FetchPurpose};
use super::enqueue_action;

pub(super) fn handle_dashboard_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::Refresh),
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Enter => fetch_selected(app, action_tx, FetchPurpose::Details),
        KeyCode::Char('e') => fetch_selected(app, action_tx, FetchPurpose::Edit),
        KeyCode::Char('d') => {
            if let Some(record) = app.selected_user().cloned() {
                app.begin_delete(&record, DeleteOrigin::Dashboard);
            }
        }
        _ => {}
    }
}

fn fetch_selected(app: &App, action_tx: &ActionTx, purpose: FetchPurpose) {
    if let Some(id) = app.selected_user().and_then(|user| user.id.clone()) {
        enqueue_action(action_tx, Action::Fetch { id, purpose });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::loaded_app;
    use crate::app::View;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_dashboard_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[tokio::test]
    async fn enter_fetches_the_selected_user_for_details() {
        let (_, mut app) = loaded_app(&["Ann", "Bob"]).await;
        press(&mut app, KeyCode::Char('j'));
        let bob = app.users.users()[1].id.clone().unwrap();

        match press(&mut app, KeyCode::Enter) {
            Some(Action::Fetch { id, purpose }) => {
                assert_eq!(id, bob);
                assert_eq!(purpose, FetchPurpose::Details);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn d_asks_for_confirmation_without_deleting() {
        let (store, mut app) = loaded_app(&["Ann"]).await;
        let calls_before = store.call_count();

        assert!(press(&mut app, KeyCode::Char('d')).is_none());

        assert_eq!(app.current_view, View::ConfirmDelete);
        assert_eq!(app.delete_context.as_ref().map(|c| c.label.as_str()), Some("Ann"));
        assert_eq!(store.call_count(), calls_before);
    }

    #[tokio::test]
    async fn empty_list_ignores_row_actions() {
        let (_, mut app) = loaded_app(&[]).await;

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert!(press(&mut app, KeyCode::Char('d')).is_none());
        assert_eq!(app.current_view, View::Dashboard);
        assert!(matches!(press(&mut app, KeyCode::Char('r')), Some(Action::Refresh)));
    }
}
