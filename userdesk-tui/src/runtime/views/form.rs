use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_previous_field(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitForm),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            enqueue_action(action_tx, Action::SubmitForm)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_input_char(c)
        }
        KeyCode::Backspace => app.form_backspace(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::loaded_app;
    use crate::app::View;
    use userdesk::Field;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, key: KeyEvent) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_form_key(key, app, &tx);
        rx.try_recv().ok()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn keystrokes_go_to_the_focused_field() {
        let (_, mut app) = loaded_app(&[]).await;
        app.open_create_form();

        press(&mut app, key(KeyCode::Tab));
        for c in "a@b.co".chars() {
            press(&mut app, key(KeyCode::Char(c)));
        }

        let session = app.form.as_ref().unwrap();
        assert_eq!(session.focused, Field::Email);
        assert_eq!(session.form.draft().email, "a@b.co");
        assert!(session.form.draft().name.is_empty());
    }

    #[tokio::test]
    async fn enter_and_ctrl_s_submit() {
        let (_, mut app) = loaded_app(&[]).await;
        app.open_create_form();

        assert!(matches!(
            press(&mut app, key(KeyCode::Enter)),
            Some(Action::SubmitForm)
        ));
        assert!(matches!(
            press(
                &mut app,
                KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
            ),
            Some(Action::SubmitForm)
        ));
        assert!(app.form.as_ref().unwrap().form.draft().name.is_empty());
    }

    #[tokio::test]
    async fn esc_discards_the_form() {
        let (_, mut app) = loaded_app(&[]).await;
        app.open_create_form();
        press(&mut app, key(KeyCode::Char('x')));

        assert!(press(&mut app, key(KeyCode::Esc)).is_none());
        assert!(app.form.is_none());
        assert_eq!(app.current_view, View::Dashboard);
    }
}
