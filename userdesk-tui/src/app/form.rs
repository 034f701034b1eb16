use strum::IntoEnumIterator;
use userdesk::Field;

use super::*;

impl App {
    fn open_form(&mut self, form: userdesk::UserForm) {
        self.next_form_id += 1;
        let return_to = match self.current_view {
            View::Details => View::Details,
            _ => View::Dashboard,
        };
        self.form = Some(FormSession {
            id: self.next_form_id,
            form,
            focused: Field::Name,
            return_to,
        });
        self.navigate_to(View::Form);
    }

    pub fn open_create_form(&mut self) {
        self.open_form(userdesk::UserForm::create(Arc::clone(&self.store)));
    }

    pub fn open_edit_form(&mut self, record: UserRecord) {
        self.open_form(userdesk::UserForm::edit(Arc::clone(&self.store), record));
    }

    /// Drop the form and go back to where it was opened from. Any submit
    /// still in flight for it will be discarded on arrival.
    pub fn close_form(&mut self) {
        let return_to = self.form.take().map(|session| session.return_to);
        self.navigate_to(return_to.unwrap_or(View::Dashboard));
    }

    pub fn form_next_field(&mut self) {
        if let Some(session) = &mut self.form {
            let current = session.focused;
            session.focused = Field::iter()
                .cycle()
                .skip_while(|field| *field != current)
                .nth(1)
                .unwrap_or(Field::Name);
        }
    }

    pub fn form_previous_field(&mut self) {
        if let Some(session) = &mut self.form {
            let current = session.focused;
            session.focused = Field::iter()
                .rev()
                .cycle()
                .skip_while(|field| *field != current)
                .nth(1)
                .unwrap_or(Field::Name);
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        self.edit_focused_field(|value| value.push(c));
    }

    pub fn form_backspace(&mut self) {
        self.edit_focused_field(|value| {
            value.pop();
        });
    }

    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(session) = &mut self.form else {
            return;
        };
        let field = session.focused;
        let mut value = session.form.draft().value(field).to_string();
        edit(&mut value);
        if let Err(e) = session.form.set(field, value) {
            tracing::debug!("ignoring edit of {}: {}", field, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::loaded_app;
    use super::*;

    #[tokio::test]
    async fn tab_cycles_through_all_fields() {
        let (_, mut app) = loaded_app(&[]).await;
        app.open_create_form();

        let focused = |app: &App| app.form.as_ref().unwrap().focused;

        let mut seen = vec![focused(&app)];
        for _ in 0..7 {
            app.form_next_field();
            seen.push(focused(&app));
        }
        assert_eq!(seen[0], Field::Name);
        assert_eq!(seen[6], Field::Zip);
        assert_eq!(seen[7], Field::Name);

        app.form_previous_field();
        assert_eq!(focused(&app), Field::Zip);
        app.form_previous_field();
        assert_eq!(focused(&app), Field::City);
    }

    #[tokio::test]
    async fn typing_edits_the_focused_field_and_clears_its_error() {
        let (_, mut app) = loaded_app(&[]).await;
        app.open_create_form();
        let session = app.form.as_mut().unwrap();
        assert!(session.form.begin_submit().is_err());
        assert!(session.form.errors().contains(Field::Name));

        app.form_input_char('A');
        app.form_input_char('x');
        app.form_backspace();
        app.form_input_char('l');

        let form = &app.form.as_ref().unwrap().form;
        assert_eq!(form.draft().name, "Al");
        assert!(!form.errors().contains(Field::Name));
        assert!(form.errors().contains(Field::Email));
    }

    #[tokio::test]
    async fn each_form_gets_a_fresh_id_and_returns_to_its_origin() {
        let (_, mut app) = loaded_app(&["Ann"]).await;
        let ann = app.users.users()[0].clone();

        app.open_create_form();
        let first = app.form.as_ref().unwrap().id;
        app.close_form();
        assert_eq!(app.current_view, View::Dashboard);

        app.show_details(ann.clone());
        app.open_edit_form(ann);
        assert_ne!(app.form.as_ref().unwrap().id, first);
        assert!(!app.form.as_ref().unwrap().form.is_new());
        app.close_form();
        assert_eq!(app.current_view, View::Details);
        assert!(app.form.is_none());
    }
}
