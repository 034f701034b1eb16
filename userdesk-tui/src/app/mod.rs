use std::sync::Arc;

use userdesk::{UserList, UserRecord, UserStore};

mod form;
mod navigation;
mod state;
pub use state::{DeleteContext, DeleteOrigin, FormSession, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<String>,
    /// Where records come from, shown in the header ("dev (in-memory)" or the API URL).
    pub source_label: String,

    pub store: Arc<dyn UserStore>,
    pub users: UserList,
    pub selected_index: usize,

    // Details view
    pub details: Option<UserRecord>,

    pub form: Option<FormSession>,
    next_form_id: u64,

    pub delete_context: Option<DeleteContext>,
}

impl App {
    pub fn new(store: Arc<dyn UserStore>, source_label: String) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            status_message: None,
            source_label,
            users: UserList::new(Arc::clone(&store)),
            store,
            selected_index: 0,
            details: None,
            form: None,
            next_form_id: 0,
            delete_context: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Switch views. Clears any status notice.
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use userdesk::{Address, InMemoryUserStore};

    pub fn user(name: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-010-2030".to_string(),
            company: "Acme".to_string(),
            address: Address {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "12345".to_string(),
            },
            ..Default::default()
        }
    }

    /// An app whose list already holds `names`, backed by an in-memory store.
    pub async fn loaded_app(names: &[&str]) -> (InMemoryUserStore, App) {
        let store = InMemoryUserStore::with_users(names.iter().map(|name| user(name)));
        let mut app = App::new(Arc::new(store.clone()), "test".to_string());
        app.users.refresh().await.unwrap();
        (store, app)
    }
}
