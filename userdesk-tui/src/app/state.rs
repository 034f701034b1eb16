use userdesk::{Field, UserForm};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Details,
    Form,
    ConfirmDelete,
}

/// Where a delete confirmation was opened from, so cancel and completion
/// can return there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeleteOrigin {
    Dashboard,
    Details,
}

impl DeleteOrigin {
    pub fn view(self) -> View {
        match self {
            Self::Dashboard => View::Dashboard,
            Self::Details => View::Details,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteContext {
    pub label: String,
    pub detail: String,
    pub origin: DeleteOrigin,
}

/// An open create/edit form.
///
/// `id` tags submit completions; a completion whose id no longer matches
/// belongs to a form that was closed and is dropped.
pub struct FormSession {
    pub id: u64,
    pub form: UserForm,
    pub focused: Field,
    pub return_to: View,
}
