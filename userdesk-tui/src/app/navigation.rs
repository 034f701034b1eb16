use super::*;

impl App {
    pub fn select_next(&mut self) {
        let len = self.users.users().len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.users.users().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.users().get(self.selected_index)
    }

    pub fn show_details(&mut self, record: UserRecord) {
        self.details = Some(record);
        self.navigate_to(View::Details);
    }

    pub fn close_details(&mut self) {
        self.details = None;
        self.navigate_to(View::Dashboard);
    }

    /// Ask for confirmation before deleting `record`.
    pub fn begin_delete(&mut self, record: &UserRecord, origin: DeleteOrigin) {
        let Some(id) = record.id.clone() else {
            return;
        };
        self.users.request_removal(id);
        self.delete_context = Some(DeleteContext {
            label: record.name.clone(),
            detail: record.email.clone(),
            origin,
        });
        self.navigate_to(View::ConfirmDelete);
    }

    pub fn cancel_delete(&mut self) {
        self.users.cancel_removal();
        let origin = self.delete_context.take().map(|ctx| ctx.origin);
        self.navigate_to(origin.unwrap_or(DeleteOrigin::Dashboard).view());
    }
}
