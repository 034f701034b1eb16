use crate::app::{App, DeleteOrigin, View};
use userdesk::{ListError, SubmitOutcome, SubmitRejected, UserId};

use super::action_queue::{Action, ActionTx, FetchPurpose};

pub(super) fn run_action(action: Action, app: &mut App, action_tx: &ActionTx) {
    match action {
        Action::Refresh => start_refresh(app, action_tx),
        Action::RefreshFinished { result } => {
            if app.users.finish_refresh(result).is_ok() {
                app.clamp_selection();
            }
        }
        Action::Fetch { id, purpose } => start_fetch(app, action_tx, id, purpose),
        Action::Fetched {
            id,
            purpose,
            result,
        } => handle_fetched(app, id, purpose, result),
        Action::SubmitForm => start_submit(app, action_tx),
        Action::SubmitFinished { form_id, result } => {
            handle_submit_finished(app, action_tx, form_id, result)
        }
        Action::ConfirmDelete => start_delete(app, action_tx),
        Action::DeleteFinished { id, origin, result } => {
            handle_delete_finished(app, id, origin, result)
        }
    }
}

fn busy_notice(app: &mut App, e: ListError) {
    tracing::debug!("request refused: {}", e);
    app.set_status("Please wait for the current request to finish".to_string());
}

fn start_refresh(app: &mut App, action_tx: &ActionTx) {
    let pending = match app.users.begin_refresh() {
        Ok(pending) => pending,
        Err(e) => {
            tracing::debug!("skipping refresh: {}", e);
            return;
        }
    };
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = pending.run().await;
        let _ = tx.send(Action::RefreshFinished { result });
    });
}

fn start_fetch(app: &mut App, action_tx: &ActionTx, id: UserId, purpose: FetchPurpose) {
    let pending = match app.users.begin_fetch(id) {
        Ok(pending) => pending,
        Err(e) => return busy_notice(app, e),
    };
    let id = pending.id().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = pending.run().await;
        let _ = tx.send(Action::Fetched {
            id,
            purpose,
            result,
        });
    });
}

fn handle_fetched(
    app: &mut App,
    id: UserId,
    purpose: FetchPurpose,
    result: Result<userdesk::UserRecord, userdesk::ApiError>,
) {
    let record = match app.users.finish_fetch(&id, result) {
        Ok(record) => record,
        Err(ListError::Api(e)) => {
            app.set_status(format!("Error loading user: {}", e));
            return;
        }
        Err(e) => {
            tracing::debug!("dropping fetch result for {}: {}", id, e);
            return;
        }
    };
    // The user may have moved on while the record was loading.
    if app.current_view != View::Dashboard {
        return;
    }
    match purpose {
        FetchPurpose::Details => app.show_details(record),
        FetchPurpose::Edit => app.open_edit_form(record),
    }
}

fn start_submit(app: &mut App, action_tx: &ActionTx) {
    let Some(session) = &mut app.form else {
        return;
    };
    let form_id = session.id;
    let pending = match session.form.begin_submit() {
        Ok(pending) => pending,
        Err(SubmitRejected::InFlight) => return,
        Err(SubmitRejected::Invalid(errors)) => {
            tracing::debug!("form blocked with {} field errors", errors.len());
            return app.set_status("Please fix the highlighted fields".to_string());
        }
        Err(e) => {
            tracing::debug!("submit refused: {}", e);
            return;
        }
    };
    app.clear_status();

    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = pending.run().await;
        let _ = tx.send(Action::SubmitFinished { form_id, result });
    });
}

fn handle_submit_finished(
    app: &mut App,
    action_tx: &ActionTx,
    form_id: u64,
    result: Result<userdesk::UserRecord, userdesk::ApiError>,
) {
    let Some(session) = app.form.as_mut().filter(|session| session.id == form_id) else {
        tracing::debug!("dropping submit result for closed form {}", form_id);
        return;
    };

    let created = session.form.is_new();
    match session.form.finish_submit(result) {
        SubmitOutcome::Saved(record) => {
            app.users.upsert(record);
            app.form = None;
            app.details = None;
            app.navigate_to(View::Dashboard);
            app.set_status(if created {
                "User created successfully!".to_string()
            } else {
                "User updated successfully!".to_string()
            });
            let _ = action_tx.send(Action::Refresh);
        }
        // The form renders its own submit error banner.
        SubmitOutcome::Failed(e) => tracing::warn!("saving user failed: {}", e),
        SubmitOutcome::Rejected(_) => {}
    }
}

fn start_delete(app: &mut App, action_tx: &ActionTx) {
    let Some(origin) = app.delete_context.as_ref().map(|ctx| ctx.origin) else {
        return app.navigate_to(View::Dashboard);
    };
    let pending = match app.users.confirm_removal() {
        Ok(pending) => pending,
        Err(e) => {
            app.users.cancel_removal();
            app.delete_context = None;
            app.navigate_to(origin.view());
            return busy_notice(app, e);
        }
    };
    app.delete_context = None;
    app.navigate_to(origin.view());

    let id = pending.id().clone();
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = pending.run().await;
        let _ = tx.send(Action::DeleteFinished { id, origin, result });
    });
}

fn handle_delete_finished(
    app: &mut App,
    id: UserId,
    origin: DeleteOrigin,
    result: Result<(), userdesk::ApiError>,
) {
    match app.users.finish_removal(&id, result) {
        Ok(()) => {
            app.clamp_selection();
            let showing_deleted = app
                .details
                .as_ref()
                .is_some_and(|record| record.id.as_ref() == Some(&id));
            if origin == DeleteOrigin::Details && showing_deleted {
                app.close_details();
            }
            app.set_status("User deleted successfully!".to_string());
        }
        Err(ListError::Api(e)) => app.set_status(format!("Error deleting user: {}", e)),
        Err(e) => tracing::debug!("dropping delete result for {}: {}", id, e),
    }
}
