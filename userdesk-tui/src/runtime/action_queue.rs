use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use userdesk::{ApiError, UserId, UserRecord};

use crate::app::DeleteOrigin;

/// What a fetched record is for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum FetchPurpose {
    Details,
    Edit,
}

/// Work requested by key handlers, plus completions of spawned requests.
#[derive(Debug, Clone)]
pub(super) enum Action {
    Refresh,
    RefreshFinished {
        result: Result<Vec<UserRecord>, ApiError>,
    },
    Fetch {
        id: UserId,
        purpose: FetchPurpose,
    },
    Fetched {
        id: UserId,
        purpose: FetchPurpose,
        result: Result<UserRecord, ApiError>,
    },
    SubmitForm,
    SubmitFinished {
        form_id: u64,
        result: Result<UserRecord, ApiError>,
    },
    ConfirmDelete,
    DeleteFinished {
        id: UserId,
        origin: DeleteOrigin,
        result: Result<(), ApiError>,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
