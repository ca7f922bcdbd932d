//! The task editor view model.
//!
//! [`EditTaskView`] owns one task id, the last server record, and a draft
//! the user edits. It talks to the backend through a [`TaskApi`] and to the
//! user through injected [`Capabilities`], so it runs the same under a
//! terminal frontend and under tests.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::TaskApi;
use crate::models::Task;

mod capabilities;
mod form;

pub use capabilities::{
    Confirm, DELETE_FAILED, DELETE_PROMPT, DELETE_SUCCEEDED, Navigator, Notice, NoticeLevel,
    Notifier, UPDATE_FAILED, UPDATE_SUCCEEDED,
};
pub use form::{EditForm, FieldEdit, INVALID_DATE, NO_CATEGORY, NO_DUE_DATE, TaskDetail};

/// Route the view moves to after a successful delete.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// The user-facing side effects the view may trigger.
#[derive(Clone)]
pub struct Capabilities {
    pub navigator: Arc<dyn Navigator>,
    pub confirm: Arc<dyn Confirm>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// The initial read has not completed.
    Loading,
    /// Displaying and editing.
    Ready,
    /// The task was deleted; the local copy is gone.
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Updated,
    Failed,
    /// Not sent: a required field is empty.
    Invalid(String),
    /// Not sent: the view is still loading or the task was deleted.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation.
    Cancelled,
    Failed,
    Unavailable,
}

pub struct EditTaskView<A: TaskApi> {
    id: String,
    api: A,
    caps: Capabilities,
    state: ViewState,
    loaded: bool,
    record: Task,
    draft: Task,
}

impl<A: TaskApi> EditTaskView<A> {
    pub fn new(id: impl Into<String>, api: A, caps: Capabilities) -> Self {
        EditTaskView {
            id: id.into(),
            api,
            caps,
            state: ViewState::Loading,
            loaded: false,
            record: Task::default(),
            draft: Task::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Whether the initial read returned the server record. After a failed
    /// read the view is still ready, but holds the blank record.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Last record fetched from or accepted by the server.
    pub fn record(&self) -> &Task {
        &self.record
    }

    /// The locally edited copy that `submit` sends.
    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn detail(&self) -> TaskDetail {
        TaskDetail::from_task(&self.record)
    }

    pub fn form(&self) -> EditForm {
        EditForm::from_task(&self.draft)
    }

    /// Fetch the task. Only the first call reads; later calls do nothing.
    ///
    /// A failed read is logged and the view becomes ready with the blank
    /// record. There is no retry and no user-facing message.
    pub async fn load(&mut self) {
        if self.state != ViewState::Loading {
            return;
        }
        match self.api.get_task(&self.id).await {
            Ok(task) => {
                info!(id = %self.id, "loaded task");
                self.record = task.clone();
                self.draft = task;
                self.loaded = true;
            }
            Err(e) => error!(id = %self.id, error = %e, "error fetching task"),
        }
        self.state = ViewState::Ready;
    }

    /// Overwrite one draft attribute.
    pub fn edit(&mut self, edit: FieldEdit) -> Result<(), String> {
        match self.state {
            ViewState::Ready => {
                edit.apply(&mut self.draft);
                Ok(())
            }
            ViewState::Loading => Err(format!("task {} is still loading", self.id)),
            ViewState::Deleted => Err(format!("task {} has been deleted", self.id)),
        }
    }

    /// Overwrite one draft attribute addressed by form field name.
    pub fn edit_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        let edit = FieldEdit::parse(name, value)?;
        self.edit(edit)
    }

    /// Send the whole draft as a full-record update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state != ViewState::Ready {
            return SubmitOutcome::Unavailable;
        }
        if self.draft.title().trim().is_empty() {
            return SubmitOutcome::Invalid("title is required".to_string());
        }

        match self.api.put_task(&self.id, &self.draft).await {
            Ok(()) => {
                info!(id = %self.id, "updated task");
                self.record = self.draft.clone();
                self.caps.notifier.notify(Notice::success(UPDATE_SUCCEEDED));
                SubmitOutcome::Updated
            }
            Err(e) => {
                error!(id = %self.id, error = %e, "error updating task");
                self.caps.notifier.notify(Notice::failure(UPDATE_FAILED));
                SubmitOutcome::Failed
            }
        }
    }

    /// Ask for confirmation, then delete and leave for the listing route.
    ///
    /// On failure the view stays as it was; the record is not re-read.
    pub async fn delete(&mut self) -> DeleteOutcome {
        if self.state != ViewState::Ready {
            return DeleteOutcome::Unavailable;
        }
        if !self.caps.confirm.confirm(DELETE_PROMPT).await {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_task(&self.id).await {
            Ok(()) => {
                info!(id = %self.id, "deleted task");
                self.state = ViewState::Deleted;
                self.loaded = false;
                self.record = Task::default();
                self.draft = Task::default();
                self.caps.notifier.notify(Notice::success(DELETE_SUCCEEDED));
                self.caps.navigator.navigate(DASHBOARD_ROUTE);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(id = %self.id, error = %e, "error deleting task");
                self.caps.notifier.notify(Notice::failure(DELETE_FAILED));
                DeleteOutcome::Failed
            }
        }
    }
}
