/// Message shown after a successful update.
pub const UPDATE_SUCCEEDED: &str = "Task updated successfully!";
/// Message shown after a failed update.
pub const UPDATE_FAILED: &str = "Failed to update task.";
/// Message shown after a successful delete.
pub const DELETE_SUCCEEDED: &str = "Task deleted successfully!";
/// Message shown after a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete task.";
/// Question asked before deleting.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// A user-facing acknowledgment emitted by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: &str) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Notice {
            level: NoticeLevel::Failure,
            message: message.to_string(),
        }
    }
}

/// Moves the user to another route (e.g. the listing after a delete).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Yes/no confirmation step. Answering may block on the user.
#[async_trait::async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Receives success/failure acknowledgments.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
