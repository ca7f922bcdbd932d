use chrono::NaiveDate;
use serde_json::Number;

use crate::models::{DATE_DISPLAY_FORMAT, DATE_INPUT_FORMAT, Priority, Status, Task, parse_due_date};

/// Shown when the record has no due date.
pub const NO_DUE_DATE: &str = "No due date";
/// Shown when the record has no category (or an unnamed one).
pub const NO_CATEGORY: &str = "No category";
/// Shown when the record carries a due date that cannot be read.
pub const INVALID_DATE: &str = "Invalid date";

/// A single form-field change. Applying it overwrites exactly one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Description(String),
    Priority(Priority),
    DueDate(Option<NaiveDate>),
    Status(Status),
}

impl FieldEdit {
    /// Build an edit from a form field name and its string value.
    pub fn parse(name: &str, value: &str) -> Result<Self, String> {
        match name {
            "title" => Ok(FieldEdit::Title(value.to_string())),
            "description" => Ok(FieldEdit::Description(value.to_string())),
            "priority" => Priority::from_str(value).map(FieldEdit::Priority),
            "status" => Status::from_str(value).map(FieldEdit::Status),
            "dueDate" | "due_date" | "due-date" => {
                if value.trim().is_empty() {
                    return Ok(FieldEdit::DueDate(None));
                }
                NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT)
                    .map(|d| FieldEdit::DueDate(Some(d)))
                    .map_err(|e| format!("invalid due date {value:?} (expected YYYY-MM-DD): {e}"))
            }
            _ => Err(format!(
                "unknown field: {name}. editable fields: title, description, priority, dueDate, status"
            )),
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        match self {
            FieldEdit::Title(v) => task.set_title(&v),
            FieldEdit::Description(v) => task.set_description(&v),
            FieldEdit::Priority(p) => task.set_priority(p),
            // The date picker hands back YYYY-MM-DD, which is what gets stored.
            FieldEdit::DueDate(d) => task.set_due_date(d),
            FieldEdit::Status(s) => task.set_status(s),
        }
    }
}

/// Read-only projection of a record for the detail card.
///
/// Priority and status are shown as stored, even when the backend uses a
/// value outside the form's options.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetail {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub recurring: String,
    pub due_date: String,
    /// Passed through as-is; only the bar drawing bounds it.
    pub progress: Option<Number>,
    pub attachment: Option<String>,
}

impl TaskDetail {
    pub fn from_task(task: &Task) -> Self {
        let due_date = match task.due_date_raw() {
            None => NO_DUE_DATE.to_string(),
            Some(raw) => parse_due_date(raw)
                .map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
                .unwrap_or_else(|| INVALID_DATE.to_string()),
        };
        TaskDetail {
            title: task.title().to_string(),
            description: task.description().to_string(),
            priority: task.priority_text(),
            status: task.status_text(),
            category: task.category_name().unwrap_or(NO_CATEGORY).to_string(),
            recurring: task.recurring(),
            due_date,
            progress: task.progress().cloned(),
            attachment: task.attachment_url().map(str::to_string),
        }
    }

    /// Progress as printed on the card. A missing value prints as nothing.
    pub fn progress_text(&self) -> String {
        self.progress.as_ref().map(Number::to_string).unwrap_or_default()
    }

    /// Progress as a percentage for drawing. Missing reads as 0.
    pub fn progress_percent(&self) -> f64 {
        self.progress.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }
}

/// Current values of the edit form controls. A select whose stored value
/// is not one of its options shows the default option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// `YYYY-MM-DD`, or empty when there is no (readable) due date.
    pub due_date: String,
    pub status: Status,
}

impl EditForm {
    pub fn from_task(task: &Task) -> Self {
        EditForm {
            title: task.title().to_string(),
            description: task.description().to_string(),
            priority: task.priority().unwrap_or_default(),
            due_date: task
                .due_date_parsed()
                .map(|d| d.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            status: task.status().unwrap_or_default(),
        }
    }
}
