use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value, json};
use std::fmt;

/// Date format used by the due date form field.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Date format used by the detail card ("Mar 1, 2024").
pub const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Options offered by the priority select, in display order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("unknown priority: {s}. valid priorities: Low, Medium, High")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl Status {
    /// Options offered by the status select, in display order.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Overdue => "Overdue",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in progress" | "in_progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "overdue" => Ok(Status::Overdue),
            _ => Err(format!(
                "unknown status: {s}. valid statuses: Pending, In Progress, Completed, Overdue"
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task record exactly as the backend represents it.
///
/// The record is kept as the raw JSON object the server sent. The editor
/// reads typed views of the fields it surfaces and writes edits back into
/// the same object, so a full-record `PUT` carries every other field
/// (ids of any type, owners, nulls, fractional progress) unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task {
    fields: Map<String, Value>,
}

impl Default for Task {
    /// The blank record shown before the first load completes.
    fn default() -> Self {
        let mut task = Task::from_fields(Map::new());
        task.fill_defaults();
        task
    }
}

impl Task {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Task { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Insert the form defaults for any surfaced field the record lacks.
    pub fn fill_defaults(&mut self) {
        let defaults = [
            ("title", json!("")),
            ("description", json!("")),
            ("priority", json!(Priority::default().as_str())),
            ("status", json!(Status::default().as_str())),
            ("recurring", json!("None")),
            ("progress", json!(0)),
            ("category", json!({ "name": "" })),
        ];
        for (key, value) in defaults {
            self.fields.entry(key).or_insert(value);
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// A field as display text. Null and absent read as empty.
    fn text_field(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    fn set_str(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
    }

    /// The record's own id, in whatever JSON type the backend uses.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    pub fn set_id(&mut self, id: &str) {
        self.set_str("id", id);
    }

    pub fn title(&self) -> &str {
        self.str_field("title").unwrap_or_default()
    }

    pub fn set_title(&mut self, title: &str) {
        self.set_str("title", title);
    }

    pub fn description(&self) -> &str {
        self.str_field("description").unwrap_or_default()
    }

    pub fn set_description(&mut self, description: &str) {
        self.set_str("description", description);
    }

    /// Priority as stored, verbatim.
    pub fn priority_text(&self) -> String {
        self.text_field("priority")
    }

    /// Priority, if the stored value is one of the known options.
    pub fn priority(&self) -> Option<Priority> {
        self.str_field("priority")
            .and_then(|s| Priority::ALL.into_iter().find(|p| p.as_str() == s))
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.set_str("priority", priority.as_str());
    }

    pub fn status_text(&self) -> String {
        self.text_field("status")
    }

    pub fn status(&self) -> Option<Status> {
        self.str_field("status")
            .and_then(|s| Status::ALL.into_iter().find(|st| st.as_str() == s))
    }

    pub fn set_status(&mut self, status: Status) {
        self.set_str("status", status.as_str());
    }

    pub fn recurring(&self) -> String {
        self.text_field("recurring")
    }

    /// Progress as the backend sent it. Any JSON number, never clamped.
    pub fn progress(&self) -> Option<&Number> {
        match self.fields.get("progress") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Parsed due date, if the record carries a recognizable one.
    pub fn due_date_parsed(&self) -> Option<NaiveDate> {
        self.due_date_raw().and_then(parse_due_date)
    }

    /// Raw due date with empty strings treated as absent.
    pub fn due_date_raw(&self) -> Option<&str> {
        self.str_field("dueDate").filter(|s| !s.trim().is_empty())
    }

    /// Store a date-only due date, or drop the field.
    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        match date {
            Some(d) => self.set_str("dueDate", &d.format(DATE_INPUT_FORMAT).to_string()),
            None => {
                self.fields.remove("dueDate");
            }
        }
    }

    /// Category name with empty names treated as absent.
    pub fn category_name(&self) -> Option<&str> {
        self.fields
            .get("category")
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
    }

    /// Attachment URL with empty strings treated as absent.
    pub fn attachment_url(&self) -> Option<&str> {
        self.str_field("attachments").filter(|s| !s.is_empty())
    }
}

/// Parse a due date in either of the representations backends send:
/// a bare `YYYY-MM-DD` date or an RFC 3339 timestamp (taken in UTC).
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
