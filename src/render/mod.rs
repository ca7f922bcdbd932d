//! Terminal rendering of the detail card and the edit form.

use colored::Colorize;

use crate::models::{Priority, Status};
use crate::view::{EditForm, Notice, NoticeLevel, TaskDetail};

/// Cells in a rendered progress bar.
pub const BAR_WIDTH: usize = 20;

/// Format a priority as a colored string.
pub fn format_priority(p: Priority) -> String {
    match p {
        Priority::High => p.as_str().red().bold().to_string(),
        Priority::Medium => p.as_str().yellow().to_string(),
        Priority::Low => p.as_str().bright_black().to_string(),
    }
}

/// Format a status as a colored string.
pub fn format_status(s: Status) -> String {
    match s {
        Status::Pending => s.as_str().white().to_string(),
        Status::InProgress => s.as_str().cyan().to_string(),
        Status::Completed => s.as_str().green().to_string(),
        Status::Overdue => s.as_str().red().to_string(),
    }
}

/// Color a stored priority. Values outside the options print plain.
fn format_priority_text(raw: &str) -> String {
    match Priority::ALL.into_iter().find(|p| p.as_str() == raw) {
        Some(p) => format_priority(p),
        None => raw.to_string(),
    }
}

fn format_status_text(raw: &str) -> String {
    match Status::ALL.into_iter().find(|s| s.as_str() == raw) {
        Some(s) => format_status(s),
        None => raw.to_string(),
    }
}

pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => notice.message.green().to_string(),
        NoticeLevel::Failure => notice.message.red().bold().to_string(),
    }
}

/// Draw a determinate progress bar. The value itself is never altered; it
/// is only bounded when deciding how many cells to fill.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let pct = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 100.0) };
    let filled = (pct * width as f64 / 100.0).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    )
}

/// Render the read-only detail card.
pub fn render_detail(detail: &TaskDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Task Details".magenta().bold()));
    out.push_str(&format!("{}\n", detail.title.magenta().bold()));
    if !detail.description.is_empty() {
        out.push_str(&format!("{}\n", detail.description));
    }
    out.push('\n');
    out.push_str(&format!("Priority:    {}\n", format_priority_text(&detail.priority)));
    out.push_str(&format!("Status:      {}\n", format_status_text(&detail.status)));
    out.push_str(&format!("Category:    {}\n", detail.category));
    out.push_str(&format!("Recurring:   {}\n", detail.recurring));
    out.push_str(&format!("Due Date:    {}\n", detail.due_date));
    out.push_str(&format!(
        "Progress:    {}% {}\n",
        detail.progress_text(),
        progress_bar(detail.progress_percent(), BAR_WIDTH)
    ));
    if let Some(ref url) = detail.attachment {
        out.push_str(&format!("Attachments: {}\n", url.blue().underline()));
    }
    out
}

/// Render the edit form with its current values and the select options.
pub fn render_form(form: &EditForm) -> String {
    let priorities: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
    let statuses: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Edit Task".magenta().bold()));
    out.push_str(&format!("Task Title*:      {}\n", form.title));
    out.push_str(&format!("Task Description: {}\n", form.description));
    out.push_str(&format!(
        "Priority:         {} ({})\n",
        form.priority,
        priorities.join(" | ")
    ));
    out.push_str(&format!("Due Date:         {}\n", form.due_date));
    out.push_str(&format!(
        "Status:           {} ({})\n",
        form.status,
        statuses.join(" | ")
    ));
    out
}
