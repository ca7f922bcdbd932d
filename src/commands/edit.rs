use std::sync::Arc;

use super::{AssumeYes, ClientOptions, open_view, print_json};
use crate::render::render_detail;
use crate::view::{FieldEdit, SubmitOutcome};

/// Field values given on the command line. `None` leaves the field as loaded.
#[derive(Debug, Default)]
pub struct EditArgs<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub due_date: Option<&'a str>,
    pub clear_due_date: bool,
    pub status: Option<&'a str>,
}

impl EditArgs<'_> {
    /// Turn the flags into form edits, in form order.
    fn edits(&self) -> Result<Vec<FieldEdit>, String> {
        let mut edits = Vec::new();
        if let Some(v) = self.title {
            edits.push(FieldEdit::parse("title", v)?);
        }
        if let Some(v) = self.description {
            edits.push(FieldEdit::parse("description", v)?);
        }
        if let Some(v) = self.priority {
            edits.push(FieldEdit::parse("priority", v)?);
        }
        if self.clear_due_date {
            edits.push(FieldEdit::DueDate(None));
        } else if let Some(v) = self.due_date {
            edits.push(FieldEdit::parse("dueDate", v)?);
        }
        if let Some(v) = self.status {
            edits.push(FieldEdit::parse("status", v)?);
        }
        Ok(edits)
    }
}

pub async fn run(opts: &ClientOptions, id: &str, args: &EditArgs<'_>) -> Result<(), String> {
    // Reject bad flags before touching the network.
    let edits = args.edits()?;

    let mut view = open_view(opts, id, Arc::new(AssumeYes)).await?;
    // A full-record write of the blank record would wipe the task.
    if !view.is_loaded() {
        return Err(format!("task {id} could not be loaded"));
    }
    for edit in edits {
        view.edit(edit)?;
    }

    match view.submit().await {
        SubmitOutcome::Updated => {
            if opts.json {
                print_json(view.record())
            } else {
                println!();
                print!("{}", render_detail(&view.detail()));
                Ok(())
            }
        }
        SubmitOutcome::Invalid(reason) => Err(reason),
        SubmitOutcome::Failed => Err(format!("task {id} was not updated")),
        SubmitOutcome::Unavailable => Err(format!("task {id} is not available for editing")),
    }
}
