use std::sync::Arc;

use super::{AssumeYes, ClientOptions, StdinConfirm, open_view};
use crate::view::{Confirm, DeleteOutcome};

pub async fn run(opts: &ClientOptions, id: &str, yes: bool) -> Result<(), String> {
    let confirm: Arc<dyn Confirm> = if yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };
    let mut view = open_view(opts, id, confirm).await?;

    match view.delete().await {
        DeleteOutcome::Deleted => {
            if opts.json {
                println!("{}", serde_json::json!({ "deleted": id }));
            }
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            if !opts.json {
                println!("Cancelled.");
            }
            Ok(())
        }
        DeleteOutcome::Failed => Err(format!("task {id} was not deleted")),
        DeleteOutcome::Unavailable => Err(format!("task {id} is not available")),
    }
}
