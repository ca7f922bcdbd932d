use std::sync::Arc;

use super::{AssumeYes, ClientOptions, open_view, print_json};
use crate::render::{render_detail, render_form};

pub async fn run(opts: &ClientOptions, id: &str, with_form: bool) -> Result<(), String> {
    // Showing never deletes, so the confirm capability is never asked.
    let view = open_view(opts, id, Arc::new(AssumeYes)).await?;

    if opts.json {
        return print_json(view.record());
    }

    print!("{}", render_detail(&view.detail()));
    if with_form {
        println!();
        print!("{}", render_form(&view.form()));
    }
    Ok(())
}
