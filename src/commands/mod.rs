pub mod delete;
pub mod edit;
pub mod init;
pub mod serve;
pub mod show;

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::api::HttpTaskApi;
use crate::models::Task;
use crate::render::format_notice;
use crate::view::{Capabilities, Confirm, EditTaskView, Navigator, Notice, NoticeLevel, Notifier};

/// Connection settings shared by the client subcommands.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub json: bool,
}

/// Prints notices: successes to stdout, failures to stderr. With `--json`
/// stdout is reserved for the record, so everything goes to stderr.
pub struct TerminalNotifier {
    pub json: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success if !self.json => println!("{}", format_notice(&notice)),
            _ => eprintln!("{}", format_notice(&notice)),
        }
    }
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes is a no.
pub struct StdinConfirm;

fn ask(message: &str) -> bool {
    eprint!("{message} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait::async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        // stdin reads block; keep them off the runtime's worker threads.
        let message = message.to_string();
        tokio::task::spawn_blocking(move || ask(&message))
            .await
            .unwrap_or(false)
    }
}

/// Confirmation already given on the command line (`--yes`).
pub struct AssumeYes;

#[async_trait::async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// A terminal has nowhere to go; report the route instead.
pub struct PrintNavigator {
    pub json: bool,
}

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &str) {
        if !self.json {
            println!("Returning to {route}");
        }
    }
}

pub fn terminal_capabilities(json: bool, confirm: Arc<dyn Confirm>) -> Capabilities {
    Capabilities {
        navigator: Arc::new(PrintNavigator { json }),
        confirm,
        notifier: Arc::new(TerminalNotifier { json }),
    }
}

/// Build a view for `id` against the configured backend and load it.
pub async fn open_view(
    opts: &ClientOptions,
    id: &str,
    confirm: Arc<dyn Confirm>,
) -> Result<EditTaskView<HttpTaskApi>, String> {
    let api = HttpTaskApi::with_timeout(&opts.api_url, opts.timeout)
        .map_err(|e| format!("failed to build HTTP client: {e}"))?;
    let mut view = EditTaskView::new(id, api, terminal_capabilities(opts.json, confirm));
    view.load().await;
    Ok(view)
}

/// Print a record as pretty JSON.
pub fn print_json(task: &Task) -> Result<(), String> {
    let j = serde_json::to_string_pretty(task).map_err(|e| format!("json error: {e}"))?;
    println!("{j}");
    Ok(())
}
