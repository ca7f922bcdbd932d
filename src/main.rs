use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use taskedit::commands::{self, ClientOptions, edit::EditArgs};

#[derive(Parser)]
#[command(
    name = "te",
    version,
    about = "Edit and delete tasks served by a REST backend"
)]
struct Cli {
    /// Base URL of the task API
    #[arg(
        long,
        env = "TASKEDIT_API",
        default_value = "http://127.0.0.1:5000",
        global = true
    )]
    api: String,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to the reference server database (default: .taskedit/tasks.db in current dir)
    #[arg(long, env = "TASKEDIT_DB", global = true)]
    db: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a task's details
    Show {
        /// Task ID
        id: String,
        /// Also print the edit form values
        #[arg(long)]
        form: bool,
    },
    /// Edit a task and submit the full record
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New priority (Low, Medium, High)
        #[arg(short, long)]
        priority: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due_date")]
        due_date: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due_date: bool,
        /// New status (Pending, "In Progress", Completed, Overdue)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Delete a task after confirmation
    Delete {
        /// Task ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Initialize the reference server database
    Init {
        /// Task ID prefix (default: "task")
        #[arg(long, default_value = "task")]
        prefix: String,
    },
    /// Run the reference REST backend
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    });

    let db_path = cli.db.unwrap_or_else(|| {
        let mut p = std::env::current_dir().unwrap_or_default();
        p.push(".taskedit");
        p.push("tasks.db");
        p
    });

    let opts = ClientOptions {
        api_url: cli.api,
        timeout: cli.timeout.map(Duration::from_secs),
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Show { id, form } => commands::show::run(&opts, &id, form).await,
        Commands::Edit {
            id,
            title,
            description,
            priority,
            due_date,
            clear_due_date,
            status,
        } => {
            let args = EditArgs {
                title: title.as_deref(),
                description: description.as_deref(),
                priority: priority.as_deref(),
                due_date: due_date.as_deref(),
                clear_due_date,
                status: status.as_deref(),
            };
            commands::edit::run(&opts, &id, &args).await
        }
        Commands::Delete { id, yes } => commands::delete::run(&opts, &id, yes).await,
        Commands::Init { prefix } => commands::init::run(&db_path, &prefix),
        Commands::Serve { port } => commands::serve::run(&db_path, port).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
