use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for the application
#[derive(Parser)]
#[command(name = "staffboard", about = "Record and browse staff daily tasks")]
pub struct Cli {
    /// Path to the configuration file holding the backend credentials
    /// Default: <config dir>/staffboard/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "warn"
    #[arg(long, global = true, default_value_t = String::from("warn"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under ./logs
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save the endpoint URL and access key, prompting for missing values
    Configure {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        key: Option<String>,
    },
    /// Print one page of tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Menu-driven session (default)
    Interactive,
}

#[derive(Args)]
pub struct ListArgs {
    /// Staff name contains (case-insensitive)
    #[arg(long)]
    pub staff: Option<String>,
    /// Team name contains (case-insensitive)
    #[arg(long)]
    pub team: Option<String>,
    /// Earliest assigned date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<chrono::NaiveDate>,
    /// Latest assigned date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<chrono::NaiveDate>,
    /// Page to show; out-of-range values are clamped
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,
    /// Print an HTML table instead of terminal text
    #[arg(long)]
    pub html: bool,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub staff: String,
    #[arg(long)]
    pub team: String,
    #[arg(long)]
    pub description: String,
    /// Assigned date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value_t = 1)]
    pub day: i64,
    /// Image file to inline, at most 5MB
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub video: Option<String>,
}
