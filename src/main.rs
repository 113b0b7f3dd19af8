//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and the
//! stored configuration, then either runs a one-shot command or starts the
//! interactive session.

mod cli;

use clap::Parser;
use cli::{AddArgs, Cli, Command, ListArgs};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use staffboard::app::App;
use staffboard::config::ConfigStore;
use staffboard::core::{NotificationKind, TaskFilter};
use staffboard::view::{render_html, render_terminal};
use staffboard::Result;
use tracing::{debug, error, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    staffboard::utils::init_logging(&cli.logging_level, cli.log_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    }
    .with_env_override(true);

    let mut app = App::new(store)?;
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app.run_interactive().await,
        Command::Configure { url, key } => configure(&mut app, url, key).await,
        Command::List(args) => list(&mut app, args).await,
        Command::Add(args) => add(&mut app, args).await,
    }
}

/// Prints the latest banner: successes to stdout, errors to stderr
fn report_last(app: &mut App) {
    if let Some(n) = app.notifications().last() {
        match n.kind {
            NotificationKind::Success => println!("{}", n.message),
            NotificationKind::Error => eprintln!("{}", n.message),
        }
    }
}

async fn configure(app: &mut App, url: Option<String>, key: Option<String>) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Endpoint URL")
            .interact_text()?,
    };
    let key = match key {
        Some(key) => key,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Access key")
            .interact()?,
    };
    app.save_config(&url, &key).await?;
    println!("Saved configuration to {}", app.config_path().display());
    report_last(app);
    Ok(())
}

async fn list(app: &mut App, args: ListArgs) -> Result<()> {
    app.load_tasks().await?;
    app.apply_filter(TaskFilter::from_inputs(
        args.staff.as_deref(),
        args.team.as_deref(),
        args.from,
        args.to,
    ));
    app.go_to_page(args.page);

    let view = app.list_view();
    if args.html {
        print!("{}", render_html(&view));
    } else {
        print!("{}", render_terminal(&view));
    }
    Ok(())
}

async fn add(app: &mut App, args: AddArgs) -> Result<()> {
    app.client()?;
    let form = app.submission_mut().form_mut();
    form.staff_name = args.staff;
    form.team_name = args.team;
    form.task_description = args.description;
    form.assigned_date = args.date;
    form.day_number = args.day.to_string();
    form.video_link = args.video.unwrap_or_default();

    if let Some(path) = args.image {
        app.attach_image(&path)?;
    }

    let receipt = app
        .submit_task(|stage| debug!("{}", stage.label()))
        .await?;
    report_last(app);
    println!("Next day number: {}", receipt.next_day_number);
    Ok(())
}
