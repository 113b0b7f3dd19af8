use super::{App, View};
use crate::core::{Notification, NotificationKind, SubmissionStage, TaskFilter};
use crate::errors::Result;
use crate::view::{escape_terminal, render_terminal};
use chrono::NaiveDate;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Separator line used for visual formatting
const SEPARATOR: &str = "\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// ANSI escape sequence to clear the terminal screen
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Displays a formatted header with the given title
fn display_header(title: &str) {
    print!("{}", CLEAR_SCREEN);
    println!("{}{}{}", SEPARATOR, title.blue().bold(), SEPARATOR);
}

fn display_notification(app: &mut App) {
    if let Some(n) = app.notifications().visible(Instant::now()) {
        let line = match n.kind {
            NotificationKind::Success => format!("✓ {}", n.message).green(),
            NotificationKind::Error => format!("✗ {}", n.message).red(),
        };
        println!("{}\n", line);
    }
}

fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} [{elapsed_precise}] {msg}")
    {
        spinner.set_style(style);
    }
    spinner
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn parse_optional_date(input: &str) -> std::result::Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", input))
}

/// Blocks everything else until both credentials are saved
async fn configure(app: &mut App) -> Result<()> {
    loop {
        display_header("⚙️  Backend Configuration");
        display_notification(app);
        let url = prompt_text("Endpoint URL", "")?;
        let key = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Access key")
            .allow_empty_password(true)
            .interact()?;

        let spinner = new_spinner();
        spinner.set_message("Loading tasks...");
        let saved = app.save_config(&url, &key).await;
        spinner.finish_and_clear();
        // a rejected save may leave the previous client connected
        if saved.is_ok() {
            return Ok(());
        }
    }
}

async fn edit_filters(app: &mut App) -> Result<()> {
    let current = app.list().filter().clone();
    let staff = prompt_text(
        "Staff name contains",
        current.staff_name_contains.as_deref().unwrap_or(""),
    )?;
    let team = prompt_text(
        "Team name contains",
        current.team_name_contains.as_deref().unwrap_or(""),
    )?;
    let from = prompt_text(
        "From date (YYYY-MM-DD)",
        &current.date_from.map(|d| d.to_string()).unwrap_or_default(),
    )?;
    let to = prompt_text(
        "To date (YYYY-MM-DD)",
        &current.date_to.map(|d| d.to_string()).unwrap_or_default(),
    )?;

    match (parse_optional_date(&from), parse_optional_date(&to)) {
        (Ok(from), Ok(to)) => {
            app.apply_filter(TaskFilter::from_inputs(
                Some(staff.trim()),
                Some(team.trim()),
                from,
                to,
            ));
        }
        (Err(message), _) | (_, Err(message)) => {
            app.notifications().push(Notification::error(message));
        }
    }
    Ok(())
}

fn display_filters(app: &App) {
    let filter = app.list().filter();
    let show = |v: Option<String>| {
        v.map(|s| escape_terminal(&s))
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "{} staff: {}  team: {}  from: {}  to: {}\n",
        "Filters".bold(),
        show(filter.staff_name_contains.clone()),
        show(filter.team_name_contains.clone()),
        show(filter.date_from.map(|d| d.to_string())),
        show(filter.date_to.map(|d| d.to_string())),
    );
}

/// Returns false when the user asked to quit
async fn list_screen(app: &mut App) -> Result<bool> {
    display_header("📋 Daily Tasks");
    display_notification(app);
    if app.filters_visible() {
        display_filters(app);
    }

    let view = app.list_view();
    print!("{}", render_terminal(&view));
    println!();

    let toggle_label = if app.filters_visible() {
        "Hide Filters"
    } else {
        "Show Filters"
    };
    let mut actions: Vec<&str> = Vec::new();
    if view.pagination.as_ref().is_some_and(|p| p.can_next) {
        actions.push("Next page");
    }
    if view.pagination.as_ref().is_some_and(|p| p.can_previous) {
        actions.push("Previous page");
    }
    if app.filters_visible() {
        actions.push("Edit filters");
    }
    actions.extend([toggle_label, "Add task", "Reload", "Configure backend", "Quit"]);

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Action")
        .items(&actions)
        .default(0)
        .interact()?;

    match actions[choice] {
        "Next page" => app.change_page(1),
        "Previous page" => app.change_page(-1),
        "Edit filters" => edit_filters(app).await?,
        "Show Filters" | "Hide Filters" => {
            app.toggle_filters();
        }
        "Add task" => app.switch_view(View::AddTask).await?,
        "Reload" => {
            let spinner = new_spinner();
            spinner.set_message("Loading tasks...");
            let _ = app.load_tasks().await;
            spinner.finish_and_clear();
        }
        "Configure backend" => configure(app).await?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn edit_form(app: &mut App) -> Result<()> {
    let form = app.submission().form().clone();
    let staff_name = prompt_text("Staff name", &form.staff_name)?;
    let team_name = prompt_text("Team name", &form.team_name)?;
    let task_description = prompt_text("Task description", &form.task_description)?;
    let assigned_date = prompt_text("Assigned date (YYYY-MM-DD)", &form.assigned_date)?;
    let day_number = prompt_text("Day number", &form.day_number)?;
    let video_link = prompt_text("Video link (optional)", &form.video_link)?;
    let image_path = prompt_text(
        "Image file (optional, max 5MB)",
        &form
            .image()
            .map(|i| i.path().display().to_string())
            .unwrap_or_default(),
    )?;

    let form = app.submission_mut().form_mut();
    form.staff_name = staff_name;
    form.team_name = team_name;
    form.task_description = task_description;
    form.assigned_date = assigned_date;
    form.day_number = day_number;
    form.video_link = video_link;

    let image_path = image_path.trim();
    if image_path.is_empty() {
        form.clear_image();
    } else {
        let _ = app.attach_image(image_path);
    }
    Ok(())
}

async fn add_task_screen(app: &mut App) -> Result<bool> {
    display_header("➕ Add Task");
    display_notification(app);

    let form = app.submission().form();
    println!("{}", escape_terminal(&form.day_display()).cyan().bold());
    println!("Staff: {}", escape_terminal(&form.staff_name));
    println!("Team: {}", escape_terminal(&form.team_name));
    println!("Description: {}", escape_terminal(&form.task_description));
    println!("Date: {}", escape_terminal(&form.assigned_date));
    println!("Video: {}", escape_terminal(&form.video_link));
    if let Some(image) = form.image() {
        println!("Image: {} ({} bytes)", image.path().display(), image.size());
    }
    println!();

    let submit_label = app.submission().stage().label();
    let actions = ["Edit form", submit_label, "View tasks", "Quit"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Action")
        .items(&actions)
        .default(0)
        .interact()?;

    match choice {
        0 => edit_form(app)?,
        1 => {
            let spinner = new_spinner();
            let _ = app
                .submit_task(|stage| {
                    if stage == SubmissionStage::Idle {
                        spinner.finish_and_clear();
                    } else {
                        spinner.set_message(stage.label());
                    }
                })
                .await;
            spinner.finish_and_clear();
        }
        2 => {
            let _ = app.switch_view(View::List).await;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// Menu-driven terminal session over the list and add-task views
pub async fn run(app: &mut App) -> Result<()> {
    if !app.is_configured() {
        configure(app).await?;
    } else {
        let _ = app.load_tasks().await;
    }

    loop {
        let keep_going = match app.view() {
            View::List => list_screen(app).await?,
            View::AddTask => add_task_screen(app).await?,
        };
        if !keep_going {
            println!("{}", "👋 Bye!".cyan());
            return Ok(());
        }
    }
}
