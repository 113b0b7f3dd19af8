//! Declarative view of the task list
//!
//! `build_list_view` turns a page of tasks into display state. Rows carry
//! the raw user text; each renderer applies its own escaping before output.

mod html;
mod terminal;

pub use html::*;
pub use terminal::*;

use crate::core::{Page, Task};
use chrono::NaiveDate;

/// `Jan 2, 2024`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub day_badge: String,
    pub staff_name: String,
    pub team_name: String,
    pub assigned_date: String,
    pub image: Option<String>,
    pub video_link: Option<String>,
    pub description: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        TaskRow {
            day_badge: format!("Day {}", task.day_number),
            staff_name: task.staff_name.clone(),
            team_name: task.team_name.clone(),
            assigned_date: format_date(&task.assigned_date),
            image: task.image_base64.clone().filter(|s| !s.is_empty()),
            video_link: task.video_link.clone().filter(|s| !s.is_empty()),
            description: task.task_description.clone(),
        }
    }
}

/// Pagination controls, present only when there is more than one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSummary {
    /// `Showing X to Y of Z tasks`
    pub showing: String,
    /// `Page P of T`
    pub page: String,
    pub can_previous: bool,
    pub can_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<TaskRow>,
    pub pagination: Option<PaginationSummary>,
}

impl ListView {
    /// Nothing matched: show the empty state instead of the table
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn build_list_view(page: &Page<Task>) -> ListView {
    if page.is_empty() {
        return ListView {
            rows: Vec::new(),
            pagination: None,
        };
    }

    let rows = page.items.iter().map(TaskRow::from).collect();
    let pagination = (page.total_pages > 1).then(|| PaginationSummary {
        showing: format!(
            "Showing {} to {} of {} tasks",
            page.start_index + 1,
            page.start_index + page.items.len(),
            page.total_items
        ),
        page: format!("Page {} of {}", page.number, page.total_pages),
        can_previous: page.has_previous(),
        can_next: page.has_next(),
    });

    ListView { rows, pagination }
}
