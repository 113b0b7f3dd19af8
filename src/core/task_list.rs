use crate::constants::PAGE_SIZE;
use crate::core::{clamp_page, filter_tasks, paginate, total_pages, Page, Task, TaskFilter};

/// In-memory list behind the list view.
///
/// Holds the tasks exactly as the backend returned them (already ordered by
/// assigned date, newest first), the active filter and the current page.
/// Filtered and paginated views are derived on every call.
#[derive(Debug, Clone)]
pub struct TaskListState {
    tasks: Vec<Task>,
    filter: TaskFilter,
    current_page: usize,
    page_size: usize,
}

impl Default for TaskListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListState {
    pub fn new() -> Self {
        TaskListState {
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            current_page: 1,
            page_size: PAGE_SIZE,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replaces the whole list after a load and goes back to page 1
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.current_page = 1;
    }

    /// Drops every loaded task, used when a load fails
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.current_page = 1;
    }

    /// Installs new filter criteria; always resets to page 1
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    pub fn filtered(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filter)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Moves by `delta` pages, clamping to the available range
    pub fn change_page(&mut self, delta: i64) {
        let requested = self.current_page as i64 + delta;
        self.current_page = clamp_page(requested, self.total_pages());
    }

    /// Jumps to an absolute page number, clamping to the available range
    pub fn go_to_page(&mut self, page: i64) {
        self.current_page = clamp_page(page, self.total_pages());
    }

    /// The page currently on screen
    pub fn current_view(&self) -> Page<Task> {
        let filtered: Vec<Task> = self.filtered().into_iter().cloned().collect();
        paginate(&filtered, self.current_page as i64, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskId;
    use chrono::{Duration, NaiveDate};

    fn tasks(count: usize) -> Vec<Task> {
        let base = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        (0..count)
            .map(|i| Task {
                id: TaskId::Number(i as i64),
                staff_name: if i % 2 == 0 { "Alice".into() } else { "Bob".into() },
                team_name: "Ops".into(),
                task_description: format!("task {}", i),
                assigned_date: base - Duration::days(i as i64),
                day_number: i as i64 + 1,
                image_base64: None,
                video_link: None,
            })
            .collect()
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = TaskListState::new();
        state.replace_all(tasks(35));
        state.change_page(2);
        assert_eq!(state.current_page(), 3);

        state.set_filter(TaskFilter::from_inputs(Some("ali"), None, None, None));
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.filtered().len(), 18);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn paging_clamps_at_both_ends() {
        let mut state = TaskListState::new();
        state.replace_all(tasks(12));
        state.change_page(-1);
        assert_eq!(state.current_page(), 1);
        state.change_page(5);
        assert_eq!(state.current_page(), 2);
        let view = state.current_view();
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.start_index, 10);
    }

    #[test]
    fn reload_returns_to_first_page() {
        let mut state = TaskListState::new();
        state.replace_all(tasks(25));
        state.go_to_page(3);
        state.replace_all(tasks(25));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn keeps_backend_order() {
        let mut state = TaskListState::new();
        let mut loaded = tasks(2);
        loaded.reverse();
        state.replace_all(loaded.clone());
        assert_eq!(state.current_view().items, loaded);
    }
}
