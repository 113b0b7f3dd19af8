use super::TaskBackend;
use crate::core::{NewTask, Task, TaskId};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    calls: usize,
    list_failure: Option<String>,
    lookup_failure: Option<String>,
    insert_failure: Option<String>,
}

/// In-process backend with the same ordering contract as the hosted one.
///
/// Clones share their state, so a test can keep a handle while a
/// `TaskClient` owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let backend = Self::new();
        backend.lock().tasks = tasks;
        backend
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Stored tasks in insertion order
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Number of backend calls served so far
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    pub fn fail_list_with(&self, message: &str) {
        self.lock().list_failure = Some(message.to_string());
    }

    pub fn fail_lookup_with(&self, message: &str) {
        self.lock().lookup_failure = Some(message.to_string());
    }

    pub fn fail_insert_with(&self, message: &str) {
        self.lock().insert_failure = Some(message.to_string());
    }
}

#[async_trait]
impl TaskBackend for MemoryBackend {
    async fn list_all(&self) -> Result<Vec<Task>> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(message) = &state.list_failure {
            return Err(Error::Remote(message.clone()));
        }
        let mut tasks = state.tasks.clone();
        tasks.sort_by_key(|task| Reverse(task.assigned_date));
        Ok(tasks)
    }

    async fn find_ids_by_staff_and_date(
        &self,
        staff_name: &str,
        assigned_date: NaiveDate,
    ) -> Result<Vec<TaskId>> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(message) = &state.lookup_failure {
            return Err(Error::Remote(message.clone()));
        }
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.staff_name == staff_name && t.assigned_date == assigned_date)
            .map(|t| t.id.clone())
            .collect())
    }

    async fn insert(&self, task: &NewTask) -> Result<()> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(message) = &state.insert_failure {
            return Err(Error::Remote(message.clone()));
        }
        let id = TaskId::Text(uuid::Uuid::new_v4().to_string());
        state.tasks.push(task.clone().with_id(id));
        Ok(())
    }
}
