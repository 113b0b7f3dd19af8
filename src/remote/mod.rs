mod client;
mod memory;
mod rest;

pub use client::*;
pub use memory::*;
pub use rest::*;

use crate::core::{NewTask, Task, TaskId};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

/// Query surface of the remote "tasks" collection
#[async_trait]
pub trait TaskBackend: Debug + Send + Sync {
    /// Every task, ordered by assigned date, newest first
    async fn list_all(&self) -> Result<Vec<Task>>;

    /// Identifiers of the tasks matching both equality filters
    async fn find_ids_by_staff_and_date(
        &self,
        staff_name: &str,
        assigned_date: NaiveDate,
    ) -> Result<Vec<TaskId>>;

    async fn insert(&self, task: &NewTask) -> Result<()>;
}
