use super::{RestBackend, TaskBackend};
use crate::config::{Credentials, DuplicateCheck};
use crate::core::{NewTask, Task};
use crate::errors::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Task client that delegates every call to a concrete backend.
///
/// Each call is a single round trip: no retries, no timeout policy.
#[derive(Debug)]
pub struct TaskClient {
    backend: Box<dyn TaskBackend>,
    duplicate_check: DuplicateCheck,
}

impl TaskClient {
    /// Creates a client for the hosted database at `credentials`
    pub fn connect(credentials: &Credentials, duplicate_check: DuplicateCheck) -> Result<Self> {
        let backend = RestBackend::new(credentials)?;
        Ok(Self::with_backend(backend, duplicate_check))
    }

    pub fn with_backend(backend: impl TaskBackend + 'static, duplicate_check: DuplicateCheck) -> Self {
        TaskClient {
            backend: Box::new(backend),
            duplicate_check,
        }
    }

    pub fn duplicate_check(&self) -> DuplicateCheck {
        self.duplicate_check
    }

    /// All tasks, newest assigned date first
    pub async fn list_all(&self) -> Result<Vec<Task>> {
        self.backend.list_all().await
    }

    /// Whether a task already exists for this staff member on this date.
    ///
    /// With `DuplicateCheck::FailOpen` a failed lookup is logged and reported
    /// as `false`, so a `false` here is not a guarantee.
    pub async fn exists_by_staff_and_date(
        &self,
        staff_name: &str,
        assigned_date: NaiveDate,
    ) -> Result<bool> {
        match self
            .backend
            .find_ids_by_staff_and_date(staff_name, assigned_date)
            .await
        {
            Ok(ids) => {
                debug!(
                    "Duplicate lookup for {} on {} matched {} task(s)",
                    staff_name,
                    assigned_date,
                    ids.len()
                );
                Ok(!ids.is_empty())
            }
            Err(e) => match self.duplicate_check {
                DuplicateCheck::FailOpen => {
                    warn!("Error checking duplicate: {}", e);
                    Ok(false)
                }
                DuplicateCheck::FailClosed => Err(e),
            },
        }
    }

    pub async fn insert(&self, task: &NewTask) -> Result<()> {
        self.backend.insert(task).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::remote::MemoryBackend;

    fn new_task(staff: &str, date: &str) -> NewTask {
        NewTask {
            staff_name: staff.into(),
            team_name: "Ops".into(),
            task_description: "Inventory".into(),
            assigned_date: date.parse().unwrap(),
            day_number: 1,
            image_base64: None,
            video_link: None,
        }
    }

    #[tokio::test]
    async fn exists_matches_both_fields() {
        let backend = MemoryBackend::new();
        let client = TaskClient::with_backend(backend.clone(), DuplicateCheck::FailOpen);
        client.insert(&new_task("Alice", "2024-01-02")).await.unwrap();

        let date = "2024-01-02".parse().unwrap();
        assert!(client.exists_by_staff_and_date("Alice", date).await.unwrap());
        assert!(!client.exists_by_staff_and_date("alice", date).await.unwrap());
        assert!(!client
            .exists_by_staff_and_date("Alice", "2024-01-03".parse().unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn failed_lookup_fails_open_by_default() {
        let backend = MemoryBackend::new();
        backend.fail_lookup_with("connection reset");
        let client = TaskClient::with_backend(backend, DuplicateCheck::FailOpen);

        let found = client
            .exists_by_staff_and_date("Alice", "2024-01-02".parse().unwrap())
            .await
            .unwrap();
        assert!(!found);
    }

    #[tokio::test]
    async fn failed_lookup_propagates_when_fail_closed() {
        let backend = MemoryBackend::new();
        backend.fail_lookup_with("connection reset");
        let client = TaskClient::with_backend(backend, DuplicateCheck::FailClosed);

        let result = client
            .exists_by_staff_and_date("Alice", "2024-01-02".parse().unwrap())
            .await;
        assert!(matches!(result, Err(Error::Remote(m)) if m == "connection reset"));
    }

    #[tokio::test]
    async fn list_follows_backend_ordering_contract() {
        let backend = MemoryBackend::new();
        let client = TaskClient::with_backend(backend.clone(), DuplicateCheck::FailOpen);
        client.insert(&new_task("B", "2024-01-01")).await.unwrap();
        client.insert(&new_task("A", "2024-01-02")).await.unwrap();

        let listed = client.list_all().await.unwrap();
        assert_eq!(listed[0].staff_name, "A");
        assert_eq!(listed[1].staff_name, "B");
        assert_eq!(backend.call_count(), 3);
    }
}
