use super::TaskBackend;
use crate::config::Credentials;
use crate::constants::{REST_PATH_PREFIX, TASKS_COLLECTION};
use crate::core::{NewTask, Task, TaskId};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Backend talking to the hosted database's REST interface
#[derive(Debug)]
pub struct RestBackend {
    client: Client,
    /// Full URL of the tasks collection
    endpoint: Url,
    key: String,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: TaskId,
}

impl RestBackend {
    /// Creates a backend for the project at `credentials.url`
    ///
    /// # Errors
    ///
    /// Returns `Error::Remote` if the URL cannot be parsed
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let endpoint = collection_endpoint(&credentials.url, TASKS_COLLECTION)?;
        debug!("Tasks endpoint: {}", endpoint);
        Ok(RestBackend {
            client: Client::new(),
            endpoint,
            key: credentials.key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// `select=*&order=assigned_date.desc`
    fn list_request(&self) -> Result<Request> {
        Ok(self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "assigned_date.desc")])
            .build()?)
    }

    /// `select=id` with equality filters on both fields
    fn lookup_request(&self, staff_name: &str, assigned_date: NaiveDate) -> Result<Request> {
        Ok(self
            .request(Method::GET)
            .query(&[
                ("select", "id".to_string()),
                ("staff_name", format!("eq.{}", staff_name)),
                ("assigned_date", format!("eq.{}", assigned_date)),
            ])
            .build()?)
    }

    /// One-element JSON array, no representation returned
    fn insert_request(&self, task: &NewTask) -> Result<Request> {
        Ok(self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&[task])
            .build()?)
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        debug!("{} {}", request.method(), request.url());
        let res = self.client.execute(request).await?;
        ensure_success(res).await
    }
}

#[async_trait]
impl TaskBackend for RestBackend {
    async fn list_all(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self.execute(self.list_request()?).await?.json().await?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn find_ids_by_staff_and_date(
        &self,
        staff_name: &str,
        assigned_date: NaiveDate,
    ) -> Result<Vec<TaskId>> {
        let request = self.lookup_request(staff_name, assigned_date)?;
        let rows: Vec<IdRow> = self.execute(request).await?.json().await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn insert(&self, task: &NewTask) -> Result<()> {
        self.execute(self.insert_request(task)?).await?;
        Ok(())
    }
}

/// Builds `<base>/rest/v1/<collection>`, tolerating a missing trailing slash
fn collection_endpoint(base: &str, collection: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| Error::Remote(format!("Invalid URL: {}", e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.join(REST_PATH_PREFIX)
        .and_then(|u| u.join(collection))
        .map_err(|e| Error::Remote(format!("Invalid URL: {}", e)))
}

async fn ensure_success(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await?;
    Err(Error::Remote(error_message(status, &body)))
}

/// Extracts the backend's `message` field, falling back to the raw body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value["message"].as_str() {
            return message.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}
