//! Application session: ties the config store, the remote client, the list
//! state and the submission workflow together and reports every outcome as
//! a notification.

mod interactive;

use crate::config::{ConfigStore, Credentials, DuplicateCheck};
use crate::core::{
    Notification, NotificationCenter, SubmissionReceipt, SubmissionStage, SubmissionWorkflow,
    TaskFilter, TaskListState,
};
use crate::errors::{Error, Result};
use crate::remote::TaskClient;
use crate::view::{build_list_view, ListView};
use std::path::Path;
use tracing::{error, info, warn};

/// Builds a task client from freshly saved credentials
pub type Connector = Box<dyn Fn(&Credentials, DuplicateCheck) -> Result<TaskClient> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Task table with filters and pagination
    List,
    /// Add-task form
    AddTask,
}

pub struct App {
    store: ConfigStore,
    connector: Connector,
    client: Option<TaskClient>,
    list: TaskListState,
    submission: SubmissionWorkflow,
    notifications: NotificationCenter,
    view: View,
    filters_visible: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("configured", &self.client.is_some())
            .field("view", &self.view)
            .finish()
    }
}

impl App {
    /// Session against the hosted database described by `store`
    pub fn new(store: ConfigStore) -> Result<Self> {
        Self::with_connector(store, Box::new(TaskClient::connect))
    }

    /// Session whose clients are produced by `connector`
    pub fn with_connector(store: ConfigStore, connector: Connector) -> Result<Self> {
        let mut app = App {
            store,
            connector,
            client: None,
            list: TaskListState::new(),
            submission: SubmissionWorkflow::new(),
            notifications: NotificationCenter::default(),
            view: View::List,
            filters_visible: false,
        };
        if let Some(credentials) = app.store.get()? {
            app.connect(&credentials)?;
        }
        Ok(app)
    }

    fn connect(&mut self, credentials: &Credentials) -> Result<()> {
        let duplicate_check = self.store.load()?.workflow.duplicate_check;
        self.client = Some((self.connector)(credentials, duplicate_check)?);
        info!("Connected task client to {}", credentials.url);
        Ok(())
    }

    /// Whether the backend can be reached; when false only configuration is possible
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Result<&TaskClient> {
        self.client.as_ref().ok_or(Error::ConfigMissing)
    }

    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn list(&self) -> &TaskListState {
        &self.list
    }

    pub fn submission(&self) -> &SubmissionWorkflow {
        &self.submission
    }

    pub fn submission_mut(&mut self) -> &mut SubmissionWorkflow {
        &mut self.submission
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn filters_visible(&self) -> bool {
        self.filters_visible
    }

    fn notify_error(&mut self, message: String) {
        error!("{}", message);
        self.notifications.push(Notification::error(message));
    }

    /// Saves credentials, rebuilds the client and loads the list.
    ///
    /// Fails only when the credentials could not be stored or connected. A
    /// failed first load is reported on its own notification.
    pub async fn save_config(&mut self, url: &str, key: &str) -> Result<()> {
        let saved = self
            .store
            .set(url, key)
            .and_then(|credentials| self.connect(&credentials));
        if let Err(e) = saved {
            self.notify_error(e.to_string());
            return Err(e);
        }

        self.notifications
            .push(Notification::success("Configuration saved successfully!"));
        if self.load_tasks().await.is_err() {
            warn!("Configuration was saved but the task list could not be loaded");
        }
        Ok(())
    }

    /// Reloads the whole list from the backend, returning the task count
    pub async fn load_tasks(&mut self) -> Result<usize> {
        let client = self.client.as_ref().ok_or(Error::ConfigMissing)?;
        match client.list_all().await {
            Ok(tasks) => {
                info!("Loaded {} tasks", tasks.len());
                let count = tasks.len();
                self.list.replace_all(tasks);
                Ok(count)
            }
            Err(e) => {
                self.list.clear();
                self.notify_error(format!("Error loading tasks: {}", e));
                Err(e)
            }
        }
    }

    /// Switches views; entering the list view reloads it
    pub async fn switch_view(&mut self, view: View) -> Result<()> {
        self.view = view;
        if view == View::List {
            self.load_tasks().await?;
        }
        Ok(())
    }

    /// Shows or hides the filter panel, returning the toggle's new label
    pub fn toggle_filters(&mut self) -> &'static str {
        self.filters_visible = !self.filters_visible;
        if self.filters_visible {
            "Hide Filters"
        } else {
            "Show Filters"
        }
    }

    pub fn apply_filter(&mut self, filter: TaskFilter) {
        self.list.set_filter(filter);
    }

    pub fn change_page(&mut self, delta: i64) {
        self.list.change_page(delta);
    }

    pub fn go_to_page(&mut self, page: i64) {
        self.list.go_to_page(page);
    }

    pub fn list_view(&self) -> ListView {
        build_list_view(&self.list.current_view())
    }

    /// Picks an image for the form, reporting an oversized file
    pub fn attach_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if let Err(e) = self.submission.form_mut().attach_image(path) {
            self.notify_error(e.to_string());
            return Err(e);
        }
        Ok(())
    }

    /// Runs the submission workflow, then reloads the list on success.
    ///
    /// A failed reload after a successful insert is reported on its own and
    /// does not turn the submission into a failure.
    pub async fn submit_task<F>(&mut self, on_stage: F) -> Result<SubmissionReceipt>
    where
        F: FnMut(SubmissionStage),
    {
        let Some(client) = &self.client else {
            self.notify_error(Error::ConfigMissing.to_string());
            return Err(Error::ConfigMissing);
        };

        match self.submission.submit(client, on_stage).await {
            Ok(receipt) => {
                self.notifications
                    .push(Notification::success("Task added successfully!"));
                if self.load_tasks().await.is_err() {
                    warn!("Task was added but the list could not be reloaded");
                }
                Ok(receipt)
            }
            Err(e @ (Error::Validation(_) | Error::Duplicate { .. })) => {
                self.notify_error(e.to_string());
                Err(e)
            }
            Err(e) => {
                self.notify_error(format!("Error adding task: {}", e));
                Err(e)
            }
        }
    }

    pub async fn run_interactive(&mut self) -> Result<()> {
        interactive::run(self).await
    }
}
