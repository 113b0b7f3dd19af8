use std::time::Duration;

/// Name of the remote collection holding task records
pub const TASKS_COLLECTION: &str = "tasks";

/// REST path prefix of the hosted database
pub const REST_PATH_PREFIX: &str = "rest/v1/";

/// Number of rows shown per page in the list view
pub const PAGE_SIZE: usize = 10;

/// Largest image file accepted as an attachment (5 MB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// How long a notification banner stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Day number the add-task form starts from
pub const INITIAL_DAY_NUMBER: i64 = 1;

/// Directory name used under the user's config directory
pub const APP_DIR_NAME: &str = "staffboard";

/// File name of the persisted configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the stored endpoint URL
pub const ENV_URL: &str = "STAFFBOARD_URL";

/// Environment variable overriding the stored access key
pub const ENV_KEY: &str = "STAFFBOARD_KEY";

/// Label of the submit control while no submission is running
pub const SUBMIT_IDLE_LABEL: &str = "➕ Add Task";
