use crate::view::format_date;
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Backend is not configured. Please configure the endpoint URL and access key first")]
    ConfigMissing,
    #[error("{0}")]
    Validation(String),
    #[error("Staff \"{staff_name}\" already has a task assigned on {}. Please use a different staff name or date.", format_date(.assigned_date))]
    Duplicate {
        staff_name: String,
        assigned_date: NaiveDate,
    },
    #[error("{0}")]
    Remote(String),
    #[error("Image size should be less than 5MB ({size} bytes exceeds {limit} bytes)")]
    ImageTooLarge { size: u64, limit: u64 },
    #[error("Could not determine the user's config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
