use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the backend. Hosted databases hand out either
/// integer sequences or textual keys, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One staff daily-assignment entry as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Backend assigned identifier
    pub id: TaskId,
    pub staff_name: String,
    pub team_name: String,
    pub task_description: String,
    pub assigned_date: NaiveDate,
    pub day_number: i64,
    /// Image encoded as a data URI
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
}

/// A task record before the backend assigned it an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub staff_name: String,
    pub team_name: String,
    pub task_description: String,
    pub assigned_date: NaiveDate,
    pub day_number: i64,
    pub image_base64: Option<String>,
    pub video_link: Option<String>,
}

impl NewTask {
    /// Attaches an identifier, producing the stored form of the record
    pub fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            staff_name: self.staff_name,
            team_name: self.team_name,
            task_description: self.task_description,
            assigned_date: self.assigned_date,
            day_number: self.day_number,
            image_base64: self.image_base64,
            video_link: self.video_link,
        }
    }
}
