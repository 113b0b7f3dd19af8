use crate::constants::{INITIAL_DAY_NUMBER, SUBMIT_IDLE_LABEL};
use crate::core::{ImageAttachment, NewTask};
use crate::errors::{Error, Result};
use crate::remote::TaskClient;
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

/// Raw inputs of the add-task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub staff_name: String,
    pub team_name: String,
    pub task_description: String,
    /// `YYYY-MM-DD`
    pub assigned_date: String,
    pub day_number: String,
    pub video_link: String,
    image: Option<ImageAttachment>,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            staff_name: String::new(),
            team_name: String::new(),
            task_description: String::new(),
            assigned_date: String::new(),
            day_number: INITIAL_DAY_NUMBER.to_string(),
            video_link: String::new(),
            image: None,
        }
    }
}

impl TaskForm {
    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Selects an image for the form. A rejected file leaves the field empty.
    pub fn attach_image(&mut self, path: impl AsRef<Path>) -> Result<&ImageAttachment> {
        self.image = None;
        let image = ImageAttachment::select(path)?;
        Ok(&*self.image.insert(image))
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Label shown next to the day number input
    pub fn day_display(&self) -> String {
        format!("Day {}", self.day_number.trim())
    }

    /// Local checks only; never touches the network
    fn validate(&self) -> Result<ValidatedForm> {
        let staff_name = self.staff_name.trim();
        let team_name = self.team_name.trim();
        let task_description = self.task_description.trim();
        let assigned_date = self.assigned_date.trim();

        if staff_name.is_empty()
            || team_name.is_empty()
            || task_description.is_empty()
            || assigned_date.is_empty()
        {
            return Err(Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }

        let assigned_date = NaiveDate::parse_from_str(assigned_date, "%Y-%m-%d").map_err(|_| {
            Error::Validation(format!(
                "Invalid assigned date '{}', expected YYYY-MM-DD",
                assigned_date
            ))
        })?;

        let day_number = self
            .day_number
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|day| day.checked_add(1).is_some())
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Day number must be a whole number below {}, got '{}'",
                    i64::MAX,
                    self.day_number.trim()
                ))
            })?;

        let video_link = Some(self.video_link.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(ValidatedForm {
            staff_name: staff_name.to_string(),
            team_name: team_name.to_string(),
            task_description: task_description.to_string(),
            assigned_date,
            day_number,
            video_link,
        })
    }

    /// Clears every field and advances the day number for the next entry
    fn reset_for_next(&mut self, next_day: i64) {
        *self = TaskForm {
            day_number: next_day.to_string(),
            ..TaskForm::default()
        };
    }
}

struct ValidatedForm {
    staff_name: String,
    team_name: String,
    task_description: String,
    assigned_date: NaiveDate,
    day_number: i64,
    video_link: Option<String>,
}

/// Step the in-flight submission is currently at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStage {
    #[default]
    Idle,
    Checking,
    Uploading,
    Submitting,
}

impl SubmissionStage {
    /// Label of the submit control for this stage
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStage::Idle => SUBMIT_IDLE_LABEL,
            SubmissionStage::Checking => "⏳ Checking...",
            SubmissionStage::Uploading => "⏳ Uploading...",
            SubmissionStage::Submitting => "⏳ Submitting...",
        }
    }
}

/// What a successful submission produced
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub task: NewTask,
    /// Day number pre-filled for the next entry
    pub next_day_number: i64,
}

/// Add-task form plus the submission state machine driving it.
///
/// `submit` borrows the workflow mutably for its whole run, so a second
/// submission cannot start while one is in flight.
#[derive(Debug, Default)]
pub struct SubmissionWorkflow {
    form: TaskForm,
    stage: SubmissionStage,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn stage(&self) -> SubmissionStage {
        self.stage
    }

    /// Runs validate, duplicate check, image encoding and insert in order.
    ///
    /// On success the form is cleared and the day number advanced. On any
    /// failure the form is left untouched for a retry. `on_stage` is called
    /// on every stage transition, ending with `Idle`.
    pub async fn submit<F>(
        &mut self,
        client: &TaskClient,
        mut on_stage: F,
    ) -> Result<SubmissionReceipt>
    where
        F: FnMut(SubmissionStage),
    {
        let validated = self.form.validate()?;

        let result = self.run(client, validated, &mut on_stage).await;
        self.enter(SubmissionStage::Idle, &mut on_stage);

        let receipt = result?;
        self.form.reset_for_next(receipt.next_day_number);
        info!(
            "Added task for {} on {} (day {})",
            receipt.task.staff_name, receipt.task.assigned_date, receipt.task.day_number
        );
        Ok(receipt)
    }

    async fn run<F>(
        &mut self,
        client: &TaskClient,
        form: ValidatedForm,
        on_stage: &mut F,
    ) -> Result<SubmissionReceipt>
    where
        F: FnMut(SubmissionStage),
    {
        self.enter(SubmissionStage::Checking, on_stage);
        if client
            .exists_by_staff_and_date(&form.staff_name, form.assigned_date)
            .await?
        {
            return Err(Error::Duplicate {
                staff_name: form.staff_name,
                assigned_date: form.assigned_date,
            });
        }

        self.enter(SubmissionStage::Uploading, on_stage);
        let image_base64 = match &self.form.image {
            Some(image) => Some(image.to_data_uri().await?),
            None => None,
        };

        self.enter(SubmissionStage::Submitting, on_stage);
        let task = NewTask {
            staff_name: form.staff_name,
            team_name: form.team_name,
            task_description: form.task_description,
            assigned_date: form.assigned_date,
            day_number: form.day_number,
            image_base64,
            video_link: form.video_link,
        };
        let next_day_number = task.day_number.checked_add(1).ok_or_else(|| {
            Error::Validation(format!("Day number {} has no successor", task.day_number))
        })?;
        client.insert(&task).await?;

        Ok(SubmissionReceipt {
            next_day_number,
            task,
        })
    }

    fn enter<F>(&mut self, stage: SubmissionStage, on_stage: &mut F)
    where
        F: FnMut(SubmissionStage),
    {
        debug!("Submission stage: {:?}", stage);
        self.stage = stage;
        on_stage(stage);
    }
}
