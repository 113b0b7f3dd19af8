use crate::core::Task;
use chrono::NaiveDate;

/// Criteria of the filter panel. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the staff name
    pub staff_name_contains: Option<String>,
    /// Case-insensitive substring of the team name
    pub team_name_contains: Option<String>,
    /// Inclusive lower bound on the assigned date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the assigned date
    pub date_to: Option<NaiveDate>,
}

impl TaskFilter {
    /// Builds a filter from raw panel inputs, treating blank text as absent
    pub fn from_inputs(
        staff: Option<&str>,
        team: Option<&str>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Self {
        TaskFilter {
            staff_name_contains: normalize(staff),
            team_name_contains: normalize(team),
            date_from,
            date_to,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staff_name_contains.is_none()
            && self.team_name_contains.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// True iff the task satisfies every present criterion
    pub fn matches(&self, task: &Task) -> bool {
        contains_ci(&task.staff_name, self.staff_name_contains.as_deref())
            && contains_ci(&task.team_name, self.team_name_contains.as_deref())
            && self.date_from.map_or(true, |from| task.assigned_date >= from)
            && self.date_to.map_or(true, |to| task.assigned_date <= to)
    }
}

fn normalize(input: Option<&str>) -> Option<String> {
    input.filter(|s| !s.is_empty()).map(str::to_string)
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Returns the subsequence of `tasks` matching `criteria`, preserving order
pub fn filter_tasks<'a>(tasks: &'a [Task], criteria: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| criteria.matches(task)).collect()
}
