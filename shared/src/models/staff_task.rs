//! Staff Task Model

use super::ParseEnumError;
use crate::error::ErrorCode;
use crate::validation::{MAX_NOTE_LEN, ValidationError, validate_required_text};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task status (console codes 1 assigned / 2 in progress / 3 completed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Assigned,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Assigned, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Assigned => 1,
            Self::InProgress => 2,
            Self::Completed => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ParseEnumError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| {
                ParseEnumError::new("task status", code.to_string(), ErrorCode::InvalidTaskStatus)
            })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    /// Accepts `in_progress`, `in progress` and `in-progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        let normalized = s.to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::new("task status", s, ErrorCode::InvalidTaskStatus))
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffTask {
    pub id: i64,
    /// Assigned staff member
    pub user_id: i64,
    pub description: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: TaskStatus,
    /// Unix millis
    pub assigned_at: i64,
    /// Unix millis, set only while the task is completed
    pub completed_at: Option<i64>,
}

/// Create staff task payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffTaskCreate {
    pub user_id: i64,
    pub description: String,
    /// Initial status, `assigned` unless chosen
    #[serde(default)]
    pub status: TaskStatus,
}

impl StaffTaskCreate {
    pub fn new(user_id: i64, description: impl Into<String>) -> Result<Self, ValidationError> {
        let description = description.into().trim().to_string();
        if user_id <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "user_id",
                value: user_id.to_string(),
                expected: "a positive user id",
            });
        }
        validate_required_text(&description, "task_description", MAX_NOTE_LEN)?;
        Ok(Self {
            user_id,
            description,
            status: TaskStatus::default(),
        })
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TaskStatus::from_code(1), Ok(TaskStatus::Assigned));
        assert_eq!(TaskStatus::from_code(2), Ok(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_code(3), Ok(TaskStatus::Completed));
        assert_eq!(
            TaskStatus::from_code(4).unwrap_err().code,
            ErrorCode::InvalidTaskStatus
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("In-Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(
            TaskStatus::try_from("completed".to_string()),
            Ok(TaskStatus::Completed)
        );
        assert!("done".parse::<TaskStatus>().is_err());
        assert!(TaskStatus::Completed.is_completed());
        assert!(!TaskStatus::Assigned.is_completed());
    }

    #[test]
    fn test_initial_status() {
        let task = StaffTaskCreate::new(2, "Restock the bar").unwrap();
        assert_eq!(task.status, TaskStatus::Assigned);
        let task = task.with_status(TaskStatus::Completed);
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn test_create_rejections() {
        assert!(StaffTaskCreate::new(2, "Restock the bar").is_ok());
        assert!(matches!(
            StaffTaskCreate::new(0, "Restock"),
            Err(ValidationError::OutOfRange { field: "user_id", .. })
        ));
        assert_eq!(
            StaffTaskCreate::new(2, "  ").unwrap_err(),
            ValidationError::Required {
                field: "task_description"
            }
        );
    }
}
