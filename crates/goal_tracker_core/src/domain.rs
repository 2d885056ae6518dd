//! crates/goal_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs mirror the four sheet-backed collections; the serde names
//! are the camelCase wire names the browser client expects.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The role a user picked at signup. The backend stores and echoes it;
/// role-based routing happens in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Parses a role cell, falling back to `Student` for anything unrecognized.
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "teacher" => Role::Teacher,
            _ => Role::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

/// Progress state of a goal. Unknown or empty cells read back as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum GoalStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "In Progress" => GoalStatus::InProgress,
            "Completed" => GoalStatus::Completed,
            _ => GoalStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "Pending",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
        }
    }
}

/// One row of the `Users` collection. Never updated or deleted.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
}

/// One row of the `DailyGoals` collection.
///
/// `row_index` is the 1-based position of the row within the full range at
/// the moment it was read. It is how updates address a row, and it is not
/// stable across concurrent writers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    pub row_index: usize,
    pub username: String,
    pub email: String,
    pub daily_goal: String,
    pub reflection: String,
    pub went_well: String,
    pub challenges: String,
    pub left: String,
    pub date: String,
    pub status: GoalStatus,
}

/// One row of the `WeeklyGoals` collection. Same shape as a daily goal with
/// a week label in place of the date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub row_index: usize,
    pub username: String,
    pub email: String,
    pub weekly_goal: String,
    pub reflection: String,
    pub went_well: String,
    pub challenges: String,
    pub left: String,
    pub week: String,
    pub status: GoalStatus,
}

/// One row of the append-only `WeeklyReports` collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub username: String,
    pub email: String,
    pub week: String,
    pub completion_percent: u32,
    pub main_challenges: String,
    pub ai_feedback: String,
    pub created_at: String,
}
