//! crates/goal_tracker_core/src/rows.rs
//!
//! Positional row <-> record codecs for the sheet-backed collections.
//!
//! The column order IS the schema. Rows read back from the store can be
//! ragged (trailing empty cells are simply absent), so every accessor
//! defaults missing cells rather than trusting the column count.

use crate::domain::{DailyGoal, GoalStatus, Role, User, WeeklyGoal, WeeklyReport};

/// Returns the cell at `index`, or the empty string if the row is too short.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

impl User {
    /// Columns: `Users!A:D` = username, email, password digest, role.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            username: cell(row, 0).to_string(),
            email: cell(row, 1).to_string(),
            password_digest: cell(row, 2).to_string(),
            role: Role::from_cell(cell(row, 3)),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.password_digest.clone(),
            self.role.as_str().to_string(),
        ]
    }
}

impl DailyGoal {
    /// Columns: `DailyGoals!A:I` = username, email, goal, reflection,
    /// went well, challenges, left, date, status.
    pub fn from_row(row_index: usize, row: &[String]) -> Self {
        Self {
            row_index,
            username: cell(row, 0).to_string(),
            email: cell(row, 1).to_string(),
            daily_goal: cell(row, 2).to_string(),
            reflection: cell(row, 3).to_string(),
            went_well: cell(row, 4).to_string(),
            challenges: cell(row, 5).to_string(),
            left: cell(row, 6).to_string(),
            date: cell(row, 7).to_string(),
            status: GoalStatus::from_cell(cell(row, 8)),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.daily_goal.clone(),
            self.reflection.clone(),
            self.went_well.clone(),
            self.challenges.clone(),
            self.left.clone(),
            self.date.clone(),
            self.status.as_str().to_string(),
        ]
    }
}

impl WeeklyGoal {
    /// Columns: `WeeklyGoals!A:I` = same as a daily goal with `week` in
    /// column H instead of a date.
    pub fn from_row(row_index: usize, row: &[String]) -> Self {
        Self {
            row_index,
            username: cell(row, 0).to_string(),
            email: cell(row, 1).to_string(),
            weekly_goal: cell(row, 2).to_string(),
            reflection: cell(row, 3).to_string(),
            went_well: cell(row, 4).to_string(),
            challenges: cell(row, 5).to_string(),
            left: cell(row, 6).to_string(),
            week: cell(row, 7).to_string(),
            status: GoalStatus::from_cell(cell(row, 8)),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.weekly_goal.clone(),
            self.reflection.clone(),
            self.went_well.clone(),
            self.challenges.clone(),
            self.left.clone(),
            self.week.clone(),
            self.status.as_str().to_string(),
        ]
    }
}

impl WeeklyReport {
    /// Columns: `WeeklyReports!A:G` = username, email, week, completion
    /// percent, main challenges, AI feedback, created at.
    pub fn from_row(row: &[String]) -> Self {
        Self {
            username: cell(row, 0).to_string(),
            email: cell(row, 1).to_string(),
            week: cell(row, 2).to_string(),
            completion_percent: cell(row, 3).parse().unwrap_or(0),
            main_challenges: cell(row, 4).to_string(),
            ai_feedback: cell(row, 5).to_string(),
            created_at: cell(row, 6).to_string(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.week.clone(),
            self.completion_percent.to_string(),
            self.main_challenges.clone(),
            self.ai_feedback.clone(),
            self.created_at.clone(),
        ]
    }
}
