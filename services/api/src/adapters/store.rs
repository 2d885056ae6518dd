//! services/api/src/adapters/store.rs
//!
//! The collection adapter: maps each logical entity onto its fixed-column
//! range and implements the `GoalStoreService` port over the range client.
//! Every operation mints its own bearer token; no auth state survives
//! between calls.

use async_trait::async_trait;
use tracing::info;

use goal_tracker_core::domain::{DailyGoal, User, WeeklyGoal, WeeklyReport};
use goal_tracker_core::ports::{GoalStoreService, PortError, PortResult};

use crate::adapters::google_auth::ServiceAccountAuth;
use crate::adapters::sheets::SheetsClient;

const USERS_RANGE: &str = "Users!A:D";
const DAILY_GOALS_RANGE: &str = "DailyGoals!A:I";
const WEEKLY_GOALS_RANGE: &str = "WeeklyGoals!A:I";
const REPORTS_RANGE: &str = "WeeklyReports!A:G";

/// Sheet-backed implementation of the `GoalStoreService` port.
#[derive(Clone)]
pub struct SheetStoreAdapter {
    auth: ServiceAccountAuth,
    sheets: SheetsClient,
}

impl SheetStoreAdapter {
    pub fn new(auth: ServiceAccountAuth, sheets: SheetsClient) -> Self {
        Self { auth, sheets }
    }

    /// Single-row update span within a goals range, e.g. `DailyGoals!A5:I5`.
    fn row_span(collection: &str, row_index: usize) -> String {
        format!("{collection}!A{row_index}:I{row_index}")
    }
}

#[async_trait]
impl GoalStoreService for SheetStoreAdapter {
    async fn fetch_users(&self) -> PortResult<Vec<User>> {
        let token = self.auth.mint_token().await?;
        let rows = self.sheets.read(&token, USERS_RANGE).await?;
        Ok(rows.iter().map(|row| User::from_row(row)).collect())
    }

    async fn create_user(&self, user: &User) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        // Email uniqueness is a linear scan before insert; the store itself
        // enforces nothing.
        let rows = self.sheets.read(&token, USERS_RANGE).await?;
        if rows
            .iter()
            .any(|row| row.get(1).map(String::as_str) == Some(user.email.as_str()))
        {
            return Err(PortError::DuplicateEmail);
        }
        self.sheets
            .append(&token, USERS_RANGE, &[user.to_row()])
            .await?;
        info!("created user row for {}", user.email);
        Ok(())
    }

    async fn fetch_daily_goals(&self, email: Option<&str>) -> PortResult<Vec<DailyGoal>> {
        let token = self.auth.mint_token().await?;
        let rows = self.sheets.read(&token, DAILY_GOALS_RANGE).await?;
        // Row indices are assigned against the full range BEFORE filtering,
        // so updates keyed on them address the correct absolute row.
        let mut goals: Vec<DailyGoal> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| DailyGoal::from_row(i + 1, row))
            .collect();
        if let Some(email) = email {
            goals.retain(|g| g.email == email);
        }
        Ok(goals)
    }

    async fn add_daily_goal(&self, goal: &DailyGoal) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        self.sheets
            .append(&token, DAILY_GOALS_RANGE, &[goal.to_row()])
            .await
    }

    async fn update_daily_goal(&self, row_index: usize, goal: &DailyGoal) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        let range = Self::row_span("DailyGoals", row_index);
        self.sheets.update(&token, &range, &[goal.to_row()]).await
    }

    async fn fetch_weekly_goals(&self, email: Option<&str>) -> PortResult<Vec<WeeklyGoal>> {
        let token = self.auth.mint_token().await?;
        let rows = self.sheets.read(&token, WEEKLY_GOALS_RANGE).await?;
        let mut goals: Vec<WeeklyGoal> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| WeeklyGoal::from_row(i + 1, row))
            .collect();
        if let Some(email) = email {
            goals.retain(|g| g.email == email);
        }
        Ok(goals)
    }

    async fn add_weekly_goal(&self, goal: &WeeklyGoal) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        self.sheets
            .append(&token, WEEKLY_GOALS_RANGE, &[goal.to_row()])
            .await
    }

    async fn update_weekly_goal(&self, row_index: usize, goal: &WeeklyGoal) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        let range = Self::row_span("WeeklyGoals", row_index);
        self.sheets.update(&token, &range, &[goal.to_row()]).await
    }

    async fn fetch_reports(&self, email: Option<&str>) -> PortResult<Vec<WeeklyReport>> {
        let token = self.auth.mint_token().await?;
        let rows = self.sheets.read(&token, REPORTS_RANGE).await?;
        let mut reports: Vec<WeeklyReport> =
            rows.iter().map(|row| WeeklyReport::from_row(row)).collect();
        if let Some(email) = email {
            reports.retain(|r| r.email == email);
        }
        Ok(reports)
    }

    async fn append_report(&self, report: &WeeklyReport) -> PortResult<()> {
        let token = self.auth.mint_token().await?;
        self.sheets
            .append(&token, REPORTS_RANGE, &[report.to_row()])
            .await
    }
}
