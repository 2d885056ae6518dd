//! services/api/src/web/reports.rs
//!
//! Report generation and listing, plus the teacher dashboard aggregate.
//!
//! Generation is NOT idempotent: every call appends one report row, with no
//! dedup by week. Two calls in the same window produce two overlapping
//! reports.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;
use goal_tracker_core::domain::{DailyGoal, WeeklyGoal, WeeklyReport};
use goal_tracker_core::report::{
    build_prompt, completed_count, completion_percent, in_window, main_challenges, week_label,
    window_start, COACH_SYSTEM_INSTRUCTION,
};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct GenerateReportRequest {
    pub email: String,
    pub username: String,
}

/// The composed report returned to the client. `totalGoals` and
/// `completedGoals` are for immediate display only and are not persisted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub username: String,
    pub email: String,
    pub week: String,
    pub completion_percent: u32,
    pub main_challenges: String,
    pub ai_feedback: String,
    pub total_goals: usize,
    pub completed_goals: usize,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub report: ReportPayload,
}

#[derive(Deserialize, ToSchema)]
pub struct FetchReportsRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportsResponse {
    pub reports: Vec<WeeklyReport>,
}

/// The teacher-facing aggregate: all three collections in one response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub goals: Vec<DailyGoal>,
    pub weekly_goals: Vec<WeeklyGoal>,
    pub reports: Vec<WeeklyReport>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /generate-report - aggregate the last 7 days of a user's daily
/// goals, ask the coach model for feedback, and persist one report row.
#[utoipa::path(
    post,
    path = "/generate-report",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report generated and appended", body = GenerateReportResponse),
        (status = 402, description = "AI credits exhausted"),
        (status = 429, description = "AI gateway rate limit hit"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn generate_report_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let now = Utc::now();
    let start = window_start(now);

    // The window has an inclusive lower bound and, deliberately, no upper
    // bound: future-dated rows are included, matching the stored data.
    let goals: Vec<DailyGoal> = state
        .store
        .fetch_daily_goals(Some(&req.email))
        .await?
        .into_iter()
        .filter(|g| in_window(&g.date, start))
        .collect();

    let total_goals = goals.len();
    let completed_goals = completed_count(&goals);
    let percent = completion_percent(completed_goals, total_goals);
    let challenges = main_challenges(&goals);

    let prompt = build_prompt(&req.username, &goals, total_goals, completed_goals, percent);
    let ai_feedback = state
        .feedback
        .generate_feedback(COACH_SYSTEM_INSTRUCTION, &prompt)
        .await?;

    let report = WeeklyReport {
        username: req.username.clone(),
        email: req.email.clone(),
        week: week_label(now),
        completion_percent: percent,
        main_challenges: challenges,
        ai_feedback,
        created_at: now.to_rfc3339(),
    };
    state.store.append_report(&report).await?;
    info!(
        "generated report for {} ({} goals, {}% complete)",
        report.email, total_goals, percent
    );

    Ok(Json(GenerateReportResponse {
        success: true,
        report: ReportPayload {
            username: report.username,
            email: report.email,
            week: report.week,
            completion_percent: report.completion_percent,
            main_challenges: report.main_challenges,
            ai_feedback: report.ai_feedback,
            total_goals,
            completed_goals,
            created_at: report.created_at,
        },
    }))
}

/// POST /fetch-reports - list reports, optionally filtered by email.
#[utoipa::path(
    post,
    path = "/fetch-reports",
    request_body = FetchReportsRequest,
    responses(
        (status = 200, description = "Reports fetched", body = ReportsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fetch_reports_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchReportsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = state.store.fetch_reports(req.email.as_deref()).await?;
    Ok(Json(ReportsResponse { reports }))
}

/// POST /dashboard - the teacher-facing aggregate view.
///
/// The one deliberately parallel code path of the service: all three
/// fetches are issued concurrently and joined before responding.
#[utoipa::path(
    post,
    path = "/dashboard",
    responses(
        (status = 200, description = "Aggregate view fetched", body = DashboardResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let (goals, weekly_goals, reports) = tokio::try_join!(
        state.store.fetch_daily_goals(None),
        state.store.fetch_weekly_goals(None),
        state.store.fetch_reports(None),
    )?;
    Ok(Json(DashboardResponse {
        goals,
        weekly_goals,
        reports,
    }))
}
