//! services/api/src/web/goals.rs
//!
//! The daily-goals and weekly-goals endpoints: fetch, add, and update,
//! action-dispatched. Records are never deleted; there is no delete action.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::dispatch::parse_action;
use crate::web::state::AppState;
use goal_tracker_core::domain::{DailyGoal, GoalStatus, WeeklyGoal};
use goal_tracker_core::report::week_label;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// The daily-goals endpoint's action-dispatched request body.
#[derive(Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DailyGoalAction {
    #[serde(rename_all = "camelCase")]
    Fetch { email: Option<String> },
    #[serde(rename_all = "camelCase")]
    Add {
        username: String,
        email: String,
        daily_goal: String,
        #[serde(default)]
        reflection: String,
        #[serde(default)]
        went_well: String,
        #[serde(default)]
        challenges: String,
        #[serde(default)]
        left: String,
        /// Defaults to the creation instant when omitted.
        date: Option<String>,
        status: Option<GoalStatus>,
    },
    #[serde(rename_all = "camelCase")]
    Update {
        row_index: usize,
        username: String,
        email: String,
        daily_goal: String,
        #[serde(default)]
        reflection: String,
        #[serde(default)]
        went_well: String,
        #[serde(default)]
        challenges: String,
        #[serde(default)]
        left: String,
        date: String,
        status: Option<GoalStatus>,
    },
}

/// The weekly-goals endpoint's request body: same shape with a week label
/// in place of the date.
#[derive(Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum WeeklyGoalAction {
    #[serde(rename_all = "camelCase")]
    Fetch { email: Option<String> },
    #[serde(rename_all = "camelCase")]
    Add {
        username: String,
        email: String,
        weekly_goal: String,
        #[serde(default)]
        reflection: String,
        #[serde(default)]
        went_well: String,
        #[serde(default)]
        challenges: String,
        #[serde(default)]
        left: String,
        /// Defaults to the current week label when omitted.
        week: Option<String>,
        status: Option<GoalStatus>,
    },
    #[serde(rename_all = "camelCase")]
    Update {
        row_index: usize,
        username: String,
        email: String,
        weekly_goal: String,
        #[serde(default)]
        reflection: String,
        #[serde(default)]
        went_well: String,
        #[serde(default)]
        challenges: String,
        #[serde(default)]
        left: String,
        week: String,
        status: Option<GoalStatus>,
    },
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyGoalsResponse {
    pub goals: Vec<DailyGoal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyGoalsResponse {
    pub goals: Vec<WeeklyGoal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /daily-goals - fetch, add, or update daily goals.
#[utoipa::path(
    post,
    path = "/daily-goals",
    request_body = DailyGoalAction,
    responses(
        (status = 200, description = "Goals fetched or mutation applied", body = DailyGoalsResponse),
        (status = 400, description = "Invalid action"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn daily_goals_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    match parse_action::<DailyGoalAction>(body)? {
        DailyGoalAction::Fetch { email } => {
            let goals = state.store.fetch_daily_goals(email.as_deref()).await?;
            Ok(Json(DailyGoalsResponse { goals }).into_response())
        }
        DailyGoalAction::Add {
            username,
            email,
            daily_goal,
            reflection,
            went_well,
            challenges,
            left,
            date,
            status,
        } => {
            let goal = DailyGoal {
                row_index: 0,
                username,
                email,
                daily_goal,
                reflection,
                went_well,
                challenges,
                left,
                date: date.unwrap_or_else(|| Utc::now().to_rfc3339()),
                status: status.unwrap_or_default(),
            };
            state.store.add_daily_goal(&goal).await?;
            Ok(Json(SuccessResponse::ok()).into_response())
        }
        DailyGoalAction::Update {
            row_index,
            username,
            email,
            daily_goal,
            reflection,
            went_well,
            challenges,
            left,
            date,
            status,
        } => {
            let goal = DailyGoal {
                row_index,
                username,
                email,
                daily_goal,
                reflection,
                went_well,
                challenges,
                left,
                date,
                status: status.unwrap_or_default(),
            };
            state.store.update_daily_goal(row_index, &goal).await?;
            Ok(Json(SuccessResponse::ok()).into_response())
        }
    }
}

/// POST /weekly-goals - fetch, add, or update weekly goals.
#[utoipa::path(
    post,
    path = "/weekly-goals",
    request_body = WeeklyGoalAction,
    responses(
        (status = 200, description = "Goals fetched or mutation applied", body = WeeklyGoalsResponse),
        (status = 400, description = "Invalid action"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn weekly_goals_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    match parse_action::<WeeklyGoalAction>(body)? {
        WeeklyGoalAction::Fetch { email } => {
            let goals = state.store.fetch_weekly_goals(email.as_deref()).await?;
            Ok(Json(WeeklyGoalsResponse { goals }).into_response())
        }
        WeeklyGoalAction::Add {
            username,
            email,
            weekly_goal,
            reflection,
            went_well,
            challenges,
            left,
            week,
            status,
        } => {
            let goal = WeeklyGoal {
                row_index: 0,
                username,
                email,
                weekly_goal,
                reflection,
                went_well,
                challenges,
                left,
                week: week.unwrap_or_else(|| week_label(Utc::now())),
                status: status.unwrap_or_default(),
            };
            state.store.add_weekly_goal(&goal).await?;
            Ok(Json(SuccessResponse::ok()).into_response())
        }
        WeeklyGoalAction::Update {
            row_index,
            username,
            email,
            weekly_goal,
            reflection,
            went_well,
            challenges,
            left,
            week,
            status,
        } => {
            let goal = WeeklyGoal {
                row_index,
                username,
                email,
                weekly_goal,
                reflection,
                went_well,
                challenges,
                left,
                week,
                status: status.unwrap_or_default(),
            };
            state.store.update_weekly_goal(row_index, &goal).await?;
            Ok(Json(SuccessResponse::ok()).into_response())
        }
    }
}
