//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification covering all of the
//! JSON endpoints.

use utoipa::OpenApi;

use crate::web::auth::{AuthAction, AuthResponse, PublicUser};
use crate::web::goals::{
    DailyGoalAction, DailyGoalsResponse, SuccessResponse, WeeklyGoalAction, WeeklyGoalsResponse,
};
use crate::web::reports::{
    DashboardResponse, FetchReportsRequest, GenerateReportRequest, GenerateReportResponse,
    ReportPayload, ReportsResponse,
};
use goal_tracker_core::domain::{DailyGoal, GoalStatus, Role, WeeklyGoal, WeeklyReport};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::auth_handler,
        crate::web::goals::daily_goals_handler,
        crate::web::goals::weekly_goals_handler,
        crate::web::reports::generate_report_handler,
        crate::web::reports::fetch_reports_handler,
        crate::web::reports::dashboard_handler,
    ),
    components(
        schemas(
            AuthAction,
            AuthResponse,
            PublicUser,
            DailyGoalAction,
            WeeklyGoalAction,
            DailyGoalsResponse,
            WeeklyGoalsResponse,
            SuccessResponse,
            GenerateReportRequest,
            GenerateReportResponse,
            ReportPayload,
            FetchReportsRequest,
            ReportsResponse,
            DashboardResponse,
            DailyGoal,
            WeeklyGoal,
            WeeklyReport,
            GoalStatus,
            Role,
        )
    ),
    tags(
        (name = "Goal Tracker API", description = "API endpoints for the sheet-backed goal tracker.")
    )
)]
pub struct ApiDoc;
