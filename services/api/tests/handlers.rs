//! services/api/tests/handlers.rs
//!
//! Endpoint-level tests driving the handlers directly against in-memory
//! implementations of the store and feedback ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::Level;

use api_lib::config::{Config, ServiceAccountSource};
use api_lib::error::ApiError;
use api_lib::web::state::AppState;
use api_lib::web::{
    auth_handler, daily_goals_handler, fetch_reports_handler, generate_report_handler,
};
use goal_tracker_core::domain::{DailyGoal, GoalStatus, User, WeeklyGoal, WeeklyReport};
use goal_tracker_core::ports::{FeedbackService, GoalStoreService, PortError, PortResult};

//=========================================================================================
// In-memory Port Implementations
//=========================================================================================

#[derive(Default)]
struct MemoryStore {
    users: Mutex<Vec<User>>,
    daily: Mutex<Vec<DailyGoal>>,
    weekly: Mutex<Vec<WeeklyGoal>>,
    reports: Mutex<Vec<WeeklyReport>>,
}

#[async_trait]
impl GoalStoreService for MemoryStore {
    async fn fetch_users(&self) -> PortResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, user: &User) -> PortResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(PortError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn fetch_daily_goals(&self, email: Option<&str>) -> PortResult<Vec<DailyGoal>> {
        // Index against the full range, then filter, like the sheet adapter.
        let goals = self.daily.lock().unwrap();
        let mut out: Vec<DailyGoal> = goals
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mut g = g.clone();
                g.row_index = i + 1;
                g
            })
            .collect();
        if let Some(email) = email {
            out.retain(|g| g.email == email);
        }
        Ok(out)
    }

    async fn add_daily_goal(&self, goal: &DailyGoal) -> PortResult<()> {
        self.daily.lock().unwrap().push(goal.clone());
        Ok(())
    }

    async fn update_daily_goal(&self, row_index: usize, goal: &DailyGoal) -> PortResult<()> {
        let mut goals = self.daily.lock().unwrap();
        let slot = goals
            .get_mut(row_index - 1)
            .ok_or_else(|| PortError::Unexpected(format!("no row {row_index}")))?;
        *slot = goal.clone();
        Ok(())
    }

    async fn fetch_weekly_goals(&self, email: Option<&str>) -> PortResult<Vec<WeeklyGoal>> {
        let goals = self.weekly.lock().unwrap();
        let mut out: Vec<WeeklyGoal> = goals
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mut g = g.clone();
                g.row_index = i + 1;
                g
            })
            .collect();
        if let Some(email) = email {
            out.retain(|g| g.email == email);
        }
        Ok(out)
    }

    async fn add_weekly_goal(&self, goal: &WeeklyGoal) -> PortResult<()> {
        self.weekly.lock().unwrap().push(goal.clone());
        Ok(())
    }

    async fn update_weekly_goal(&self, row_index: usize, goal: &WeeklyGoal) -> PortResult<()> {
        let mut goals = self.weekly.lock().unwrap();
        let slot = goals
            .get_mut(row_index - 1)
            .ok_or_else(|| PortError::Unexpected(format!("no row {row_index}")))?;
        *slot = goal.clone();
        Ok(())
    }

    async fn fetch_reports(&self, email: Option<&str>) -> PortResult<Vec<WeeklyReport>> {
        let reports = self.reports.lock().unwrap();
        let mut out: Vec<WeeklyReport> = reports.clone();
        if let Some(email) = email {
            out.retain(|r| r.email == email);
        }
        Ok(out)
    }

    async fn append_report(&self, report: &WeeklyReport) -> PortResult<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// Feedback stub: either a canned reply or a fixed port error.
struct StubFeedback {
    failure: Option<fn() -> PortError>,
}

impl StubFeedback {
    fn ok() -> Self {
        Self { failure: None }
    }

    fn failing(failure: fn() -> PortError) -> Self {
        Self {
            failure: Some(failure),
        }
    }
}

#[async_trait]
impl FeedbackService for StubFeedback {
    async fn generate_feedback(&self, _system: &str, prompt: &str) -> PortResult<String> {
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        Ok(format!("Keep going! (prompt was {} chars)", prompt.len()))
    }
}

//=========================================================================================
// Harness
//=========================================================================================

fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: Level::INFO,
        service_account: ServiceAccountSource::Inline("{}".to_string()),
        sheet_id: "test-sheet".to_string(),
        ai_gateway_url: "http://localhost/never-called".to_string(),
        ai_api_key: "test-key".to_string(),
        report_model: "test-model".to_string(),
    }
}

fn app_state(store: Arc<MemoryStore>, feedback: StubFeedback) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        feedback: Arc::new(feedback),
        config: Arc::new(test_config()),
    })
}

async fn body_json(response: impl IntoResponse) -> Value {
    let response = response.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn goal(email: &str, text: &str, date: &str, status: GoalStatus) -> DailyGoal {
    DailyGoal {
        row_index: 0,
        username: "amy".to_string(),
        email: email.to_string(),
        daily_goal: text.to_string(),
        reflection: String::new(),
        went_well: String::new(),
        challenges: String::new(),
        left: String::new(),
        date: date.to_string(),
        status,
    }
}

//=========================================================================================
// Auth
//=========================================================================================

#[tokio::test]
async fn signup_then_login_returns_the_same_role() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store, StubFeedback::ok());

    let signup = auth_handler(
        State(state.clone()),
        Json(json!({
            "action": "signup",
            "username": "ms t",
            "email": "t@school.edu",
            "password": "hunter2",
            "role": "teacher",
        })),
    )
    .await
    .unwrap();
    let body = body_json(signup).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["role"], json!("teacher"));

    let login = auth_handler(
        State(state),
        Json(json!({
            "action": "login",
            "email": "t@school.edu",
            "password": "hunter2",
        })),
    )
    .await
    .unwrap();
    let body = body_json(login).await;
    assert_eq!(body["user"]["username"], json!("ms t"));
    assert_eq!(body["user"]["role"], json!("teacher"));
}

#[tokio::test]
async fn duplicate_email_signup_fails_and_appends_no_row() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store.clone(), StubFeedback::ok());

    let signup = |password: &str| {
        json!({
            "action": "signup",
            "username": "amy",
            "email": "amy@school.edu",
            "password": password,
            "role": "student",
        })
    };
    auth_handler(State(state.clone()), Json(signup("one")))
        .await
        .unwrap();
    let err = auth_handler(State(state), Json(signup("two")))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "User with this email already exists");
    assert_eq!(store.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store, StubFeedback::ok());

    auth_handler(
        State(state.clone()),
        Json(json!({
            "action": "signup",
            "username": "amy",
            "email": "amy@school.edu",
            "password": "right",
            "role": "student",
        })),
    )
    .await
    .unwrap();

    let err = auth_handler(
        State(state),
        Json(json!({
            "action": "login",
            "email": "amy@school.edu",
            "password": "wrong",
        })),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.to_string(), "Invalid email or password");
}

//=========================================================================================
// Goals
//=========================================================================================

#[tokio::test]
async fn unknown_action_is_a_bad_request() {
    let state = app_state(Arc::new(MemoryStore::default()), StubFeedback::ok());
    let err = daily_goals_handler(State(state), Json(json!({ "action": "delete", "rowIndex": 1 })))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidAction));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fetch_assigns_row_indices_before_the_email_filter() {
    let store = Arc::new(MemoryStore::default());
    {
        let mut daily = store.daily.lock().unwrap();
        daily.push(goal("amy@x", "a", "2025-02-10", GoalStatus::Pending));
        daily.push(goal("bob@x", "b", "2025-02-10", GoalStatus::Pending));
        daily.push(goal("amy@x", "c", "2025-02-10", GoalStatus::Pending));
    }
    let state = app_state(store, StubFeedback::ok());

    let response = daily_goals_handler(
        State(state),
        Json(json!({ "action": "fetch", "email": "amy@x" })),
    )
    .await
    .unwrap();
    let body = body_json(response).await;

    // The filtered list is shorter, but indices are absolute positions.
    let indices: Vec<u64> = body["goals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["rowIndex"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![1, 3]);
}

#[tokio::test]
async fn update_targets_exactly_the_kth_row() {
    let store = Arc::new(MemoryStore::default());
    {
        let mut daily = store.daily.lock().unwrap();
        daily.push(goal("amy@x", "first", "2025-02-10", GoalStatus::Pending));
        daily.push(goal("amy@x", "second", "2025-02-10", GoalStatus::Pending));
        daily.push(goal("amy@x", "third", "2025-02-10", GoalStatus::Pending));
    }
    let state = app_state(store.clone(), StubFeedback::ok());

    daily_goals_handler(
        State(state),
        Json(json!({
            "action": "update",
            "rowIndex": 2,
            "username": "amy",
            "email": "amy@x",
            "dailyGoal": "second, revised",
            "date": "2025-02-10",
            "status": "Completed",
        })),
    )
    .await
    .unwrap();

    let daily = store.daily.lock().unwrap();
    assert_eq!(daily[0].daily_goal, "first");
    assert_eq!(daily[1].daily_goal, "second, revised");
    assert_eq!(daily[1].status, GoalStatus::Completed);
    assert_eq!(daily[2].daily_goal, "third");
}

#[tokio::test]
async fn concurrent_adds_each_produce_exactly_one_row() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store.clone(), StubFeedback::ok());

    let add = |state: Arc<AppState>, email: &str| {
        let body = json!({
            "action": "add",
            "username": "user",
            "email": email,
            "dailyGoal": format!("goal for {email}"),
        });
        async move { daily_goals_handler(State(state), Json(body)).await }
    };

    let (a, b) = tokio::join!(
        tokio::spawn(add(state.clone(), "amy@x")),
        tokio::spawn(add(state, "bob@x")),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    let daily = store.daily.lock().unwrap();
    assert_eq!(daily.len(), 2);
    assert!(daily.iter().any(|g| g.email == "amy@x"));
    assert!(daily.iter().any(|g| g.email == "bob@x"));
}

#[tokio::test]
async fn added_goal_defaults_date_and_status() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store.clone(), StubFeedback::ok());

    daily_goals_handler(
        State(state),
        Json(json!({
            "action": "add",
            "username": "amy",
            "email": "amy@x",
            "dailyGoal": "read",
        })),
    )
    .await
    .unwrap();

    let daily = store.daily.lock().unwrap();
    assert_eq!(daily[0].status, GoalStatus::Pending);
    // Date defaulted to the creation instant, RFC 3339.
    assert!(chrono::DateTime::parse_from_rfc3339(&daily[0].date).is_ok());
}

//=========================================================================================
// Reports
//=========================================================================================

#[tokio::test]
async fn report_generation_appends_one_row_even_with_zero_goals() {
    let store = Arc::new(MemoryStore::default());
    let state = app_state(store.clone(), StubFeedback::ok());

    let response = generate_report_handler(
        State(state),
        Json(
            serde_json::from_value(json!({ "email": "amy@x", "username": "amy" })).unwrap(),
        ),
    )
    .await
    .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["report"]["completionPercent"], json!(0));
    assert_eq!(body["report"]["mainChallenges"], json!(""));
    assert_eq!(body["report"]["totalGoals"], json!(0));
    assert_eq!(store.reports.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn report_window_counts_only_recent_goals_for_the_user() {
    let store = Arc::new(MemoryStore::default());
    let recent = chrono::Utc::now().to_rfc3339();
    {
        let mut daily = store.daily.lock().unwrap();
        daily.push(goal("amy@x", "done", &recent, GoalStatus::Completed));
        daily.push(goal("amy@x", "open", &recent, GoalStatus::Pending));
        // Outside the window and wrong user: both excluded.
        daily.push(goal("amy@x", "old", "2000-01-01", GoalStatus::Completed));
        daily.push(goal("bob@x", "other", &recent, GoalStatus::Completed));
    }
    let state = app_state(store.clone(), StubFeedback::ok());

    let response = generate_report_handler(
        State(state),
        Json(
            serde_json::from_value(json!({ "email": "amy@x", "username": "amy" })).unwrap(),
        ),
    )
    .await
    .unwrap();
    let body = body_json(response).await;

    assert_eq!(body["report"]["totalGoals"], json!(2));
    assert_eq!(body["report"]["completedGoals"], json!(1));
    assert_eq!(body["report"]["completionPercent"], json!(50));
}

#[tokio::test]
async fn gateway_limits_surface_as_their_statuses_and_persist_nothing() {
    for (failure, status) in [
        (
            (|| PortError::RateLimited) as fn() -> PortError,
            StatusCode::TOO_MANY_REQUESTS,
        ),
        (|| PortError::QuotaExhausted, StatusCode::PAYMENT_REQUIRED),
    ] {
        let store = Arc::new(MemoryStore::default());
        let state = app_state(store.clone(), StubFeedback::failing(failure));

        let err = generate_report_handler(
            State(state),
            Json(
                serde_json::from_value(json!({ "email": "amy@x", "username": "amy" })).unwrap(),
            ),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status_code(), status);
        // The failure happened before persistence; no report row exists.
        assert!(store.reports.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn fetch_reports_filters_by_email() {
    let store = Arc::new(MemoryStore::default());
    {
        let mut reports = store.reports.lock().unwrap();
        for email in ["amy@x", "bob@x", "amy@x"] {
            reports.push(WeeklyReport {
                username: "u".to_string(),
                email: email.to_string(),
                week: "2025-W07".to_string(),
                completion_percent: 50,
                main_challenges: String::new(),
                ai_feedback: "ok".to_string(),
                created_at: "2025-02-10T00:00:00Z".to_string(),
            });
        }
    }
    let state = app_state(store, StubFeedback::ok());

    let response = fetch_reports_handler(
        State(state),
        Json(serde_json::from_value(json!({ "email": "amy@x" })).unwrap()),
    )
    .await
    .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["reports"].as_array().unwrap().len(), 2);
}
