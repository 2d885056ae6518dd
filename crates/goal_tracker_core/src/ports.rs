//! crates/goal_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete sheet store and AI gateway.

use async_trait::async_trait;

use crate::domain::{DailyGoal, User, WeeklyGoal, WeeklyReport};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The variants carry the caller-facing messages directly; nothing in the
/// port layer is retried, every failure is surfaced immediately.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The service-account credential could not be exchanged for a token.
    #[error("Failed to get access token: {0}")]
    Credential(String),

    /// The backing store rejected the bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Signup attempted with an email that already has a row.
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// The AI gateway returned 429.
    #[error("Rate limit exceeded, please try again later.")]
    RateLimited,

    /// The AI gateway returned 402.
    #[error("AI credits exhausted. Please add funds.")]
    QuotaExhausted,

    /// Any other non-success from an upstream service.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Access to the four sheet-backed collections.
///
/// `fetch_*` methods assign each record its 1-based position in the full
/// unfiltered range BEFORE applying the optional email filter, so that a
/// later `update_*` with that index still addresses the correct absolute
/// row. Nothing is ever deleted.
#[async_trait]
pub trait GoalStoreService: Send + Sync {
    // --- Users ---
    async fn fetch_users(&self) -> PortResult<Vec<User>>;

    /// Appends a user row after a linear duplicate-email scan.
    /// Fails with `PortError::DuplicateEmail` without appending anything.
    async fn create_user(&self, user: &User) -> PortResult<()>;

    // --- Daily goals ---
    async fn fetch_daily_goals(&self, email: Option<&str>) -> PortResult<Vec<DailyGoal>>;
    async fn add_daily_goal(&self, goal: &DailyGoal) -> PortResult<()>;
    async fn update_daily_goal(&self, row_index: usize, goal: &DailyGoal) -> PortResult<()>;

    // --- Weekly goals ---
    async fn fetch_weekly_goals(&self, email: Option<&str>) -> PortResult<Vec<WeeklyGoal>>;
    async fn add_weekly_goal(&self, goal: &WeeklyGoal) -> PortResult<()>;
    async fn update_weekly_goal(&self, row_index: usize, goal: &WeeklyGoal) -> PortResult<()>;

    // --- Weekly reports (append-only) ---
    async fn fetch_reports(&self, email: Option<&str>) -> PortResult<Vec<WeeklyReport>>;
    async fn append_report(&self, report: &WeeklyReport) -> PortResult<()>;
}

/// The chat-completion gateway that writes the report feedback text.
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Sends the prompt under a fixed system instruction and returns the
    /// model's feedback as opaque text.
    async fn generate_feedback(&self, system_instruction: &str, prompt: &str)
        -> PortResult<String>;
}
