//! crates/goal_tracker_core/src/report.rs
//!
//! Pure aggregation logic for the weekly report: the trailing 7-day window,
//! completion statistics, the week label, and the coach prompt.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::domain::{DailyGoal, GoalStatus};

/// System instruction sent with every report prompt.
pub const COACH_SYSTEM_INSTRUCTION: &str =
    "You are a supportive educational coach that provides constructive feedback on student goal progress.";

const ONE_WEEK_MS: i64 = 604_800_000;

/// Week label for a given instant, e.g. `2025-W07`.
///
/// This reproduces the store's historical formula,
/// `ceil(ms_since_jan1 / one_week_ms + 1)`, which is an approximation of
/// ISO week numbering and is wrong at year boundaries. Existing rows were
/// written with it, so it is kept as-is.
pub fn week_label(now: DateTime<Utc>) -> String {
    let jan1 = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now);
    let diff_ms = (now - jan1).num_milliseconds();
    // ceil((diff / week) + 1) in integer arithmetic.
    let week_num = (diff_ms + 2 * ONE_WEEK_MS - 1) / ONE_WEEK_MS;
    format!("{}-W{:02}", now.year(), week_num)
}

/// Inclusive start of the report window.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(7)
}

/// Whether a goal's date cell falls inside the window.
///
/// There is deliberately no upper bound, matching the original behavior:
/// future-dated rows are included. Unparseable dates are excluded.
pub fn in_window(date_cell: &str, window_start: DateTime<Utc>) -> bool {
    parse_goal_date(date_cell)
        .map(|date| date >= window_start)
        .unwrap_or(false)
}

/// Parses a date cell as RFC 3339, falling back to a bare `YYYY-MM-DD`.
pub fn parse_goal_date(cell: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(cell) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// Rounded percentage of completed goals; 0 when there are no goals at all.
pub fn completion_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Number of goals in `Completed` state.
pub fn completed_count(goals: &[DailyGoal]) -> usize {
    goals
        .iter()
        .filter(|g| g.status == GoalStatus::Completed)
        .count()
}

/// The non-empty challenge cells of the windowed goals, joined with `"; "`.
pub fn main_challenges(goals: &[DailyGoal]) -> String {
    goals
        .iter()
        .map(|g| g.challenges.as_str())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builds the natural-language prompt for the feedback model.
pub fn build_prompt(
    username: &str,
    goals: &[DailyGoal],
    total: usize,
    completed: usize,
    percent: u32,
) -> String {
    let details = goals
        .iter()
        .map(|g| {
            format!(
                "- Goal: \"{}\" | Status: {} | Went Well: \"{}\" | Challenges: \"{}\"",
                g.daily_goal,
                g.status.as_str(),
                g.went_well,
                g.challenges
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an educational coach analyzing a student's weekly goal progress. Here is the data:\n\n\
         Student: {username}\n\
         Total goals this week: {total}\n\
         Completed goals: {completed}\n\
         Completion rate: {percent}%\n\
         Goals details:\n\
         {details}\n\n\
         Please provide a personalized weekly report with:\n\
         1. A brief summary of their progress\n\
         2. Analysis of what went well\n\
         3. Analysis of challenges and how to overcome them\n\
         4. Specific, actionable improvement suggestions\n\
         5. Encouraging closing remarks\n\n\
         Keep it concise, warm, and actionable (max 300 words)."
    )
}
