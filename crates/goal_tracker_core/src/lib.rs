pub mod domain;
pub mod ports;
pub mod report;
pub mod rows;

pub use domain::{DailyGoal, GoalStatus, Role, User, WeeklyGoal, WeeklyReport};
pub use ports::{FeedbackService, GoalStoreService, PortError, PortResult};
