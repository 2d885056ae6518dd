pub mod feedback_llm;
pub mod google_auth;
pub mod sheets;
pub mod store;

pub use feedback_llm::GatewayFeedbackAdapter;
pub use google_auth::ServiceAccountAuth;
pub use sheets::SheetsClient;
pub use store::SheetStoreAdapter;
