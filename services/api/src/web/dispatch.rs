//! services/api/src/web/dispatch.rs
//!
//! Action dispatch for the JSON endpoints. Each endpoint's actions are a
//! serde-tagged enum so the match over them is exhaustive at compile time;
//! a body whose `action` matches no variant becomes a 400.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parses an action-dispatched request body into the endpoint's enum.
///
/// An unknown or missing `action` maps to `ApiError::InvalidAction`; any
/// other shape problem (missing field, wrong type) is a plain bad request
/// carrying serde's message.
pub fn parse_action<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| {
        let msg = e.to_string();
        if msg.contains("unknown variant") || msg.contains("missing field `action`") {
            ApiError::InvalidAction
        } else {
            ApiError::BadRequest(msg)
        }
    })
}
