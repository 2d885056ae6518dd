//! services/api/src/web/auth.rs
//!
//! The authentication endpoint: signup and login, action-dispatched.
//!
//! Passwords are stored as a keyed SHA-256 digest with a fixed salt
//! constant. That is NOT a slow hash and is acceptable only because the
//! backing sheet is not a general credential vault; the scheme is kept for
//! compatibility with existing rows.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::dispatch::parse_action;
use crate::web::state::AppState;
use goal_tracker_core::domain::{Role, User};

const PASSWORD_SALT: &str = "goal_tracker_salt_2024";

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// The auth endpoint's action-dispatched request body.
#[derive(Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthAction {
    Signup {
        username: String,
        email: String,
        password: String,
        role: Role,
    },
    Login {
        email: String,
        password: String,
    },
}

/// The user fields safe to echo back to the browser.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
}

//=========================================================================================
// Password Digest
//=========================================================================================

/// Keyed SHA-256 digest of password + fixed salt, hex-encoded.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(PASSWORD_SALT.as_bytes());
    hex::encode(hasher.finalize())
}

//=========================================================================================
// Handler
//=========================================================================================

/// POST /auth - signup or login, selected by the `action` field.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = AuthAction,
    responses(
        (status = 200, description = "Signup or login succeeded", body = AuthResponse),
        (status = 400, description = "Invalid action or duplicate email"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn auth_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    match parse_action::<AuthAction>(body)? {
        AuthAction::Signup {
            username,
            email,
            password,
            role,
        } => {
            let user = User {
                username,
                email,
                password_digest: hash_password(&password),
                role,
            };
            // Duplicate-email scan happens in the store; nothing is
            // appended when it fails.
            state.store.create_user(&user).await?;
            info!("signup succeeded for {}", user.email);
            Ok(Json(AuthResponse {
                success: true,
                user: PublicUser {
                    username: user.username,
                    email: user.email,
                    role: user.role,
                },
            }))
        }
        AuthAction::Login { email, password } => {
            let digest = hash_password(&password);
            let users = state.store.fetch_users().await?;
            let user = users
                .into_iter()
                .find(|u| u.email == email && u.password_digest == digest)
                .ok_or(ApiError::InvalidCredentials)?;
            info!("login succeeded for {}", user.email);
            Ok(Json(AuthResponse {
                success: true,
                user: PublicUser {
                    username: user.username,
                    email: user.email,
                    role: user.role,
                },
            }))
        }
    }
}
