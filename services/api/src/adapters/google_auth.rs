//! services/api/src/adapters/google_auth.rs
//!
//! Service-account credential exchange: an RS256-signed assertion is traded
//! at the provider's token endpoint for a short-lived bearer token.
//!
//! There is deliberately no token cache here. Every store operation mints a
//! fresh token, so the process carries no shared auth state between
//! requests; latency is traded for statelessness.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use goal_tracker_core::ports::{PortError, PortResult};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const TOKEN_LIFETIME_SECS: u64 = 3600;

/// Service account credentials from the JSON key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    /// The service account email (used as issuer in JWT).
    client_email: String,

    /// The private key in PEM format.
    private_key: String,

    /// The token URI (where to exchange the assertion for an access token).
    token_uri: String,
}

/// JWT claims for the OAuth2 JWT-bearer grant.
#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

/// Response from the provider's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges a service-account key for bearer tokens, one per call.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    http: Client,
}

impl ServiceAccountAuth {
    /// Creates an exchanger from the raw key JSON.
    pub fn from_json(json: &str) -> PortResult<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| PortError::Credential(format!("invalid service account key: {e}")))?;
        Ok(Self {
            key,
            http: Client::new(),
        })
    }

    /// Creates an exchanger from a key file on disk.
    pub fn from_file(path: &str) -> PortResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PortError::Credential(format!("cannot read service account key {path}: {e}"))
        })?;
        Self::from_json(&content)
    }

    /// Mints a fresh access token, valid for one hour.
    ///
    /// Fails with `PortError::Credential` when the provider does not return
    /// a token (malformed key, revoked account, clock skew). No retry.
    pub async fn mint_token(&self) -> PortResult<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PortError::Credential(e.to_string()))?
            .as_secs();

        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        let header = Header::new(Algorithm::RS256);
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| PortError::Credential(format!("invalid private key: {e}")))?;
        let assertion = encode(&header, &claims, &signing_key)
            .map_err(|e| PortError::Credential(format!("failed to sign assertion: {e}")))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Credential(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PortError::Credential(format!(
                "token exchange failed ({status}): {text}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PortError::Credential(e.to_string()))?;

        token
            .access_token
            .ok_or_else(|| PortError::Credential("provider returned no access token".to_string()))
    }
}
