//! services/api/src/adapters/sheets.rs
//!
//! The range client: read, append, and update against named rectangular
//! ranges of the backing spreadsheet, addressed like `Users!A:D`.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use goal_tracker_core::ports::{PortError, PortResult};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Body of a `values/{range}` read. A range with no data comes back with
/// the `values` field absent entirely.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// A thin client over the spreadsheet values API. Every call takes the
/// bearer token explicitly; token lifecycle is the caller's concern.
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    sheet_id: String,
}

impl SheetsClient {
    pub fn new(sheet_id: String) -> Self {
        Self {
            http: Client::new(),
            sheet_id,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!("{SHEETS_API_BASE}/{}/values/{range}{suffix}", self.sheet_id)
    }

    fn check_status(status: StatusCode, body: String) -> PortResult<()> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(PortError::Unauthorized);
        }
        if !status.is_success() {
            return Err(PortError::Unexpected(format!(
                "sheets API error ({status}): {body}"
            )));
        }
        Ok(())
    }

    /// Reads all populated rows of a range, in order. An empty range yields
    /// an empty vec, never an error. Absent cells are empty strings.
    pub async fn read(&self, token: &str, range: &str) -> PortResult<Vec<Vec<String>>> {
        debug!("reading range {range}");
        let response = self
            .http
            .get(self.values_url(range, ""))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Self::check_status(status, body).map(|_| Vec::new());
        }

        let data: ValuesResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(data.values)
    }

    /// Appends rows after the last populated row of the range. The response
    /// body is ignored; only transport or status failures surface.
    pub async fn append(&self, token: &str, range: &str, rows: &[Vec<String>]) -> PortResult<()> {
        debug!("appending {} row(s) to {range}", rows.len());
        let url = self.values_url(range, ":append?valueInputOption=USER_ENTERED");
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body = if status.is_success() {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };
        Self::check_status(status, body)
    }

    /// Overwrites an exact row span, e.g. `DailyGoals!A5:I5`. Used only for
    /// single-row edits.
    pub async fn update(&self, token: &str, range: &str, rows: &[Vec<String>]) -> PortResult<()> {
        debug!("updating range {range}");
        let url = self.values_url(range, "?valueInputOption=USER_ENTERED");
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body = if status.is_success() {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };
        Self::check_status(status, body)
    }
}
