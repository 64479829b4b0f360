//! Liveness endpoint.
//!
//! `GET /health` always answers 200 while the process is serving; the body
//! reports whether the startup connection to the database succeeded.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::AppState;
use crate::observability::metrics;

/// Database reachability as seen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: DatabaseStatus,
}

impl HealthReport {
    pub fn new(connected: bool) -> Self {
        Self {
            status: "ok",
            database: if connected {
                DatabaseStatus::Connected
            } else {
                DatabaseStatus::Disconnected
            },
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    metrics::record_request("health", "page");
    Json(HealthReport::new(state.db.is_connected()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let value = serde_json::to_value(HealthReport::new(false)).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["database"], "disconnected");

        let value = serde_json::to_value(HealthReport::new(true)).unwrap();
        assert_eq!(value["database"], "connected");
    }
}
