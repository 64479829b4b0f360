//! Shared utilities for route tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use storefront::config::schema::SecurityConfig;
use storefront::db::{DbError, DbResult, ProcedureCall, ProcedureClient, RecordSet};
use storefront::http::{build_router, AppState};
use storefront::views::Views;

/// Column name SQL Server gives a `FOR JSON` result.
pub const JSON_COLUMN: &str = "JSON_F52E2B61-18A1-11d1-B105-00805F49916B";

enum Scripted {
    Rows(RecordSet),
    Fail(String),
}

/// In-memory [`ProcedureClient`]: answers from a script keyed by procedure
/// name and records every call it receives. Unscripted procedures return an
/// empty result set.
pub struct FakeProcedures {
    connected: bool,
    script: Mutex<HashMap<&'static str, Scripted>>,
    calls: Mutex<Vec<ProcedureCall>>,
}

impl FakeProcedures {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::with_connection(true))
    }

    pub fn disconnected() -> Arc<Self> {
        Arc::new(Self::with_connection(false))
    }

    fn with_connection(connected: bool) -> Self {
        Self {
            connected,
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `procedure` with table rows.
    pub fn rows(&self, procedure: &'static str, rows: Vec<Value>) {
        self.script
            .lock()
            .unwrap()
            .insert(procedure, Scripted::Rows(RecordSet::from_values(rows)));
    }

    /// Answer `procedure` with a single `FOR JSON` document.
    pub fn document(&self, procedure: &'static str, json: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(procedure, Scripted::Rows(RecordSet::scalar(JSON_COLUMN, json)));
    }

    /// Make `procedure` raise `message`.
    pub fn fail(&self, procedure: &'static str, message: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(procedure, Scripted::Fail(message.to_string()));
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single call made to `procedure`.
    pub fn only_call(&self, procedure: &str) -> ProcedureCall {
        let calls: Vec<_> = self
            .calls()
            .into_iter()
            .filter(|c| c.name() == procedure)
            .collect();
        assert_eq!(calls.len(), 1, "expected one call to {}", procedure);
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl ProcedureClient for FakeProcedures {
    async fn execute(&self, call: &ProcedureCall) -> DbResult<RecordSet> {
        if !self.connected {
            return Err(DbError::NotConnected);
        }
        self.calls.lock().unwrap().push(call.clone());

        match self.script.lock().unwrap().get(call.name()) {
            Some(Scripted::Rows(set)) => Ok(set.clone()),
            Some(Scripted::Fail(message)) => Err(DbError::Procedure(message.clone())),
            None => Ok(RecordSet::default()),
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Router wired to `db`, with default limits.
pub fn app(db: Arc<FakeProcedures>) -> Router {
    let views = Arc::new(Views::new().unwrap());
    build_router(&SecurityConfig::default(), AppState::new(db, views))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response<Body>) -> &str {
    res.headers()[header::LOCATION].to_str().unwrap()
}
