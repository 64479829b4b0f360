//! Dashboard.

use axum::{extract::State, response::Response};
use minijinja::context;

use crate::http::response::page;
use crate::http::AppState;

/// `GET /`: landing page with the database status badge.
pub async fn dashboard(State(state): State<AppState>) -> Response {
    page(
        &state.views,
        "home",
        "home.html",
        context! {
            title => "E-Commerce Lab",
            connected => state.db.is_connected(),
        },
    )
}
