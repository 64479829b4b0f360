//! Back-office routes.
//!
//! # Data Flow
//! ```text
//! /admin/products → products.rs (list, edit, create, update, delete)
//! /admin/orders   → orders.rs (status filter, status change)
//! /admin/reports  → reports.rs (revenue by day, best sellers)
//! ```
//!
//! No authentication: anyone who can reach the listener can use these.

pub mod orders;
pub mod products;
pub mod reports;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::AppState;

/// Admin routes, state applied by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(products::list))
        .route("/admin/products/edit/{id}", get(products::edit))
        .route("/admin/products/update", post(products::update))
        .route("/admin/products/create", post(products::create))
        .route("/admin/products/delete", post(products::delete))
        .route("/admin/orders", get(orders::list))
        .route("/admin/orders/update", post(orders::update))
        .route("/admin/reports", get(reports::reports))
}
