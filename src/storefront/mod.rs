//! Customer-facing routes.
//!
//! # Data Flow
//! ```text
//! Query / BodyParams
//!     → gateway::procedures (one call per route, two for none)
//!     → AppState::call
//!     → page, redirect, or the route's failure flavor (http::response)
//! ```
//!
//! Every handler is a thin wrapper over an inner `async fn` returning
//! [`GatewayResult`](crate::gateway::GatewayResult); the wrapper decides how
//! a failure looks for that route.

pub mod account;
pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod orders;
pub mod vouchers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::gateway::{BindError, Params};
use crate::http::response::with_user;
use crate::http::AppState;

/// Storefront routes, state applied by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::dashboard))
        .route("/products", get(catalog::products))
        .route("/product/{id}", get(catalog::product_detail))
        .route("/login", get(account::login_page).post(account::login))
        .route("/register", post(account::register))
        .route("/profile/update", post(account::update_profile))
        .route("/cart", get(cart::view))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
        .route("/addresses", get(addresses::list))
        .route("/addresses/add", post(addresses::add))
        .route("/addresses/delete", post(addresses::delete))
        .route("/addresses/edit/{id}", get(addresses::edit))
        .route("/addresses/update", post(addresses::update))
        .route("/vouchers", get(vouchers::list))
        .route("/vouchers/collect", post(vouchers::collect))
        .route("/orders", get(orders::list))
        .route("/orders/cancel", post(orders::cancel))
}

/// Bind a path segment as an integer id, with the same rules as form fields.
pub(crate) fn path_id(name: &str, raw: &str) -> Result<Option<i32>, BindError> {
    Params::new().with(name, raw).int(name)
}

/// Link back to a per-user view after a failure. Falls back to the bare path
/// when the submitted `user_id` did not bind.
pub(crate) fn user_link(path: &str, params: &Params) -> String {
    with_user(path, params.int("user_id").ok().flatten())
}
