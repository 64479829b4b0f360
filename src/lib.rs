//! Storefront procedure gateway.
//!
//! A server-rendered shop front whose every route maps onto one (or two)
//! SQL Server stored procedures. All business rules live in the database;
//! this crate binds request fields, invokes procedures and renders results.

pub mod admin;
pub mod config;
pub mod db;
pub mod gateway;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storefront;
pub mod views;

pub use config::StorefrontConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
