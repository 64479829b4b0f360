//! Response construction.
//!
//! # Responsibilities
//! - Render views into HTML responses
//! - Build post-mutation redirects that carry the user id forward
//! - Render failures the way each route shows them
//!
//! # Design Decisions
//! - Every failure is answered with 200 OK and the message in the body. Only
//!   a template that cannot render at all produces a 500.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use serde::Serialize;

use crate::observability::metrics;
use crate::views::Views;

/// Render a template as a full page.
pub fn page<S: Serialize>(views: &Views, route: &'static str, template: &str, ctx: S) -> Response {
    match views.render(template, ctx) {
        Ok(html) => {
            metrics::record_request(route, "page");
            Html(html).into_response()
        }
        Err(e) => {
            tracing::error!(route, template, error = %e, "View rendering failed");
            text_failure(views, route, "Error: ", &e, None)
        }
    }
}

/// Wrap an already rendered page.
pub fn html(route: &'static str, body: String) -> Response {
    metrics::record_request(route, "page");
    Html(body).into_response()
}

/// `path?user_id=<id>` when an id was bound, else `path`.
pub fn with_user(path: &str, user_id: Option<i32>) -> String {
    match user_id {
        Some(id) => format!("{}?user_id={}", path, id),
        None => path.to_string(),
    }
}

/// 303 See Other to the follow-up view.
pub fn redirect(route: &'static str, location: &str) -> Response {
    metrics::record_request(route, "redirect");
    Redirect::to(location).into_response()
}

/// A link shown under a failure message.
#[derive(Debug, Clone, Copy)]
pub struct BackLink<'a> {
    pub href: &'a str,
    pub label: &'a str,
}

impl<'a> BackLink<'a> {
    pub fn new(href: &'a str, label: &'a str) -> Self {
        Self { href, label }
    }
}

/// Bare failure text: `<prefix><message>`, optionally followed by a link.
pub fn text_failure(
    views: &Views,
    route: &'static str,
    prefix: &str,
    err: &dyn std::fmt::Display,
    back: Option<BackLink<'_>>,
) -> Response {
    metrics::record_request(route, "failure");
    let message = err.to_string();
    tracing::warn!(route, error = %message, "Request failed");

    let rendered = views.render(
        "failure.html",
        context! {
            prefix => prefix,
            message => message,
            back_href => back.map(|b| b.href),
            back_label => back.map(|b| b.label),
        },
    );
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_breakdown(&e),
    }
}

/// Failure shown inside the site layout. `alert` selects a Bootstrap alert
/// style; without one the message is shown as plain text.
pub fn panel_failure(
    views: &Views,
    route: &'static str,
    title: &str,
    message: &str,
    alert: Option<&str>,
) -> Response {
    metrics::record_request(route, "failure");
    tracing::warn!(route, error = %message, "Request failed");

    match views.render(
        "panel.html",
        context! { title => title, message => message, alert => alert },
    ) {
        Ok(html) => Html(html).into_response(),
        Err(e) => render_breakdown(&e),
    }
}

fn render_breakdown(e: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %e, "Failure view could not be rendered");
    (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
}
