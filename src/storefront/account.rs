//! Login, registration and profile updates.
//!
//! Login and registration failures re-render the login page with the message
//! in an alert; profile update failures use an alert panel.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use serde_json::Value;

use crate::db::DbError;
use crate::gateway::documents::{registered_user_id, LoginProfile};
use crate::gateway::procedures::{self, ProfileUpdate, Registration};
use crate::gateway::{GatewayError, GatewayResult, Params};
use crate::http::response::{html, page, panel_failure, text_failure};
use crate::http::{AppState, BodyParams};
use crate::observability::metrics;

/// Shown in place of the id when the registration message carries none.
const UNKNOWN_USER_ID: &str = "REGISTERED";

/// `GET /login`
pub async fn login_page(State(state): State<AppState>) -> Response {
    page(&state.views, "login", "login.html", context! { title => "Login" })
}

/// `POST /register`
pub async fn register(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match render_registered(&state, &params).await {
        Ok(body) => html("register", body),
        Err(e) => login_failure(&state, "register", e),
    }
}

async fn render_registered(state: &AppState, params: &Params) -> GatewayResult<String> {
    let call = procedures::register_user(Registration {
        email: params.text("email"),
        password: params.text("password"),
        name: params.text("name"),
        phone: params.text("phone"),
    });
    let set = state.call(&call).await?;
    let message = set.first_text().ok_or(DbError::EmptyResult)?;

    let user_id = registered_user_id(message)
        .map(Value::from)
        .unwrap_or_else(|| Value::from(UNKNOWN_USER_ID));
    tracing::info!(user_id = %user_id, "Account registered");

    Ok(state.views.render(
        "login.html",
        context! {
            title => "Login",
            user_id => user_id,
            success => "Registered Successfully! Copy your ID down below.",
        },
    )?)
}

/// `POST /login`
pub async fn login(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match render_logged_in(&state, &params).await {
        Ok(body) => html("login", body),
        Err(e) => login_failure(&state, "login", e),
    }
}

async fn render_logged_in(state: &AppState, params: &Params) -> GatewayResult<String> {
    let call = procedures::login_user(params.text("email"), params.text("password"));
    let profile: LoginProfile = state.call(&call).await?.decode_document()?;

    Ok(state.views.render(
        "login.html",
        context! {
            title => "Login Success",
            user_id => profile.user_id,
            user_name => profile.name,
            user_email => profile.email,
            user_role => profile.role,
            user_avatar => profile.avatar,
            success => "Logged In!",
        },
    )?)
}

fn login_failure(state: &AppState, route: &'static str, err: GatewayError) -> Response {
    let message = err.to_string();
    tracing::warn!(route, error = %message, "Request failed");
    metrics::record_request(route, "failure");

    match state.views.render(
        "login.html",
        context! { title => "Login", error => &message },
    ) {
        Ok(body) => Html(body).into_response(),
        Err(e) => text_failure(&state.views, route, "Error: ", &e, None),
    }
}

/// `POST /profile/update`
pub async fn update_profile(
    State(state): State<AppState>,
    BodyParams(params): BodyParams,
) -> Response {
    match render_profile_updated(&state, &params).await {
        Ok(body) => html("profile.update", body),
        Err(e) => panel_failure(
            &state.views,
            "profile.update",
            "Update Failed",
            &e.to_string(),
            Some("danger"),
        ),
    }
}

async fn render_profile_updated(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let call = procedures::update_profile(ProfileUpdate {
        user_id,
        name: params.optional_text("name"),
        phone: params.optional_text("phone"),
        password: params.optional_text("password"),
        avatar: params.optional_text("avatar"),
    });
    state.call(&call).await?;

    Ok(state.views.render(
        "profile_updated.html",
        context! { title => "Profile Updated", user_id => user_id },
    )?)
}
