//! Voucher wallet.

use axum::{
    extract::{Query, State},
    response::Response,
};
use minijinja::context;

use crate::gateway::procedures;
use crate::gateway::{GatewayResult, Params};
use crate::http::response::{html, panel_failure, redirect, text_failure, with_user, BackLink};
use crate::http::{AppState, BodyParams};
use crate::storefront::user_link;

/// `GET /vouchers`
pub async fn list(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_vouchers(&state, &params).await {
        Ok(body) => html("vouchers", body),
        Err(e) => panel_failure(
            &state.views,
            "vouchers",
            "My Vouchers",
            &format!("Error: {}", e),
            None,
        ),
    }
}

async fn render_vouchers(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let vouchers = match user_id {
        Some(id) => state.call(&procedures::view_my_vouchers(id)).await?.into_rows(),
        None => Vec::new(),
    };

    Ok(state.views.render(
        "vouchers.html",
        context! { title => "My Vouchers", user_id => user_id, vouchers => vouchers },
    )?)
}

/// `POST /vouchers/collect`
pub async fn collect(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match collect_voucher(&state, &params).await {
        Ok(location) => redirect("vouchers.collect", &location),
        Err(e) => {
            let back = user_link("/vouchers", &params);
            text_failure(
                &state.views,
                "vouchers.collect",
                "Error collecting voucher: ",
                &e,
                Some(BackLink::new(&back, "Back")),
            )
        }
    }
}

async fn collect_voucher(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    state
        .call(&procedures::collect_voucher(user_id, params.text("voucher_code")))
        .await?;
    Ok(with_user("/vouchers", user_id))
}
