//! Order history.

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

/// `GET /orders`
pub async fn list(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_orders(&state, &params).await {
        Ok(body) => html("orders", body),
        Err(e) => panel_failure(&state.views, "orders", "My Orders", &format!("Error: {}", e), None),
    }
}

async fn render_orders(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let orders = match user_id {
        Some(id) => state.call(&procedures::view_order_history(id)).await?.into_rows(),
        None => Vec::new(),
    };

    Ok(state.views.render(
        "orders.html",
        context! { title => "My Orders", user_id => user_id, orders => orders },
    )?)
}

/// `POST /orders/cancel`
pub async fn cancel(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match cancel_order(&state, &params).await {
        Ok(location) => redirect("orders.cancel", &location),
        Err(e) => {
            let back = user_link("/orders", &params);
            text_failure(
                &state.views,
                "orders.cancel",
                "Error cancelling order: ",
                &e,
                Some(BackLink::new(&back, "Back")),
            )
        }
    }
}

async fn cancel_order(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    state
        .call(&procedures::cancel_order(user_id, params.int("order_id")?))
        .await?;
    Ok(with_user("/orders", user_id))
}
