//! Order management.

use axum::{
    extract::{Query, State},
    response::Response,
};
use minijinja::context;

use crate::gateway::procedures;
use crate::gateway::{GatewayResult, Params};
use crate::http::response::{html, panel_failure, redirect, text_failure, BackLink};
use crate::http::{AppState, BodyParams};

const ORDERS_PATH: &str = "/admin/orders";

/// `GET /admin/orders?status=`: a blank status lists every order.
pub async fn list(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_orders(&state, &params).await {
        Ok(body) => html("admin.orders", body),
        Err(e) => panel_failure(&state.views, "admin.orders", "Admin Error", &e.to_string(), None),
    }
}

async fn render_orders(state: &AppState, params: &Params) -> GatewayResult<String> {
    let status = params.optional_text("status");
    let orders = state
        .call(&procedures::view_orders(status.clone()))
        .await?;

    Ok(state.views.render(
        "admin_orders.html",
        context! { title => "Manage Orders", orders => orders.into_rows(), status => status },
    )?)
}

/// `POST /admin/orders/update`
pub async fn update(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match update_status(&state, &params).await {
        Ok(()) => redirect("admin.orders.update", ORDERS_PATH),
        Err(e) => text_failure(
            &state.views,
            "admin.orders.update",
            "Error updating order: ",
            &e,
            Some(BackLink::new(ORDERS_PATH, "Back")),
        ),
    }
}

async fn update_status(state: &AppState, params: &Params) -> GatewayResult<()> {
    let call = procedures::update_order_status(params.int("order_id")?, params.text("new_status"));
    state.call(&call).await?;
    Ok(())
}
