//! Cart and checkout.

use axum::{
    extract::{Query, State},
    response::Response,
};
use minijinja::context;

use crate::gateway::defaults::CART_QUANTITY;
use crate::gateway::documents::CheckoutReceipt;
use crate::gateway::procedures::{self, CheckoutRequest};
use crate::gateway::{GatewayResult, Params};
use crate::http::response::{html, panel_failure, redirect, text_failure, with_user, BackLink};
use crate::http::{AppState, BodyParams};
use crate::storefront::user_link;

/// `GET /cart`: the cart is only fetched once a user id is given.
pub async fn view(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_cart(&state, &params).await {
        Ok(body) => html("cart", body),
        Err(e) => panel_failure(&state.views, "cart", "My Cart", &format!("Error: {}", e), None),
    }
}

async fn render_cart(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let items = match user_id {
        Some(id) => state.call(&procedures::cart_view_details(id)).await?.into_rows(),
        None => Vec::new(),
    };

    Ok(state.views.render(
        "cart.html",
        context! { title => "My Cart", user_id => user_id, cart_items => items },
    )?)
}

/// `POST /cart/add`
pub async fn add(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match add_item(&state, &params).await {
        Ok(location) => redirect("cart.add", &location),
        Err(e) => text_failure(
            &state.views,
            "cart.add",
            "Error adding to cart: ",
            &e,
            Some(BackLink::new("/products", "Back")),
        ),
    }
}

async fn add_item(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let call = procedures::cart_add_item(
        user_id,
        params.int("variant_id")?,
        params.int_or("quantity", CART_QUANTITY)?,
    );
    state.call(&call).await?;
    Ok(with_user("/cart", user_id))
}

/// `POST /cart/update`
pub async fn update(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match update_item(&state, &params).await {
        Ok(location) => redirect("cart.update", &location),
        Err(e) => {
            let back = user_link("/cart", &params);
            text_failure(
                &state.views,
                "cart.update",
                "Error updating cart: ",
                &e,
                Some(BackLink::new(&back, "Back")),
            )
        }
    }
}

async fn update_item(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let call = procedures::cart_update_item_quantity(
        user_id,
        params.int("variant_id")?,
        params.int("quantity")?,
    );
    state.call(&call).await?;
    Ok(with_user("/cart", user_id))
}

/// `POST /cart/remove`
pub async fn remove(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match remove_item(&state, &params).await {
        Ok(location) => redirect("cart.remove", &location),
        Err(e) => text_failure(&state.views, "cart.remove", "", &e, None),
    }
}

async fn remove_item(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let call = procedures::cart_remove_item(user_id, params.int("variant_id")?);
    state.call(&call).await?;
    Ok(with_user("/cart", user_id))
}

/// `POST /checkout`: an empty voucher field means no voucher.
pub async fn checkout(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match place_order(&state, &params).await {
        Ok(body) => html("checkout", body),
        Err(e) => text_failure(&state.views, "checkout", "❌ Checkout Failed: ", &e, None),
    }
}

async fn place_order(state: &AppState, params: &Params) -> GatewayResult<String> {
    let call = procedures::checkout(CheckoutRequest {
        user_id: params.int("user_id")?,
        address_id: params.int("address_id")?,
        payment_method_id: params.int("payment_method_id")?,
        voucher_id: params.int("voucher_id")?,
    });
    let receipt: CheckoutReceipt = state.call(&call).await?.decode_document()?;
    tracing::info!(order_id = receipt.order_id, "Order placed");

    Ok(state.views.render(
        "order_placed.html",
        context! {
            order_id => receipt.order_id,
            final_amount => receipt.final_amount,
        },
    )?)
}
