//! Address book.
//!
//! Mutation failures show the bare message with no link back.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use minijinja::context;

use crate::db::records::value_matches_id;
use crate::gateway::procedures::{self, AddressFields};
use crate::gateway::{GatewayError, GatewayResult, Params};
use crate::http::response::{html, panel_failure, redirect, text_failure, with_user};
use crate::http::{AppState, BodyParams};
use crate::storefront::path_id;

fn address_fields(params: &Params) -> AddressFields {
    AddressFields {
        recipient_name: params.text("recipient_name"),
        phone: params.text("phone"),
        city: params.text("city"),
        district: params.text("district"),
        detail: params.text("detail"),
    }
}

/// `GET /addresses`
pub async fn list(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_addresses(&state, &params).await {
        Ok(body) => html("addresses", body),
        Err(e) => panel_failure(&state.views, "addresses", "Address Error", &e.to_string(), None),
    }
}

async fn render_addresses(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let addresses = match user_id {
        Some(id) => state
            .call(&procedures::get_my_addresses(Some(id)))
            .await?
            .into_rows(),
        None => Vec::new(),
    };

    Ok(state.views.render(
        "addresses.html",
        context! { title => "My Addresses", user_id => user_id, addresses => addresses },
    )?)
}

/// `POST /addresses/add`
pub async fn add(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match add_address(&state, &params).await {
        Ok(location) => redirect("addresses.add", &location),
        Err(e) => text_failure(&state.views, "addresses.add", "", &e, None),
    }
}

async fn add_address(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    state
        .call(&procedures::add_address(user_id, address_fields(params)))
        .await?;
    Ok(with_user("/addresses", user_id))
}

/// `POST /addresses/delete`
pub async fn delete(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match delete_address(&state, &params).await {
        Ok(location) => redirect("addresses.delete", &location),
        Err(e) => text_failure(&state.views, "addresses.delete", "", &e, None),
    }
}

async fn delete_address(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    state
        .call(&procedures::delete_address(params.int("address_id")?, user_id))
        .await?;
    Ok(with_user("/addresses", user_id))
}

/// `GET /addresses/edit/{id}`: there is no single-address procedure, so the
/// user's address list is fetched and searched. An address owned by someone
/// else is simply not in the list.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    match render_edit(&state, &id, &params).await {
        Ok(body) => html("addresses.edit", body),
        Err(e) => text_failure(&state.views, "addresses.edit", "", &e, None),
    }
}

async fn render_edit(state: &AppState, id: &str, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let address_id = path_id("id", id)?;
    let set = state.call(&procedures::get_my_addresses(user_id)).await?;

    let address = address_id
        .and_then(|wanted| {
            set.into_rows().into_iter().find(|row| {
                row.get("address_id")
                    .is_some_and(|v| value_matches_id(v, i64::from(wanted)))
            })
        })
        .ok_or_else(|| GatewayError::NotFound("Address not found or unauthorized".into()))?;

    Ok(state.views.render(
        "addresses_edit.html",
        context! { title => "Edit Address", user_id => user_id, address => address },
    )?)
}

/// `POST /addresses/update`
pub async fn update(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match update_address(&state, &params).await {
        Ok(location) => redirect("addresses.update", &location),
        Err(e) => text_failure(&state.views, "addresses.update", "", &e, None),
    }
}

async fn update_address(state: &AppState, params: &Params) -> GatewayResult<String> {
    let user_id = params.int("user_id")?;
    let call = procedures::update_address(
        params.int("address_id")?,
        user_id,
        address_fields(params),
        params.flag("is_default"),
    );
    state.call(&call).await?;
    Ok(with_user("/addresses", user_id))
}
