//! Product management.

use axum::{
    extract::{Path, State},
    response::Response,
};
use minijinja::context;

use crate::gateway::defaults::ADMIN_PRODUCT_LIMIT;
use crate::gateway::documents::ProductDocument;
use crate::gateway::procedures::{self, NewProduct, ProductEdit};
use crate::gateway::{GatewayResult, Params};
use crate::http::response::{html, panel_failure, redirect, text_failure, BackLink};
use crate::http::{AppState, BodyParams};
use crate::storefront::path_id;

const PRODUCTS_PATH: &str = "/admin/products";

/// `GET /admin/products`: first page of the catalog, unfiltered.
pub async fn list(State(state): State<AppState>) -> Response {
    match render_list(&state).await {
        Ok(body) => html("admin.products", body),
        Err(e) => panel_failure(&state.views, "admin.products", "Admin Error", &e.to_string(), None),
    }
}

async fn render_list(state: &AppState) -> GatewayResult<String> {
    let products = state
        .call(&procedures::browse_products_page(ADMIN_PRODUCT_LIMIT, 0))
        .await?;

    Ok(state.views.render(
        "admin_products.html",
        context! { title => "Admin Products", products => products.into_rows() },
    )?)
}

/// `GET /admin/products/edit/{id}`
pub async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match render_edit(&state, &id).await {
        Ok(body) => html("admin.products.edit", body),
        Err(e) => text_failure(
            &state.views,
            "admin.products.edit",
            "Error loading product: ",
            &e,
            None,
        ),
    }
}

async fn render_edit(state: &AppState, id: &str) -> GatewayResult<String> {
    let product_id = path_id("id", id)?;
    let doc: ProductDocument = state
        .call(&procedures::get_product_details(product_id))
        .await?
        .decode_document()?;

    Ok(state.views.render(
        "admin_product_edit.html",
        context! {
            title => format!("Edit Product #{}", id),
            product_id => product_id,
            info => &doc.info,
            variants => &doc.variants,
        },
    )?)
}

/// `POST /admin/products/update`: the price is sent as DECIMAL(10,2).
pub async fn update(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match update_product(&state, &params).await {
        Ok(()) => redirect("admin.products.update", PRODUCTS_PATH),
        Err(e) => {
            let retry = format!(
                "/admin/products/edit/{}",
                params.get("product_id").unwrap_or_default()
            );
            text_failure(
                &state.views,
                "admin.products.update",
                "Update Failed: ",
                &e,
                Some(BackLink::new(&retry, "Try Again")),
            )
        }
    }
}

async fn update_product(state: &AppState, params: &Params) -> GatewayResult<()> {
    let call = procedures::update_product(ProductEdit {
        product_id: params.int("product_id")?,
        name: params.text("name"),
        price: params.decimal("price")?,
        thumbnail: params.text("thumbnail"),
        description: params.text("description"),
    });
    state.call(&call).await?;
    Ok(())
}

/// `POST /admin/products/create`: `category_ids` is passed through as JSON
/// array text, e.g. `[1,2]`.
pub async fn create(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match create_product(&state, &params).await {
        Ok(()) => redirect("admin.products.create", PRODUCTS_PATH),
        Err(e) => text_failure(
            &state.views,
            "admin.products.create",
            "Error creating product: ",
            &e,
            Some(BackLink::new(PRODUCTS_PATH, "Back")),
        ),
    }
}

async fn create_product(state: &AppState, params: &Params) -> GatewayResult<()> {
    let call = procedures::create_product(NewProduct {
        name: params.text("name"),
        slug: params.text("slug"),
        description: params.text("description"),
        original_price: params.decimal("original_price")?,
        price: params.decimal("price")?,
        thumbnail: params.text("thumbnail"),
        category_ids: params.text("category_ids"),
    });
    state.call(&call).await?;
    tracing::info!(slug = ?params.get("slug"), "Product created");
    Ok(())
}

/// `POST /admin/products/delete`
pub async fn delete(State(state): State<AppState>, BodyParams(params): BodyParams) -> Response {
    match delete_product(&state, &params).await {
        Ok(()) => redirect("admin.products.delete", PRODUCTS_PATH),
        Err(e) => text_failure(&state.views, "admin.products.delete", "", &e, None),
    }
}

async fn delete_product(state: &AppState, params: &Params) -> GatewayResult<()> {
    state
        .call(&procedures::delete_product(params.int("product_id")?))
        .await?;
    Ok(())
}
