//! Product browsing.

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use minijinja::context;

use crate::gateway::defaults::{
    BROWSE_LIMIT, BROWSE_MAX_PRICE, BROWSE_MIN_PRICE, BROWSE_OFFSET, BROWSE_SORT,
};
use crate::gateway::documents::ProductDocument;
use crate::gateway::procedures::{self, BrowseFilter};
use crate::gateway::{BindError, GatewayResult, Params};
use crate::http::response::{html, text_failure};
use crate::http::AppState;
use crate::storefront::path_id;

/// Build the browse filter from the query string, applying the defaults for
/// anything left out.
pub fn browse_filter(params: &Params) -> Result<BrowseFilter, BindError> {
    Ok(BrowseFilter {
        keyword: params.optional_text("keyword"),
        category_slug: params.optional_text("category_slug"),
        min_price: params.decimal_or("min_price", BROWSE_MIN_PRICE)?,
        max_price: params.decimal_or("max_price", BROWSE_MAX_PRICE)?,
        sort_by: params.text_or("sort_by", BROWSE_SORT),
        limit: params.int_or("limit", BROWSE_LIMIT)?,
        offset: params.int_or("offset", BROWSE_OFFSET)?,
    })
}

/// `GET /products`
pub async fn products(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    match render_products(&state, &params).await {
        Ok(body) => html("products", body),
        Err(e) => text_failure(&state.views, "products", "Error: ", &e, None),
    }
}

async fn render_products(state: &AppState, params: &Params) -> GatewayResult<String> {
    let filter = browse_filter(params)?;
    let products = state.call(&procedures::browse_products(&filter)).await?;

    Ok(state.views.render(
        "products.html",
        context! {
            title => "Products",
            products => products.into_rows(),
            query => params,
        },
    )?)
}

/// `GET /product/{id}`
pub async fn product_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match render_product(&state, &id).await {
        Ok(body) => html("product.detail", body),
        Err(e) => text_failure(&state.views, "product.detail", "Error: ", &e, None),
    }
}

async fn render_product(state: &AppState, id: &str) -> GatewayResult<String> {
    let product_id = path_id("id", id)?;
    let set = state
        .call(&procedures::get_product_details(product_id))
        .await?;
    let doc: ProductDocument = set.decode_document()?;

    Ok(state.views.render(
        "product_detail.html",
        context! {
            title => &doc.info.name,
            info => &doc.info,
            variants => &doc.variants,
            reviews => &doc.latest_reviews,
        },
    )?)
}
