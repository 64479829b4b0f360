//! Sales reports.

use axum::{
    extract::{Query, State},
    response::Response,
};
use chrono::{NaiveDate, Utc};
use minijinja::context;

use crate::gateway::binder::DATE_FORMAT;
use crate::gateway::defaults::{report_window, BEST_SELLER_LIMIT};
use crate::gateway::procedures;
use crate::gateway::{GatewayResult, Params};
use crate::http::response::{html, panel_failure};
use crate::http::AppState;

/// `GET /admin/reports?start_date=&end_date=`: revenue by day and best
/// sellers over the same window. Missing bounds default to the trailing 30
/// days ending today (UTC).
pub async fn reports(State(state): State<AppState>, Query(params): Query<Params>) -> Response {
    let today = Utc::now().date_naive();
    match render_reports(&state, &params, today).await {
        Ok(body) => html("admin.reports", body),
        Err(e) => panel_failure(&state.views, "admin.reports", "Report Error", &e.to_string(), None),
    }
}

async fn render_reports(state: &AppState, params: &Params, today: NaiveDate) -> GatewayResult<String> {
    let (start, end) = report_window(params, today)?;

    let revenue = state
        .call(&procedures::report_revenue_by_date(start, end))
        .await?;
    let best_sellers = state
        .call(&procedures::report_best_sellers(BEST_SELLER_LIMIT, start, end))
        .await?;

    Ok(state.views.render(
        "admin_reports.html",
        context! {
            title => "Reports",
            start_date => start.format(DATE_FORMAT).to_string(),
            end_date => end.format(DATE_FORMAT).to_string(),
            revenue_data => revenue.into_rows(),
            best_sellers => best_sellers.into_rows(),
        },
    )?)
}
