use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use chrono::Datelike;
use serde::Deserialize;
use std::sync::Arc;

use crate::calendar;
use crate::error::AppError;
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/calendar", get(calendar_view))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

// GET /calendar?year=YYYY&month=M — defaults to the current local month
async fn calendar_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarQuery>,
) -> Result<Html<String>, AppError> {
    let today = chrono::Local::now().date_naive();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let events = state.store.query_by_month(year, month).await?;
    let view = calendar::month_view(year, month, events)?;

    Ok(Html(views::calendar_page(&view)))
}
