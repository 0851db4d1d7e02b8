use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::EventForm;
use crate::views;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_events))
        .route("/add", get(add_event_form).post(add_event))
        .route("/edit/{id}", get(edit_event_form).post(edit_event))
        .route("/delete/{id}", get(delete_event))
}

// GET /
async fn list_events(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let events = state.store.list().await?;
    Ok(Html(views::index_page(&events)))
}

// GET /add
async fn add_event_form() -> Html<String> {
    Html(views::event_form_page(None))
}

// POST /add
async fn add_event(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    let new_event = form.into_new_event()?;
    let event = state.store.create(new_event).await?;
    tracing::info!(event_id = event.id, "Event created");
    Ok(Redirect::to("/"))
}

// GET /edit/{id}
async fn edit_event_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let event = state.store.get(id).await?;
    Ok(Html(views::event_form_page(Some(&event))))
}

// POST /edit/{id}
async fn edit_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    let new_event = form.into_new_event()?;
    state.store.update(id, new_event).await?;
    tracing::info!(event_id = id, "Event updated");
    Ok(Redirect::to("/"))
}

// GET /delete/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.store.delete(id).await?;
    tracing::info!(event_id = id, "Event deleted");
    Ok(Redirect::to("/"))
}
