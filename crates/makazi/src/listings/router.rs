use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::catalog::ListingQuery;
use super::controller::SubmitError;
use super::domain::{ListingSession, PropertyId};
use super::draft::PropertyDraft;
use super::form::ListingForm;
use super::presentation::{ListingDetailView, ListingSummaryView};
use super::repository::{ListingStore, PersistenceError};
use crate::config::ListingConfig;

/// Header carrying the authenticated landlord's id, set by the auth proxy in front of us.
pub const OWNER_HEADER: &str = "x-owner-id";

pub struct ListingRoutesState<S> {
    pub store: Arc<S>,
    pub display: ListingConfig,
}

/// Router builder exposing listing create/edit plus the public browse and detail reads.
pub fn listing_router<S>(store: Arc<S>, display: ListingConfig) -> Router
where
    S: ListingStore + 'static,
{
    let state = Arc::new(ListingRoutesState { store, display });
    Router::new()
        .route(
            "/api/v1/listings",
            post(create_handler::<S>).get(browse_handler::<S>),
        )
        .route(
            "/api/v1/listings/:property_id",
            get(detail_handler::<S>).put(update_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn create_handler<S>(
    State(state): State<Arc<ListingRoutesState<S>>>,
    headers: HeaderMap,
    Json(draft): Json<PropertyDraft>,
) -> Response
where
    S: ListingStore + 'static,
{
    let Some(session) = session_from(&headers) else {
        return unauthorized();
    };

    let mut form = ListingForm::new_listing(session);
    form.replace_draft(draft);
    match form.submit(state.store.as_ref()).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => submit_error_response(&err),
    }
}

pub(crate) async fn update_handler<S>(
    State(state): State<Arc<ListingRoutesState<S>>>,
    Path(property_id): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<PropertyDraft>,
) -> Response
where
    S: ListingStore + 'static,
{
    let Some(session) = session_from(&headers) else {
        return unauthorized();
    };

    let id = PropertyId(property_id);
    let existing = match state.store.fetch(&id).await {
        Ok(Some(record)) => record,
        Ok(None) => return persistence_error_response(&PersistenceError::NotFound),
        Err(err) => return persistence_error_response(&err),
    };
    if existing.owner_id != session.owner {
        let payload = json!({ "error": "listing belongs to another landlord" });
        return (StatusCode::FORBIDDEN, Json(payload)).into_response();
    }

    let mut form = ListingForm::edit_listing(session, Some(&existing));
    form.replace_draft(draft);
    match form.submit(state.store.as_ref()).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => submit_error_response(&err),
    }
}

pub(crate) async fn browse_handler<S>(
    State(state): State<Arc<ListingRoutesState<S>>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    S: ListingStore + 'static,
{
    match state.store.list().await {
        Ok(records) => {
            let views: Vec<ListingSummaryView> = query
                .apply(records)
                .iter()
                .map(|record| ListingSummaryView::from_record(record, &state.display.currency))
                .collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => persistence_error_response(&err),
    }
}

pub(crate) async fn detail_handler<S>(
    State(state): State<Arc<ListingRoutesState<S>>>,
    Path(property_id): Path<String>,
) -> Response
where
    S: ListingStore + 'static,
{
    match state.store.fetch(&PropertyId(property_id)).await {
        Ok(Some(record)) => {
            let view = ListingDetailView::from_record(&record, &state.display.currency);
            (StatusCode::OK, Json(view)).into_response()
        }
        Ok(None) => persistence_error_response(&PersistenceError::NotFound),
        Err(err) => persistence_error_response(&err),
    }
}

fn session_from(headers: &HeaderMap) -> Option<ListingSession> {
    headers
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
        .map(ListingSession::new)
}

fn unauthorized() -> Response {
    let payload = json!({ "error": format!("missing {OWNER_HEADER} header") });
    (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
}

fn submit_error_response(err: &SubmitError) -> Response {
    match err {
        SubmitError::Validation(errors) => {
            let payload = json!({
                "error": err.user_message(),
                "fields": errors.errors(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SubmitError::AlreadySubmitting | SubmitError::Discarded => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        SubmitError::Persistence(source) => persistence_error_response(source),
    }
}

fn persistence_error_response(err: &PersistenceError) -> Response {
    let status = match err {
        PersistenceError::NotFound => StatusCode::NOT_FOUND,
        PersistenceError::Conflict => StatusCode::CONFLICT,
        PersistenceError::Unavailable(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
