use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use server_api::{
    create, create_form, delete_confirmed, delete_form, details, edit, edit_form, index,
    ActionResult,
};
use shared::{
    domain::BrandId,
    error::{ApiError, ErrorCode},
    protocol::{BrandForm, BrandInput, BrandSearchViewModel},
};
use tracing::error;

use crate::app_state::AppState;

pub(crate) const BRANDS_ROUTE: &str = "/brands";

#[derive(Debug, Deserialize)]
pub(crate) struct BrandSearchQuery {
    name: Option<String>,
}

pub(crate) async fn healthz(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.api.store.health_check().await.map_err(|e| {
        error!(error = %e, "store health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new(ErrorCode::Internal, e.to_string())),
        )
    })?;
    Ok("ok")
}

pub(crate) async fn http_list_brands(
    State(state): State<Arc<AppState>>,
    Query(q): Query<BrandSearchQuery>,
) -> Response {
    let filter = BrandSearchViewModel {
        name: q.name,
        results: Vec::new(),
    };
    render(index(&state.api, Some(filter)).await, |_| StatusCode::OK)
}

pub(crate) async fn http_brand_details(
    State(state): State<Arc<AppState>>,
    Path(brand_id): Path<i64>,
) -> Response {
    render(details(&state.api, BrandId(brand_id)).await, |_| {
        StatusCode::OK
    })
}

pub(crate) async fn http_create_form() -> Response {
    render(Ok(create_form()), form_status)
}

pub(crate) async fn http_create_brand(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BrandInput>,
) -> Response {
    render(create(&state.api, input.into()).await, form_status)
}

pub(crate) async fn http_edit_form(
    State(state): State<Arc<AppState>>,
    Path(brand_id): Path<i64>,
) -> Response {
    render(edit_form(&state.api, BrandId(brand_id)).await, form_status)
}

pub(crate) async fn http_edit_brand(
    State(state): State<Arc<AppState>>,
    Path(brand_id): Path<i64>,
    Json(input): Json<BrandInput>,
) -> Response {
    render(
        edit(&state.api, BrandId(brand_id), input.into()).await,
        form_status,
    )
}

pub(crate) async fn http_delete_form(
    State(state): State<Arc<AppState>>,
    Path(brand_id): Path<i64>,
) -> Response {
    render(delete_form(&state.api, BrandId(brand_id)).await, |_| {
        StatusCode::OK
    })
}

pub(crate) async fn http_delete_brand(
    State(state): State<Arc<AppState>>,
    Path(brand_id): Path<i64>,
) -> Response {
    render(delete_confirmed(&state.api, BrandId(brand_id)).await, |_| {
        StatusCode::OK
    })
}

/// A form that carries errors is a re-render of a rejected submission.
fn form_status(form: &BrandForm) -> StatusCode {
    if form.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

fn render<T: Serialize>(
    result: Result<ActionResult<T>, ApiError>,
    view_status: impl FnOnce(&T) -> StatusCode,
) -> Response {
    match result {
        Ok(ActionResult::View(model)) => (view_status(&model), Json(model)).into_response(),
        Ok(ActionResult::RedirectToIndex) => Redirect::to(BRANDS_ROUTE).into_response(),
        Ok(ActionResult::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Ok(ActionResult::BadRequest(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::BadRequest, message)),
        )
            .into_response(),
        Err(err) => {
            error!(message = %err.message, "brand action failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
