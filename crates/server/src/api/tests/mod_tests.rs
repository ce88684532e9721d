use super::*;
use shared::{domain::Brand, protocol::FieldError};

#[test]
fn valid_form_renders_ok() {
    assert_eq!(form_status(&BrandForm::empty()), StatusCode::OK);
}

#[test]
fn form_with_errors_is_unprocessable() {
    let form = BrandForm::rejected(
        Brand::new(1, ""),
        vec![FieldError::new("name", "name is required")],
    );
    assert_eq!(form_status(&form), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn redirect_uses_see_other_to_list() {
    let response = render::<()>(Ok(ActionResult::RedirectToIndex), |_| StatusCode::OK);
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(axum::http::header::LOCATION),
        Some(&axum::http::HeaderValue::from_static(BRANDS_ROUTE))
    );
}

#[test]
fn not_found_has_no_body_model() {
    let response = render::<Brand>(Ok(ActionResult::NotFound), |_| StatusCode::OK);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn backend_failure_is_internal_error() {
    let response = render::<Brand>(
        Err(ApiError::new(ErrorCode::Internal, "disk on fire")),
        |_| StatusCode::OK,
    );
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
