use std::sync::Arc;

use shared::{
    domain::{Brand, BrandId},
    error::{ApiError, ErrorCode},
    protocol::{BrandForm, BrandSearchViewModel, FieldError},
};
use storage::{BrandStore, StoreError};
use tracing::{info, warn};

mod validation;

pub use validation::{validate_brand, MAX_BRAND_NAME_CHARS};

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn BrandStore>,
}

impl ApiContext {
    pub fn new(store: impl BrandStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Outcome of a brand action. Backend failures are reported through the
/// `Err` side of the surrounding `Result` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    View(T),
    RedirectToIndex,
    NotFound,
    BadRequest(String),
}

impl<T> ActionResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            Self::View(model) => ActionResult::View(f(model)),
            Self::RedirectToIndex => ActionResult::RedirectToIndex,
            Self::NotFound => ActionResult::NotFound,
            Self::BadRequest(message) => ActionResult::BadRequest(message),
        }
    }
}

pub async fn index(
    ctx: &ApiContext,
    filter: Option<BrandSearchViewModel>,
) -> Result<ActionResult<BrandSearchViewModel>, ApiError> {
    let mut model = filter.unwrap_or_default();
    let results = match model.search_term() {
        Some(term) => ctx.store.search(Some(term)).await.map_err(internal)?,
        None => ctx.store.find_all().await.map_err(internal)?,
    };
    model.results = results;
    Ok(ActionResult::View(model))
}

pub async fn details(ctx: &ApiContext, id: BrandId) -> Result<ActionResult<Brand>, ApiError> {
    found_or_not(ctx.store.find_by_id(id).await)
}

pub fn create_form() -> ActionResult<BrandForm> {
    ActionResult::View(BrandForm::empty())
}

pub async fn create(ctx: &ApiContext, brand: Brand) -> Result<ActionResult<BrandForm>, ApiError> {
    let errors = validate_brand(&brand);
    if !errors.is_empty() {
        warn!(brand_id = %brand.id, ?errors, "rejected brand create");
        return Ok(ActionResult::View(BrandForm::rejected(brand, errors)));
    }

    match ctx.store.add(&brand).await {
        Ok(()) => {
            info!(brand_id = %brand.id, name = %brand.name, "brand created");
            Ok(ActionResult::RedirectToIndex)
        }
        Err(StoreError::DuplicateKey(id)) => {
            warn!(brand_id = %id, "rejected brand create with duplicate id");
            let errors = vec![FieldError::new("id", format!("brand {id} already exists"))];
            Ok(ActionResult::View(BrandForm::rejected(brand, errors)))
        }
        Err(err) => Err(internal(err)),
    }
}

pub async fn edit_form(ctx: &ApiContext, id: BrandId) -> Result<ActionResult<BrandForm>, ApiError> {
    Ok(found_or_not(ctx.store.find_by_id(id).await)?.map(BrandForm::for_brand))
}

pub async fn edit(
    ctx: &ApiContext,
    id: BrandId,
    brand: Brand,
) -> Result<ActionResult<BrandForm>, ApiError> {
    if brand.id != id {
        warn!(route_id = %id, body_id = %brand.id, "rejected brand edit with mismatched ids");
        return Ok(ActionResult::BadRequest(format!(
            "route id {id} does not match brand id {}",
            brand.id
        )));
    }

    let errors = validate_brand(&brand);
    if !errors.is_empty() {
        warn!(brand_id = %id, ?errors, "rejected brand edit");
        return Ok(ActionResult::View(BrandForm::rejected(brand, errors)));
    }

    match ctx.store.update(id, &brand).await {
        Ok(()) => {
            info!(brand_id = %id, name = %brand.name, "brand updated");
            Ok(ActionResult::RedirectToIndex)
        }
        Err(StoreError::NotFound(_)) => Ok(ActionResult::NotFound),
        Err(err) => Err(internal(err)),
    }
}

pub async fn delete_form(ctx: &ApiContext, id: BrandId) -> Result<ActionResult<Brand>, ApiError> {
    found_or_not(ctx.store.find_by_id(id).await)
}

pub async fn delete_confirmed(
    ctx: &ApiContext,
    id: BrandId,
) -> Result<ActionResult<()>, ApiError> {
    match ctx.store.delete(id).await {
        Ok(()) => {
            info!(brand_id = %id, "brand deleted");
            Ok(ActionResult::RedirectToIndex)
        }
        Err(StoreError::NotFound(_)) => Ok(ActionResult::NotFound),
        Err(err) => Err(internal(err)),
    }
}

fn found_or_not(lookup: storage::Result<Brand>) -> Result<ActionResult<Brand>, ApiError> {
    match lookup {
        Ok(brand) => Ok(ActionResult::View(brand)),
        Err(StoreError::NotFound(_)) => Ok(ActionResult::NotFound),
        Err(err) => Err(internal(err)),
    }
}

fn internal(err: StoreError) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
