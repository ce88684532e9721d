use serde::{Deserialize, Serialize};

use crate::domain::{Brand, BrandId};

/// Search form for the brand list. `name` is echoed back with the matching
/// `results` so the form can be redisplayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSearchViewModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub results: Vec<Brand>,
}

impl BrandSearchViewModel {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            results: Vec::new(),
        }
    }

    /// The filter term, or `None` when the list should be unfiltered.
    pub fn search_term(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Submitted create/edit payload. `name` may be absent so that a missing
/// field is reported as a form error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrandInput {
    pub id: BrandId,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<BrandInput> for Brand {
    fn from(input: BrandInput) -> Self {
        Self {
            id: input.id,
            name: input.name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Create/edit form model. A rejected submission comes back with the
/// submitted brand untouched and one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandForm {
    pub brand: Option<Brand>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl BrandForm {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_brand(brand: Brand) -> Self {
        Self {
            brand: Some(brand),
            errors: Vec::new(),
        }
    }

    pub fn rejected(brand: Brand, errors: Vec<FieldError>) -> Self {
        Self {
            brand: Some(brand),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
