use shared::{domain::Brand, protocol::FieldError};

pub const MAX_BRAND_NAME_CHARS: usize = 100;

/// Field errors for a submitted brand. Empty when the brand may be stored.
pub fn validate_brand(brand: &Brand) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if brand.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    } else if brand.name.chars().count() > MAX_BRAND_NAME_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("name must be at most {MAX_BRAND_NAME_CHARS} characters"),
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_required() {
        for name in ["", "   ", "\t"] {
            let errors = validate_brand(&Brand::new(1, name));
            assert_eq!(errors, vec![FieldError::new("name", "name is required")]);
        }
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let at_limit = "é".repeat(MAX_BRAND_NAME_CHARS);
        assert!(validate_brand(&Brand::new(1, at_limit)).is_empty());

        let over = "a".repeat(MAX_BRAND_NAME_CHARS + 1);
        let errors = validate_brand(&Brand::new(1, over));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }
}
