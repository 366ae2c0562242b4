//! # Validation Module
//!
//! Input validation for the product-intake form.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Intake Submission                                  │
//! │                                                                         │
//! │  1. validate_product_code   empty? → "product code is required"        │
//! │  2. validate_photo_ref      empty? → "photo is required"               │
//! │  3. validate_color          empty / not in palette                     │
//! │  4. pending sizes           none?  → "at least one size entry ..."     │
//! │                                                                         │
//! │  The first failing check is the one reported.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stocklens_core::validation::{validate_product_code, validate_quantity};
//!
//! assert!(validate_product_code("KR-1042").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::intake::COLOR_PALETTE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product code.
pub const MAX_PRODUCT_CODE_LEN: usize = 50;

/// Longest accepted size label.
pub const MAX_SIZE_LEN: usize = 20;

/// Longest accepted photo reference.
pub const MAX_PHOTO_REF_LEN: usize = 500;

fn required(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
///
/// ## Example
/// ```rust
/// use stocklens_core::validation::validate_product_code;
///
/// assert!(validate_product_code("KR-1042").is_ok());
/// assert!(validate_product_code("   ").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    required(code, "product code", MAX_PRODUCT_CODE_LEN)
}

/// Validates a photo reference (path, URL or upload id).
pub fn validate_photo_ref(photo: &str) -> ValidationResult<()> {
    required(photo, "photo", MAX_PHOTO_REF_LEN)
}

/// Validates a size label such as `S`, `XL` or `42`.
pub fn validate_size(size: &str) -> ValidationResult<()> {
    required(size, "size", MAX_SIZE_LEN)
}

/// Validates a color against the fixed palette.
///
/// Matching is exact after trimming; palette names are proper nouns
/// (`Oq`, `To'q ko'k`) and keep their case.
pub fn validate_color(color: &str) -> ValidationResult<()> {
    let color = color.trim();

    if color.is_empty() {
        return Err(ValidationError::Required {
            field: "color".to_string(),
        });
    }

    if !COLOR_PALETTE.contains(&color) {
        return Err(ValidationError::NotAllowed {
            field: "color".to_string(),
            value: color.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a size quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("KR-1042").is_ok());
        assert!(validate_product_code("kofta 12").is_ok());

        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("   ").is_err());
        assert_eq!(
            validate_product_code(&"A".repeat(51)),
            Err(ValidationError::TooLong {
                field: "product code".to_string(),
                max: 50,
            })
        );
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size("XL").is_ok());
        assert!(validate_size("").is_err());
        assert!(validate_size(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_photo_ref() {
        assert!(validate_photo_ref("photos/kr-1042.jpg").is_ok());
        assert_eq!(
            validate_photo_ref(""),
            Err(ValidationError::Required {
                field: "photo".to_string()
            })
        );
    }

    #[test]
    fn test_validate_color() {
        assert!(validate_color("Oq").is_ok());
        assert!(validate_color(" To'q ko'k ").is_ok());

        assert!(matches!(
            validate_color(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_color("Magenta"),
            Err(ValidationError::NotAllowed { .. })
        ));
        // Case matters
        assert!(validate_color("oq").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
