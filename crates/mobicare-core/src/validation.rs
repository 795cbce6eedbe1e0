//! # Validation Module
//!
//! Input validation utilities for MobiCare.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View layer (out of scope)                                     │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (Rust)                                               │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: Business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Identity provider / hosted store                              │
//! │  └── Provider-side policy (duplicate email, password strength)          │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mobicare_core::validation::{validate_email, validate_phone};
//!
//! validate_email("customer@example.com").unwrap();
//! assert_eq!(validate_phone("+91 98765-43210").unwrap(), "9876543210");
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::DeviceType;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted by sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Credential Validators
// =============================================================================

/// Validates the shape of an email address.
///
/// ## Rules
/// This is a shape check, not RFC 5322: non-empty local part, exactly one
/// `@`, and a domain containing a dot. The identity provider is the final
/// authority.
///
/// ## Example
/// ```rust
/// use mobicare_core::validation::validate_email;
///
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// assert!(validate_email("a@b").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    let shape_ok = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);

    if !shape_ok {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a password against the sign-up policy (length only; the
/// provider applies its own strength rules on top).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Intake Form Validators
// =============================================================================

/// Validates and normalizes a customer phone number.
///
/// ## Rules
/// A leading `+91` country code is dropped, then non-digit separators are
/// stripped (customers type "+91 98765…", "98765-43210" and so on); what
/// remains must be exactly 10 digits. A bare 12-digit string is rejected:
/// without the `+` we cannot tell a country code from a typo.
///
/// ## Returns
/// The normalized 10-digit string, which is what gets persisted.
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let local = trimmed.strip_prefix("+91").unwrap_or(trimmed);
    let digits: String = local.chars().filter(char::is_ascii_digit).collect();

    if digits.len() != 10 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "expected a 10-digit phone number".to_string(),
        });
    }

    Ok(digits)
}

/// Validates a non-empty free-text field (customer name, problem
/// description).
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a brand belongs to the selected device family.
///
/// ## Example
/// ```rust
/// use mobicare_core::types::DeviceType;
/// use mobicare_core::validation::validate_brand;
///
/// assert!(validate_brand(DeviceType::Mobile, "Samsung").is_ok());
/// assert!(validate_brand(DeviceType::Ups, "Samsung").is_err());
/// ```
pub fn validate_brand(device_type: DeviceType, brand: &str) -> ValidationResult<()> {
    if brand.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "brand".to_string(),
        });
    }

    let allowed = device_type.brands();
    if !allowed.iter().any(|b| b.eq_ignore_ascii_case(brand)) {
        return Err(ValidationError::NotAllowed {
            field: "brand".to_string(),
            allowed: allowed.iter().map(|b| b.to_string()).collect(),
        });
    }

    Ok(())
}

/// The validated, normalized fields of a service intake submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIntake {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub problem_description: String,
    pub preferred_date: NaiveDate,
}

/// Validates a full service intake submission.
///
/// ## Rules
/// Every field of the intake form is required; phone must normalize to
/// 10 digits; the brand must belong to the selected device family.
///
/// ## Returns
/// A [`ServiceIntake`] with trimmed text and the normalized phone number.
#[allow(clippy::too_many_arguments)]
pub fn validate_service_intake(
    customer_name: &str,
    phone: &str,
    email: &str,
    device_type: DeviceType,
    brand: &str,
    problem_description: &str,
    preferred_date: NaiveDate,
) -> ValidationResult<ServiceIntake> {
    validate_required_text("customerName", customer_name)?;
    let phone = validate_phone(phone)?;
    validate_email(email)?;
    validate_brand(device_type, brand)?;
    validate_required_text("problemDescription", problem_description)?;

    Ok(ServiceIntake {
        customer_name: customer_name.trim().to_string(),
        phone,
        email: email.trim().to_string(),
        device_type,
        brand: brand.trim().to_string(),
        problem_description: problem_description.trim().to_string(),
        preferred_date,
    })
}

// =============================================================================
// Admin Product Form Validators
// =============================================================================

/// Validates the admin product form fields.
///
/// ## Rules
/// - name and brand non-empty, name at most 200 characters
/// - price positive
/// - stock non-negative
/// - rating within 0..=5
pub fn validate_product_form(
    name: &str,
    brand: &str,
    price_paise: i64,
    rating: f64,
    stock: i64,
) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    validate_required_text("brand", brand)?;

    if price_paise <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
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

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("  spaced@ok.in  ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("two words@b.com").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("secret").is_ok());
        assert!(matches!(
            validate_password("short"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(validate_phone("9876543210").unwrap(), "9876543210");
        assert_eq!(validate_phone("+91 98765-43210").unwrap(), "9876543210");
        assert_eq!(validate_phone("+919876543210").unwrap(), "9876543210");

        // 9 digits after stripping
        assert!(matches!(
            validate_phone("987654321"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        // +91 prefix makes 12 digits; that is rejected too, the caller
        // must enter the local number
        assert!(validate_phone("919876543210").is_err());
    }

    #[test]
    fn test_brand_must_match_device_family() {
        assert!(validate_brand(DeviceType::Laptop, "Lenovo").is_ok());
        assert!(validate_brand(DeviceType::Laptop, "lenovo").is_ok());
        assert!(matches!(
            validate_brand(DeviceType::Cctv, "Lenovo"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_intake_happy_path_normalizes() {
        let intake = validate_service_intake(
            "  Asha Rao ",
            "98765 43210",
            "asha@example.com",
            DeviceType::Mobile,
            "Samsung",
            "Screen cracked",
            date("2026-09-01"),
        )
        .unwrap();

        assert_eq!(intake.customer_name, "Asha Rao");
        assert_eq!(intake.phone, "9876543210");
        assert_eq!(intake.brand, "Samsung");
    }

    #[test]
    fn test_intake_rejects_missing_fields() {
        let err = validate_service_intake(
            "",
            "9876543210",
            "a@b.com",
            DeviceType::Mobile,
            "Apple",
            "Broken",
            date("2026-09-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let err = validate_service_intake(
            "Asha",
            "9876543210",
            "a@b.com",
            DeviceType::Mobile,
            "Apple",
            "   ",
            date("2026-09-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_product_form_rules() {
        assert!(validate_product_form("AirPods Pro 2", "Apple", 2_490_000, 4.6, 25).is_ok());
        assert!(validate_product_form("", "Apple", 100, 4.0, 1).is_err());
        assert!(validate_product_form("X", "Apple", 0, 4.0, 1).is_err());
        assert!(validate_product_form("X", "Apple", 100, 5.5, 1).is_err());
        assert!(validate_product_form("X", "Apple", 100, 4.0, -1).is_err());
    }
}
