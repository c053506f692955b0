//! Explicit request validation.
//!
//! The bounds live here as constants and every rule reports a field-level
//! message; the gateway runs [`validate`] before a request value can reach
//! the lifecycle service, and collects all failures instead of stopping at
//! the first.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::types::DepositRequest;

pub const ACCOUNT_NUMBER_MIN_LEN: usize = 8;
pub const ACCOUNT_NUMBER_MAX_LEN: usize = 20;
pub const CURRENCY_LEN: usize = 3;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const AMOUNT_MAX_FRACTION_DIGITS: u32 = 2;
pub const AMOUNT_MAX_INTEGER_DIGITS: u32 = 15;

/// Exclusive upper bound for amounts: 10^15
static AMOUNT_LIMIT: Lazy<Decimal> = Lazy::new(|| Decimal::from(1_000_000_000_000_000u64));

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(value_type = String, example = "accountNumber")]
    pub field: &'static str,
    #[schema(value_type = String, example = "Account number is required")]
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Check a creation request against the field rules.
///
/// Returns every violation, not just the first one.
pub fn validate(request: &DepositRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    validate_account_number(&request.account_number, &mut errors);
    validate_amount(request.amount, &mut errors);
    validate_currency(&request.currency, &mut errors);
    validate_description(request.description.as_deref(), &mut errors);

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn validate_account_number(account_number: &str, errors: &mut Vec<FieldError>) {
    if account_number.is_empty() {
        errors.push(FieldError::new("accountNumber", "Account number is required"));
        return;
    }
    let len = account_number.chars().count();
    if !(ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN).contains(&len) {
        errors.push(FieldError::new(
            "accountNumber",
            "Account number must be between 8 and 20 characters",
        ));
    }
    if !account_number
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        errors.push(FieldError::new(
            "accountNumber",
            "Account number must contain only uppercase letters and numbers",
        ));
    }
}

fn validate_amount(amount: Decimal, errors: &mut Vec<FieldError>) {
    if amount <= Decimal::ZERO {
        errors.push(FieldError::new("amount", "Amount must be greater than 0"));
        return;
    }
    // normalize() drops trailing zeros, so "10.00" counts as 0 fraction digits
    if amount.normalize().scale() > AMOUNT_MAX_FRACTION_DIGITS {
        errors.push(FieldError::new(
            "amount",
            "Amount must have at most 2 decimal places",
        ));
    }
    if amount >= *AMOUNT_LIMIT {
        errors.push(FieldError::new(
            "amount",
            "Amount must have at most 15 integer digits",
        ));
    }
}

fn validate_currency(currency: &str, errors: &mut Vec<FieldError>) {
    if currency.is_empty() {
        errors.push(FieldError::new("currency", "Currency is required"));
        return;
    }
    if currency.chars().count() != CURRENCY_LEN
        || !currency.chars().all(|c| c.is_ascii_uppercase())
    {
        errors.push(FieldError::new(
            "currency",
            "Currency must be uppercase ISO currency code",
        ));
    }
}

fn validate_description(description: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(text) = description {
        if text.chars().count() > DESCRIPTION_MAX_LEN {
            errors.push(FieldError::new(
                "description",
                "Description must not exceed 500 characters",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request(account: &str, amount: &str, currency: &str) -> DepositRequest {
        DepositRequest {
            account_number: account.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            currency: currency.to_string(),
            description: None,
        }
    }

    fn messages_for(errors: &[FieldError], field: &str) -> Vec<&'static str> {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request("ACC123456789", "1000.00", "USD")).is_ok());
        assert!(validate(&request("12345678", "0.01", "EUR")).is_ok());
        // 20 chars, amount with trailing zeros beyond scale 2 after normalize
        assert!(validate(&request("A2345678901234567890", "10.100", "GBP")).is_ok());
    }

    #[test]
    fn test_account_number_rules() {
        let errs = validate(&request("", "10.00", "USD")).unwrap_err();
        assert_eq!(
            messages_for(&errs, "accountNumber"),
            vec!["Account number is required"]
        );

        let errs = validate(&request("ACC1", "10.00", "USD")).unwrap_err();
        assert_eq!(
            messages_for(&errs, "accountNumber"),
            vec!["Account number must be between 8 and 20 characters"]
        );

        let errs = validate(&request("acc123456789", "10.00", "USD")).unwrap_err();
        assert_eq!(
            messages_for(&errs, "accountNumber"),
            vec!["Account number must contain only uppercase letters and numbers"]
        );

        // both length and charset wrong: two findings
        let errs = validate(&request("abc-1", "10.00", "USD")).unwrap_err();
        assert_eq!(messages_for(&errs, "accountNumber").len(), 2);
    }

    #[test]
    fn test_amount_rules() {
        let errs = validate(&request("ACC123456789", "0", "USD")).unwrap_err();
        assert_eq!(messages_for(&errs, "amount"), vec!["Amount must be greater than 0"]);

        let errs = validate(&request("ACC123456789", "-5.00", "USD")).unwrap_err();
        assert_eq!(messages_for(&errs, "amount"), vec!["Amount must be greater than 0"]);

        let errs = validate(&request("ACC123456789", "10.005", "USD")).unwrap_err();
        assert_eq!(
            messages_for(&errs, "amount"),
            vec!["Amount must have at most 2 decimal places"]
        );

        let errs = validate(&request("ACC123456789", "1000000000000000", "USD")).unwrap_err();
        assert_eq!(
            messages_for(&errs, "amount"),
            vec!["Amount must have at most 15 integer digits"]
        );

        // just below the limit is fine
        assert!(validate(&request("ACC123456789", "999999999999999.99", "USD")).is_ok());
    }

    #[test]
    fn test_currency_rules() {
        for bad in ["", "usd", "US", "USDT", "U5D"] {
            let errs = validate(&request("ACC123456789", "10.00", bad)).unwrap_err();
            assert_eq!(messages_for(&errs, "currency").len(), 1, "currency {bad:?}");
        }
    }

    #[test]
    fn test_description_rule() {
        let mut req = request("ACC123456789", "10.00", "USD");
        req.description = Some("x".repeat(DESCRIPTION_MAX_LEN));
        assert!(validate(&req).is_ok());

        req.description = Some("x".repeat(DESCRIPTION_MAX_LEN + 1));
        let errs = validate(&req).unwrap_err();
        assert_eq!(
            messages_for(&errs, "description"),
            vec!["Description must not exceed 500 characters"]
        );
    }

    #[test]
    fn test_all_violations_are_collected() {
        let mut req = request("bad", "0", "usd");
        req.description = Some("x".repeat(501));
        let errs = validate(&req).unwrap_err();
        let fields: Vec<&str> = errs.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"accountNumber"));
        assert!(fields.contains(&"amount"));
        assert!(fields.contains(&"currency"));
        assert!(fields.contains(&"description"));
    }
}
