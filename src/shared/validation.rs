//! Building blocks for `validator` custom rules on loosely-typed JSON input.

use std::borrow::Cow;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Passes when `value` is a JSON string with at least one non-whitespace char
pub fn non_blank_string(
    value: &Value,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(invalid(code, message)),
    }
}

/// Passes when `value` is a JSON number inside `[min, max]`
pub fn number_in_range(
    value: &Value,
    min: f64,
    max: f64,
    code: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    match value.as_f64() {
        Some(n) if !n.is_nan() && (min..=max).contains(&n) => Ok(()),
        _ => Err(invalid(code, message)),
    }
}

/// Message of the first failing field, checking fields in the given order.
///
/// `validator` reports every failure at once; callers that promise a single
/// first-failure message use this to pick it deterministically.
pub fn first_error_message(errors: &ValidationErrors, field_order: &[&str]) -> Option<String> {
    let fields = errors.field_errors();

    field_order
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .next()
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
}
