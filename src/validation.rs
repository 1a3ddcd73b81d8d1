//! Parameter constraints checked when a method descriptor is built.
//!
//! Nothing here performs I/O; a failed check means no request is ever
//! produced.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::QiwiError;

/// Longest window the payment-history endpoints accept.
pub const MAX_HISTORY_SPAN_DAYS: i64 = 90;

/// Fail if the two dates are more than [`MAX_HISTORY_SPAN_DAYS`] apart, in either order.
pub fn check_date_span(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<(), QiwiError> {
    let span = (*end - *start).abs();
    if span > TimeDelta::days(MAX_HISTORY_SPAN_DAYS) {
        return Err(QiwiError::Validation(format!(
            "the maximum period for downloading statistics is {MAX_HISTORY_SPAN_DAYS} calendar days, got {} days",
            span.num_days()
        )));
    }
    Ok(())
}

/// Fail unless both fields are set or both are unset.
pub fn check_paired<A, B>(
    first: &Option<A>,
    first_name: &str,
    second: &Option<B>,
    second_name: &str,
) -> Result<(), QiwiError> {
    match (first.is_some(), second.is_some()) {
        (true, false) | (false, true) => Err(QiwiError::Validation(format!(
            "{first_name} and {second_name} must be passed together"
        ))),
        _ => Ok(()),
    }
}

/// Fail if both mutually exclusive fields are set.
pub fn check_exclusive<A, B>(
    first: &Option<A>,
    first_name: &str,
    second: &Option<B>,
    second_name: &str,
) -> Result<(), QiwiError> {
    if first.is_some() && second.is_some() {
        return Err(QiwiError::Validation(format!(
            "{first_name} and {second_name} are mutually exclusive"
        )));
    }
    Ok(())
}

pub fn require<T>(value: Option<T>, name: &str) -> Result<T, QiwiError> {
    value.ok_or_else(|| QiwiError::Validation(format!("{name} is required")))
}

pub fn require_non_empty(value: &str, name: &str) -> Result<(), QiwiError> {
    if value.trim().is_empty() {
        return Err(QiwiError::Validation(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Amounts must be finite and strictly positive.
pub fn check_amount(amount: f64) -> Result<(), QiwiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(QiwiError::Validation(format!(
            "amount must be a positive number, got {amount}"
        )));
    }
    Ok(())
}

pub fn check_range(value: u32, min: u32, max: u32, name: &str) -> Result<(), QiwiError> {
    if !(min..=max).contains(&value) {
        return Err(QiwiError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

pub fn check_max_chars(value: &str, max: usize, name: &str) -> Result<(), QiwiError> {
    let len = value.chars().count();
    if len > max {
        return Err(QiwiError::Validation(format!(
            "{name} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}
