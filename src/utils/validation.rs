use crate::utils::error::{MarketError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MarketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MarketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(MarketError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names(field_name: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name.as_str()) {
            return Err(MarketError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MarketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MarketError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Market inputs are rejected rather than clamped; NaN fails the range check.
pub fn validate_fraction(field_name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MarketError::invalid_input(
            field_name,
            value,
            "must be a fraction within [0, 1]",
        ));
    }
    Ok(())
}

pub fn validate_count(field_name: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| MarketError::invalid_input(field_name, value, "count cannot be negative"))
}

pub fn validate_ordered_bounds(field_name: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(MarketError::invalid_input(
            field_name,
            format!("{}..={}", min, max),
            "bounds must be finite",
        ));
    }
    if min > max {
        return Err(MarketError::invalid_input(
            field_name,
            format!("{}..={}", min, max),
            "lower bound exceeds upper bound",
        ));
    }
    Ok(())
}
