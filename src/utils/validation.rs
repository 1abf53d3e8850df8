use crate::utils::error::{ApertureError, Result};
use std::collections::HashSet;
use std::hash::Hash;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApertureError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ApertureError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Leaf widths are physical sizes in millimetres: finite and strictly positive.
pub fn validate_leaf_widths(field_name: &str, widths: &[f64]) -> Result<()> {
    validate_non_empty_list(field_name, widths)?;

    for (index, width) in widths.iter().enumerate() {
        if !width.is_finite() || *width <= 0.0 {
            return Err(ApertureError::InvalidConfigValueError {
                field: format!("{}[{}]", field_name, index),
                value: width.to_string(),
                reason: "Leaf width must be a positive finite number".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_unique<'a, T, I>(field_name: &str, values: I) -> Result<()>
where
    T: Eq + Hash + std::fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ApertureError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}
