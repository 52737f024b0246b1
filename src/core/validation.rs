//! Form checks applied before calling into the ledger.
//!
//! The ledger accepts whatever it is given; these rules are what the
//! inventory and usage forms enforce on the user's input first.

use crate::core::spool::Spool;
use std::fmt;

/// Longest accepted material name, in characters
pub const MAX_MATERIAL_LENGTH: usize = 32;
/// Longest accepted color or brand name, in characters
pub const MAX_NAME_LENGTH: usize = 64;
/// Longest accepted print name, in characters
pub const MAX_PRINT_NAME_LENGTH: usize = 100;

/// Why a form submission was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// A required text field was blank
    MissingField(&'static str),
    /// A text field was longer than its limit
    TooLong {
        /// Field label
        field: &'static str,
        /// Limit in characters
        max: usize,
    },
    /// Weight was zero, negative, or not a number
    InvalidWeight(f64),
    /// Swatch was not `#rrggbb`
    InvalidColorHex(String),
    /// The spool cannot take prints (not active, or out of filament)
    SpoolUnavailable,
    /// More filament requested than the spool has left
    InsufficientFilament {
        /// Grams left on the spool
        remaining: f64,
        /// Grams requested
        requested: f64,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::InvalidWeight(weight) => {
                write!(f, "weight must be a positive number of grams (got {weight})")
            }
            Self::InvalidColorHex(hex) => write!(f, "'{hex}' is not a #rrggbb color"),
            Self::SpoolUnavailable => f.write_str("that spool is not active or is already empty"),
            Self::InsufficientFilament {
                remaining,
                requested,
            } => write!(
                f,
                "only {remaining:.0}g left on that spool, but {requested:.0}g was requested"
            ),
        }
    }
}

/// Checks the new-spool form.
pub fn validate_new_spool(
    material: &str,
    color: &str,
    color_hex: &str,
    brand: &str,
    weight: f64,
) -> Result<(), FormError> {
    require("Material", material, MAX_MATERIAL_LENGTH)?;
    require("Color", color, MAX_NAME_LENGTH)?;
    require("Brand", brand, MAX_NAME_LENGTH)?;
    positive_weight(weight)?;
    if !is_hex_color(color_hex) {
        return Err(FormError::InvalidColorHex(color_hex.to_string()));
    }
    Ok(())
}

/// Checks the usage form against the selected spool.
pub fn validate_print_usage(spool: &Spool, print_name: &str, weight_used: f64) -> Result<(), FormError> {
    require("Print name", print_name, MAX_PRINT_NAME_LENGTH)?;
    positive_weight(weight_used)?;
    if !spool.is_selectable() {
        return Err(FormError::SpoolUnavailable);
    }
    if weight_used > spool.current_weight {
        return Err(FormError::InsufficientFilament {
            remaining: spool.current_weight,
            requested: weight_used,
        });
    }
    Ok(())
}

/// `#` followed by exactly six hex digits.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

fn require(field: &'static str, value: &str, max: usize) -> Result<(), FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(())
}

fn positive_weight(weight: f64) -> Result<(), FormError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(FormError::InvalidWeight(weight));
    }
    Ok(())
}
