//! Kubernetes resource quantity parsing
//!
//! Quantities are handled as an integer magnitude plus the unit suffix the
//! cluster reported (`250m`, `64Mi`, `1204531n`). The suffix is carried through
//! unchanged so that a suggestion keeps the unit of the usage it came from.
//! Fractional and exponent forms are rejected instead of truncated, as are
//! leading zeros, so every accepted string formats back to itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Request used when the CPU usage reading has no numeric part
pub const DEFAULT_CPU_REQUEST: &str = "10m";

/// Request used when the memory usage reading has no numeric part
pub const DEFAULT_MEMORY_REQUEST: &str = "32Mi";

/// Errors raised while parsing a quantity string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity '{0}' has no numeric magnitude")]
    MissingMagnitude(String),

    #[error("quantity '{0}' is fractional; only integer magnitudes are supported")]
    Fractional(String),

    #[error("quantity '{0}' has a leading zero")]
    LeadingZero(String),

    #[error("quantity '{0}' has an invalid unit suffix")]
    InvalidUnit(String),

    #[error("quantity '{0}' does not fit in 64 bits")]
    Overflow(String),
}

/// An integer magnitude with its unit suffix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceQuantity {
    pub magnitude: u64,
    pub unit: String,
}

impl ResourceQuantity {
    pub fn new(magnitude: u64, unit: impl Into<String>) -> Self {
        Self {
            magnitude,
            unit: unit.into(),
        }
    }

    /// Parse a quantity such as `250m`, `64Mi` or `2`
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }

        let split = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, unit) = input.split_at(split);

        if unit.contains('.') {
            return Err(QuantityError::Fractional(input.to_string()));
        }
        if digits.is_empty() {
            return Err(QuantityError::MissingMagnitude(input.to_string()));
        }
        // "007m" would otherwise re-format as "7m"
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(QuantityError::LeadingZero(input.to_string()));
        }
        if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(QuantityError::InvalidUnit(input.to_string()));
        }

        let magnitude = digits
            .parse::<u64>()
            .map_err(|_| QuantityError::Overflow(input.to_string()))?;

        Ok(Self::new(magnitude, unit))
    }

    /// Parse `input`, falling back to `default` when it cannot be parsed
    ///
    /// Returns the quantity and whether the fallback was taken.
    pub fn parse_or(input: &str, default: &str) -> Result<(Self, bool), QuantityError> {
        match Self::parse(input) {
            Ok(quantity) => Ok((quantity, false)),
            Err(_) => Self::parse(default).map(|quantity| (quantity, true)),
        }
    }

    /// Render back into the cluster's textual form
    pub fn format(&self) -> String {
        format!("{}{}", self.magnitude, self.unit)
    }
}

impl fmt::Display for ResourceQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

impl FromStr for ResourceQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceQuantity {
    type Error = QuantityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceQuantity> for String {
    fn from(quantity: ResourceQuantity) -> Self {
        quantity.format()
    }
}
