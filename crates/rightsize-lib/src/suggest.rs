//! Request and limit suggestions
//!
//! Requests mirror the observed usage. Limits add a percentage buffer on top
//! of whichever magnitude the request ended up using.

use crate::models::{ContainerUsage, SuggestionResult};
use crate::quantity::{
    QuantityError, ResourceQuantity, DEFAULT_CPU_REQUEST, DEFAULT_MEMORY_REQUEST,
};
use thiserror::Error;
use tracing::debug;

/// Default buffer applied on top of usage to derive limits
pub const DEFAULT_BUFFER_PERCENT: i64 = 20;

/// Largest buffer accepted at the configuration boundary
pub const MAX_BUFFER_PERCENT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestError {
    #[error("buffer percentage {0} is outside the accepted range 0-100")]
    InvalidBuffer(i64),

    #[error("suggested limit for {0} overflows")]
    Overflow(ResourceQuantity),

    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

/// Check a user supplied buffer percentage
pub fn validate_buffer_percent(buffer_percent: i64) -> Result<i64, SuggestError> {
    if (0..=MAX_BUFFER_PERCENT).contains(&buffer_percent) {
        Ok(buffer_percent)
    } else {
        Err(SuggestError::InvalidBuffer(buffer_percent))
    }
}

/// Scale `usage` by `1 + buffer_percent / 100`, rounding down
///
/// Integer arithmetic keeps the floor exact: `64Mi` at 20% is `76Mi`.
pub fn suggest_limit(
    usage: &ResourceQuantity,
    buffer_percent: i64,
) -> Result<ResourceQuantity, SuggestError> {
    if buffer_percent < 0 {
        return Err(SuggestError::InvalidBuffer(buffer_percent));
    }

    let scaled = u128::from(usage.magnitude) * (100 + buffer_percent as u128) / 100;
    let magnitude = u64::try_from(scaled).map_err(|_| SuggestError::Overflow(usage.clone()))?;

    Ok(ResourceQuantity::new(magnitude, usage.unit.clone()))
}

/// Derives a full set of requests and limits for a container
#[derive(Debug, Clone)]
pub struct Suggester {
    buffer_percent: i64,
}

impl Default for Suggester {
    fn default() -> Self {
        Self {
            buffer_percent: DEFAULT_BUFFER_PERCENT,
        }
    }
}

impl Suggester {
    pub fn new(buffer_percent: i64) -> Result<Self, SuggestError> {
        if buffer_percent < 0 {
            return Err(SuggestError::InvalidBuffer(buffer_percent));
        }
        Ok(Self { buffer_percent })
    }

    pub fn buffer_percent(&self) -> i64 {
        self.buffer_percent
    }

    /// Build the suggestion for one container's usage
    ///
    /// A reading without a numeric part falls back to the default request,
    /// and the limit is then scaled off that default.
    pub fn suggest(&self, usage: &ContainerUsage) -> Result<SuggestionResult, SuggestError> {
        let (cpu_request, cpu_defaulted) =
            ResourceQuantity::parse_or(&usage.cpu, DEFAULT_CPU_REQUEST)?;
        let (memory_request, memory_defaulted) =
            ResourceQuantity::parse_or(&usage.memory, DEFAULT_MEMORY_REQUEST)?;

        if cpu_defaulted || memory_defaulted {
            debug!(
                cpu = %usage.cpu,
                memory = %usage.memory,
                cpu_defaulted,
                memory_defaulted,
                "Usage reading unparseable, using default requests"
            );
        }

        let cpu_limit = suggest_limit(&cpu_request, self.buffer_percent)?;
        let memory_limit = suggest_limit(&memory_request, self.buffer_percent)?;

        Ok(SuggestionResult {
            cpu_request,
            memory_request,
            cpu_limit,
            memory_limit,
        })
    }
}
