use alloy::primitives::U256;
use thiserror::Error;

/// Returned when a 256-bit fee does not fit the `u128` transaction fields alloy builds with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} of {value} wei does not fit in a u128 transaction field")]
pub struct FeeConversionError {
    pub field: &'static str,
    pub value: U256,
}

impl FeeConversionError {
    pub fn new(field: &'static str, value: U256) -> Self {
        FeeConversionError { field, value }
    }
}
