use std::{fmt::Display, str::FromStr};

use alloy::primitives::{ruint::ParseError, U256};
use serde::{Deserialize, Serialize};

use super::FeeConversionError;

#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxPriorityFee(U256);

impl MaxPriorityFee {
    /// Creates a new MaxPriorityFee instance.
    ///
    /// # Arguments
    /// * `value` - The maximum priority fee value in wei
    pub fn new(value: U256) -> Self {
        MaxPriorityFee(value)
    }

    /// Extracts the inner 256-bit value in wei.
    pub fn into_u256(self) -> U256 {
        self.0
    }

    /// Narrows the fee to the `u128` width alloy uses for transaction fee fields.
    ///
    /// # Returns
    /// * `Ok(u128)` - The fee in wei
    /// * `Err(FeeConversionError)` - If the fee is larger than `u128::MAX`
    pub fn try_into_u128(self) -> Result<u128, FeeConversionError> {
        u128::try_from(self.0).map_err(|_| FeeConversionError::new("max priority fee", self.0))
    }
}

impl Display for MaxPriorityFee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MaxPriorityFee {
    type Err = ParseError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        U256::from_str(param).map(MaxPriorityFee)
    }
}

impl From<MaxPriorityFee> for U256 {
    fn from(max_priority_fee: MaxPriorityFee) -> Self {
        max_priority_fee.0
    }
}

impl From<U256> for MaxPriorityFee {
    fn from(max_priority_fee: U256) -> Self {
        MaxPriorityFee(max_priority_fee)
    }
}

impl From<u128> for MaxPriorityFee {
    fn from(max_priority_fee: u128) -> Self {
        MaxPriorityFee(U256::from(max_priority_fee))
    }
}
