use std::{fmt::Display, str::FromStr};

use alloy::primitives::{ruint::ParseError, U256};
use serde::{Deserialize, Serialize};

use super::FeeConversionError;

/// The `maxFeePerGas` of an EIP-1559 transaction, in wei.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxFee(U256);

impl MaxFee {
    pub fn new(value: U256) -> Self {
        MaxFee(value)
    }

    pub fn into_u256(self) -> U256 {
        self.0
    }

    /// Narrows the fee to the `u128` width alloy uses for transaction fee fields.
    pub fn try_into_u128(self) -> Result<u128, FeeConversionError> {
        u128::try_from(self.0).map_err(|_| FeeConversionError::new("max fee", self.0))
    }
}

impl Display for MaxFee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MaxFee {
    type Err = ParseError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        U256::from_str(param).map(MaxFee)
    }
}

impl From<MaxFee> for U256 {
    fn from(max_fee: MaxFee) -> Self {
        max_fee.0
    }
}

impl From<U256> for MaxFee {
    fn from(max_fee: U256) -> Self {
        MaxFee(max_fee)
    }
}

impl From<u128> for MaxFee {
    fn from(max_fee: u128) -> Self {
        MaxFee(U256::from(max_fee))
    }
}
