use std::{fmt::Display, str::FromStr};

use alloy::primitives::{ruint::ParseError, U256};
use serde::{Deserialize, Serialize};

use super::FeeConversionError;

/// Legacy (pre EIP-1559) gas price, in wei.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GasPrice(U256);

impl GasPrice {
    pub fn new(gas_price: U256) -> Self {
        GasPrice(gas_price)
    }

    pub fn into_u256(self) -> U256 {
        self.0
    }

    pub fn try_into_u128(self) -> Result<u128, FeeConversionError> {
        u128::try_from(self.0).map_err(|_| FeeConversionError::new("gas price", self.0))
    }
}

impl Display for GasPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GasPrice {
    type Err = ParseError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        U256::from_str(param).map(GasPrice)
    }
}

impl From<GasPrice> for U256 {
    fn from(gas_price: GasPrice) -> Self {
        gas_price.0
    }
}

impl From<U256> for GasPrice {
    fn from(gas_price: U256) -> Self {
        GasPrice(gas_price)
    }
}

impl From<u128> for GasPrice {
    fn from(gas_price: u128) -> Self {
        GasPrice(U256::from(gas_price))
    }
}
