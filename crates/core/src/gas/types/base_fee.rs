use std::{fmt::Display, str::FromStr};

use alloy::primitives::{ruint::ParseError, U256};
use serde::{Deserialize, Serialize};

/// Base fee per gas of the latest (or pending) block, in wei.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseFee(U256);

impl BaseFee {
    pub fn new(base_fee: U256) -> Self {
        BaseFee(base_fee)
    }

    pub fn into_u256(self) -> U256 {
        self.0
    }
}

impl Display for BaseFee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseFee {
    type Err = ParseError;

    fn from_str(param: &str) -> Result<Self, Self::Err> {
        U256::from_str(param).map(BaseFee)
    }
}

impl From<U256> for BaseFee {
    fn from(base_fee: U256) -> Self {
        BaseFee(base_fee)
    }
}

impl From<u128> for BaseFee {
    fn from(base_fee: u128) -> Self {
        BaseFee(U256::from(base_fee))
    }
}

// Block headers carry the base fee as u64.
impl From<u64> for BaseFee {
    fn from(base_fee: u64) -> Self {
        BaseFee(U256::from(base_fee))
    }
}
