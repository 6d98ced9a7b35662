use alloy::eips::eip1559::Eip1559Estimation;
use serde::{Deserialize, Serialize};

use super::types::{FeeConversionError, MaxFee, MaxPriorityFee};

/// Both EIP-1559 fee fields chosen for one bundle transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFeeQuote {
    #[serde(rename = "maxPriorityFee")]
    pub max_priority_fee: MaxPriorityFee,

    #[serde(rename = "maxFee")]
    pub max_fee: MaxFee,
}

impl BatchFeeQuote {
    /// Converts the quote into the fee fields alloy's transaction builders take.
    ///
    /// # Returns
    /// * `Ok(Eip1559Estimation)` - Ready to apply to a `TransactionRequest`
    /// * `Err(FeeConversionError)` - If either fee is larger than `u128::MAX`
    pub fn try_into_eip1559_estimation(self) -> Result<Eip1559Estimation, FeeConversionError> {
        Ok(Eip1559Estimation {
            max_fee_per_gas: self.max_fee.try_into_u128()?,
            max_priority_fee_per_gas: self.max_priority_fee.try_into_u128()?,
        })
    }
}

impl TryFrom<BatchFeeQuote> for Eip1559Estimation {
    type Error = FeeConversionError;

    fn try_from(quote: BatchFeeQuote) -> Result<Self, Self::Error> {
        quote.try_into_eip1559_estimation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_converts_to_eip1559_estimation() {
        let quote = BatchFeeQuote {
            max_priority_fee: MaxPriorityFee::from(1_500_000_000u128),
            max_fee: MaxFee::from(30_000_000_000u128),
        };

        let estimation = Eip1559Estimation::try_from(quote).unwrap();

        assert_eq!(estimation.max_fee_per_gas, 30_000_000_000);
        assert_eq!(estimation.max_priority_fee_per_gas, 1_500_000_000);
    }

    #[test]
    fn test_conversion_rejects_values_above_u128() {
        let quote = BatchFeeQuote {
            max_priority_fee: MaxPriorityFee::from(1u128),
            max_fee: MaxFee::new(U256::from(u128::MAX) + U256::from(1)),
        };

        let err = quote.try_into_eip1559_estimation().unwrap_err();

        assert_eq!(err.field, "max fee");
    }
}
