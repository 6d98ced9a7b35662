use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::BatchOperation;
use crate::gas::{MaxFee, MaxPriorityFee};

/// An ERC-4337 user operation as submitted to the bundler (entry point v0.6 layout).
///
/// The fee estimator only reads `max_fee_per_gas` and `max_priority_fee_per_gas`;
/// the remaining fields are carried so the batch builder can work with one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

impl UserOperation {
    pub fn max_fee(&self) -> MaxFee {
        MaxFee::new(self.max_fee_per_gas)
    }

    pub fn max_priority_fee(&self) -> MaxPriorityFee {
        MaxPriorityFee::new(self.max_priority_fee_per_gas)
    }
}

impl BatchOperation for UserOperation {
    fn max_priority_fee_per_gas(&self) -> U256 {
        self.max_priority_fee_per_gas
    }

    fn max_fee_per_gas(&self) -> U256 {
        self.max_fee_per_gas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_deserializes_rpc_user_operation() {
        let json = r#"{
            "sender": "0x742d35Cc6aF6C5C8c3C4B4C8e1A36F1c57F1b8Ff",
            "nonce": "0x1",
            "initCode": "0x",
            "callData": "0xb61d27f6",
            "callGasLimit": "0x5208",
            "verificationGasLimit": "0x186a0",
            "preVerificationGas": "0xc350",
            "maxFeePerGas": "0x59682f00",
            "maxPriorityFeePerGas": "0x3b9aca00",
            "paymasterAndData": "0x",
            "signature": "0xdeadbeef"
        }"#;

        let op: UserOperation = serde_json::from_str(json).unwrap();

        assert_eq!(op.sender, address!("742d35Cc6aF6C5C8c3C4B4C8e1A36F1c57F1b8Ff"));
        assert_eq!(op.max_fee_per_gas(), U256::from(1_500_000_000u64));
        assert_eq!(op.max_priority_fee_per_gas(), U256::from(1_000_000_000u64));
        assert_eq!(op.max_fee(), MaxFee::from(1_500_000_000u128));
        assert!(op.init_code.is_empty());
    }

    #[test]
    fn test_serializes_camel_case_fee_fields() {
        let op = UserOperation {
            sender: Address::ZERO,
            nonce: U256::ZERO,
            init_code: Bytes::new(),
            call_data: Bytes::new(),
            call_gas_limit: U256::ZERO,
            verification_gas_limit: U256::ZERO,
            pre_verification_gas: U256::ZERO,
            max_fee_per_gas: U256::from(300),
            max_priority_fee_per_gas: U256::from(5),
            paymaster_and_data: Bytes::new(),
            signature: Bytes::new(),
        };

        let value = serde_json::to_value(&op).unwrap();

        assert_eq!(value["maxFeePerGas"], "0x12c");
        assert_eq!(value["maxPriorityFeePerGas"], "0x5");
    }
}
