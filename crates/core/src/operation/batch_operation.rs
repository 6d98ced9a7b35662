use std::sync::Arc;

use alloy::primitives::U256;

/// Read-only view of the fee tolerances an operation brings into a batch.
///
/// The fee estimator only ever reads these two fields, so any operation type the
/// batch builder works with can be priced by implementing this trait.
pub trait BatchOperation {
    /// The most the operation will pay the block builder per unit of gas, in wei.
    fn max_priority_fee_per_gas(&self) -> U256;

    /// The most the operation will pay per unit of gas including the base fee, in wei.
    fn max_fee_per_gas(&self) -> U256;
}

impl<T: BatchOperation + ?Sized> BatchOperation for &T {
    fn max_priority_fee_per_gas(&self) -> U256 {
        (**self).max_priority_fee_per_gas()
    }

    fn max_fee_per_gas(&self) -> U256 {
        (**self).max_fee_per_gas()
    }
}

impl<T: BatchOperation + ?Sized> BatchOperation for Box<T> {
    fn max_priority_fee_per_gas(&self) -> U256 {
        (**self).max_priority_fee_per_gas()
    }

    fn max_fee_per_gas(&self) -> U256 {
        (**self).max_fee_per_gas()
    }
}

impl<T: BatchOperation + ?Sized> BatchOperation for Arc<T> {
    fn max_priority_fee_per_gas(&self) -> U256 {
        (**self).max_priority_fee_per_gas()
    }

    fn max_fee_per_gas(&self) -> U256 {
        (**self).max_fee_per_gas()
    }
}
