use std::{sync::Arc, time::Duration};

use alloy::primitives::{Uint, U256};
use thiserror::Error;
use tracing::{debug, error};

use super::{
    batch_fee_quote::BatchFeeQuote,
    fee_signal::{FeeQueryContext, FeeSignalProvider, ProviderError},
    types::{BaseFee, GasPrice, MaxFee, MaxPriorityFee},
};
use crate::operation::BatchOperation;

/// Sums are accumulated at twice the width of a fee so no batch can overflow them.
type U512 = Uint<512, 8>;

/// The network floor for `maxFeePerGas` is this many times the current base fee.
pub const BASE_FEE_MULTIPLIER: u64 = 2;

#[derive(Error, Debug)]
pub enum FeeEstimatorError {
    #[error("Can not work out fees for an empty batch")]
    EmptyBatch,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Fee signal query did not complete within {0:?}")]
    Timeout(Duration),

    #[error("Fee signal query was cancelled")]
    Cancelled,

    #[error("{0} does not fit in 256 bits")]
    FeeOverflow(&'static str),
}

fn widen(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(value.as_limbs());
    U512::from_limbs(limbs)
}

fn narrow(value: U512, field: &'static str) -> Result<U256, FeeEstimatorError> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(FeeEstimatorError::FeeOverflow(field));
    }

    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Floor of the arithmetic mean of `fee` across the batch.
fn batch_mean<O, F>(batch: &[O], fee: F) -> Result<U256, FeeEstimatorError>
where
    F: Fn(&O) -> U256,
{
    if batch.is_empty() {
        return Err(FeeEstimatorError::EmptyBatch);
    }

    let sum = batch.iter().fold(U512::ZERO, |sum, op| sum + widen(fee(op)));
    let mean = sum / U512::from_limbs([batch.len() as u64, 0, 0, 0, 0, 0, 0, 0]);

    // the mean is never above the largest fee in the batch, so this can not fail
    narrow(mean, "batch mean")
}

/// Picks the batch mean only when it is strictly greater, ties go to the network value.
fn prefer_network(network: U256, batch_mean: U256) -> U256 {
    if batch_mean > network {
        batch_mean
    } else {
        network
    }
}

async fn query_priority_fee<P>(
    provider: &P,
    context: &FeeQueryContext,
) -> Result<U256, FeeEstimatorError>
where
    P: FeeSignalProvider + ?Sized,
{
    if context.is_cancelled() {
        return Err(FeeEstimatorError::Cancelled);
    }

    let query = async {
        match context.deadline() {
            Some(deadline) => {
                match tokio::time::timeout(deadline, provider.suggest_priority_fee()).await {
                    Ok(result) => result.map_err(FeeEstimatorError::from),
                    Err(_) => Err(FeeEstimatorError::Timeout(deadline)),
                }
            }
            None => provider.suggest_priority_fee().await.map_err(FeeEstimatorError::from),
        }
    };

    tokio::select! {
        result = query => result,
        _ = context.cancelled() => Err(FeeEstimatorError::Cancelled),
    }
}

/// Suggests the `maxPriorityFeePerGas` for the transaction carrying `batch`.
///
/// Returns the larger of the priority fee the network suggests and the mean
/// `maxPriorityFeePerGas` of the batch. An individual operation can still end up
/// below the result when the batch's tolerances are far apart; dropping those
/// operations is up to whoever built the batch.
///
/// # Arguments
/// * `provider` - Source of the network's suggested priority fee, queried once
/// * `batch` - The operations going into the transaction, must not be empty
/// * `context` - Deadline and cancellation for the network query
///
/// # Returns
/// * `Ok(MaxPriorityFee)` - The priority fee to set on the transaction
/// * `Err(FeeEstimatorError)` - Empty batch, or the query failed, timed out or was cancelled
pub async fn suggest_priority_fee<P, O>(
    provider: &P,
    batch: &[O],
    context: &FeeQueryContext,
) -> Result<MaxPriorityFee, FeeEstimatorError>
where
    P: FeeSignalProvider + ?Sized,
    O: BatchOperation,
{
    if batch.is_empty() {
        return Err(FeeEstimatorError::EmptyBatch);
    }

    let tip = query_priority_fee(provider, context).await?;
    let mean = batch_mean(batch, |op| op.max_priority_fee_per_gas())?;

    Ok(MaxPriorityFee::new(prefer_network(tip, mean)))
}

/// Suggests the `maxFeePerGas` for the transaction carrying `batch`.
///
/// Returns the larger of twice the base fee and the mean `maxFeePerGas` of the
/// batch. Doubling the base fee keeps the transaction valid through several
/// consecutive full blocks.
pub fn suggest_max_fee<O>(base_fee: BaseFee, batch: &[O]) -> Result<MaxFee, FeeEstimatorError>
where
    O: BatchOperation,
{
    let mean = batch_mean(batch, |op| op.max_fee_per_gas())?;
    let floor = narrow(
        widen(base_fee.into_u256()) * U512::from_limbs([BASE_FEE_MULTIPLIER, 0, 0, 0, 0, 0, 0, 0]),
        "base fee floor",
    )?;

    Ok(MaxFee::new(prefer_network(floor, mean)))
}

/// Suggests the gas price for a legacy transaction carrying `batch`.
///
/// Returns the larger of `gas_price` and the mean `maxFeePerGas` of the batch.
pub fn suggest_legacy_gas_price<O>(
    gas_price: GasPrice,
    batch: &[O],
) -> Result<GasPrice, FeeEstimatorError>
where
    O: BatchOperation,
{
    let mean = batch_mean(batch, |op| op.max_fee_per_gas())?;

    Ok(GasPrice::new(prefer_network(gas_price.into_u256(), mean)))
}

/// Prices batches against one fee signal provider.
///
/// Every call is independent; the handle only holds the provider and the context
/// each network query runs under, so it can be cloned freely across tasks.
#[derive(Clone)]
pub struct BatchFeeEstimator {
    provider: Arc<dyn FeeSignalProvider>,
    context: FeeQueryContext,
}

impl BatchFeeEstimator {
    pub fn new(provider: Arc<dyn FeeSignalProvider>) -> Self {
        BatchFeeEstimator { provider, context: FeeQueryContext::new() }
    }

    pub fn with_context(mut self, context: FeeQueryContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> &FeeQueryContext {
        &self.context
    }

    pub async fn suggest_priority_fee<O>(
        &self,
        batch: &[O],
    ) -> Result<MaxPriorityFee, FeeEstimatorError>
    where
        O: BatchOperation + Sync,
    {
        match suggest_priority_fee(self.provider.as_ref(), batch, &self.context).await {
            Ok(max_priority_fee) => {
                debug!(
                    "Suggested max priority fee {} for batch of {} operations",
                    max_priority_fee,
                    batch.len()
                );
                Ok(max_priority_fee)
            }
            Err(e) => {
                error!("Failed to suggest max priority fee for batch of {}: {}", batch.len(), e);
                Err(e)
            }
        }
    }

    pub fn suggest_max_fee<O>(
        &self,
        base_fee: BaseFee,
        batch: &[O],
    ) -> Result<MaxFee, FeeEstimatorError>
    where
        O: BatchOperation,
    {
        match suggest_max_fee(base_fee, batch) {
            Ok(max_fee) => {
                debug!(
                    "Suggested max fee {} for batch of {} operations (base fee {})",
                    max_fee,
                    batch.len(),
                    base_fee
                );
                Ok(max_fee)
            }
            Err(e) => {
                error!("Failed to suggest max fee for batch of {}: {}", batch.len(), e);
                Err(e)
            }
        }
    }

    pub fn suggest_legacy_gas_price<O>(
        &self,
        gas_price: GasPrice,
        batch: &[O],
    ) -> Result<GasPrice, FeeEstimatorError>
    where
        O: BatchOperation,
    {
        match suggest_legacy_gas_price(gas_price, batch) {
            Ok(suggested) => {
                debug!(
                    "Suggested gas price {} for batch of {} operations (network gas price {})",
                    suggested,
                    batch.len(),
                    gas_price
                );
                Ok(suggested)
            }
            Err(e) => {
                error!("Failed to suggest gas price for batch of {}: {}", batch.len(), e);
                Err(e)
            }
        }
    }

    /// Works out both EIP-1559 fee fields for the transaction carrying `batch`.
    ///
    /// The max fee is checked first so a batch that can not be priced never costs
    /// a network round trip.
    pub async fn suggest_eip1559_fees<O>(
        &self,
        base_fee: BaseFee,
        batch: &[O],
    ) -> Result<BatchFeeQuote, FeeEstimatorError>
    where
        O: BatchOperation + Sync,
    {
        let max_fee = self.suggest_max_fee(base_fee, batch)?;
        let max_priority_fee = self.suggest_priority_fee(batch).await?;

        Ok(BatchFeeQuote { max_priority_fee, max_fee })
    }
}
