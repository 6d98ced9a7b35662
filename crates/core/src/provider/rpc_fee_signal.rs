use std::sync::Arc;

use alloy::{
    consensus::BlockHeader,
    eips::BlockNumberOrTag,
    network::{AnyNetwork, BlockResponse},
    primitives::U256,
    providers::{Provider, RootProvider},
    rpc::client::ClientBuilder,
    transports::{http::reqwest::Url, layers::RetryBackoffLayer},
};
use async_trait::async_trait;
use thiserror::Error;

use crate::{
    gas::{BaseFee, FeeSignalProvider, GasPrice, ProviderError},
    rbundler_info,
    yaml::RetryConfig,
};

pub type BundlerProvider = RootProvider<AnyNetwork>;

#[derive(Error, Debug)]
pub enum RetryClientError {
    #[error("http provider cant be created for {0}: {1}")]
    HttpProviderCantBeCreated(String, String),
}

/// Creates an HTTP JSON-RPC provider whose transport retries rate limited requests.
pub fn create_retry_client(
    rpc_url: &str,
    retry: &RetryConfig,
) -> Result<Arc<BundlerProvider>, RetryClientError> {
    let url = Url::parse(rpc_url).map_err(|e| {
        RetryClientError::HttpProviderCantBeCreated(rpc_url.to_string(), e.to_string())
    })?;

    let retry_layer = RetryBackoffLayer::new(
        retry.max_rate_limit_retries,
        retry.initial_backoff_ms,
        retry.compute_units_per_second,
    );
    let client = ClientBuilder::default().layer(retry_layer).http(url);

    Ok(Arc::new(RootProvider::new(client)))
}

/// Reads the network's fee signals over JSON-RPC.
#[derive(Clone)]
pub struct RpcFeeSignalProvider {
    provider: Arc<BundlerProvider>,
}

impl RpcFeeSignalProvider {
    pub fn new(provider: Arc<BundlerProvider>) -> Self {
        RpcFeeSignalProvider { provider }
    }

    pub fn from_url(rpc_url: &str, retry: &RetryConfig) -> Result<Self, RetryClientError> {
        let provider = create_retry_client(rpc_url, retry)?;
        rbundler_info!("Fee signals will be read from {}", rpc_url);
        Ok(Self::new(provider))
    }

    pub fn rpc_client(&self) -> Arc<BundlerProvider> {
        self.provider.clone()
    }

    /// Base fee per gas of the latest block.
    ///
    /// # Returns
    /// * `Ok(BaseFee)` - The latest block's base fee in wei
    /// * `Err(ProviderError)` - If the block can not be fetched or predates EIP-1559
    pub async fn latest_base_fee(&self) -> Result<BaseFee, ProviderError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(ProviderError::new)?
            .ok_or_else(|| ProviderError::new("Latest block not found"))?;

        let base_fee = block
            .header()
            .base_fee_per_gas()
            .ok_or_else(|| ProviderError::new("EIP-1559 not supported"))?;

        Ok(BaseFee::from(base_fee))
    }

    /// Legacy gas price suggested by the node (`eth_gasPrice`).
    pub async fn gas_price(&self) -> Result<GasPrice, ProviderError> {
        let gas_price = self.provider.get_gas_price().await.map_err(ProviderError::new)?;

        Ok(GasPrice::from(gas_price))
    }
}

#[async_trait]
impl FeeSignalProvider for RpcFeeSignalProvider {
    async fn suggest_priority_fee(&self) -> Result<U256, ProviderError> {
        let tip = self.provider.get_max_priority_fee_per_gas().await.map_err(ProviderError::new)?;

        Ok(U256::from(tip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_rpc_url() {
        let result = create_retry_client("not a url", &RetryConfig::default());

        assert!(matches!(
            result,
            Err(RetryClientError::HttpProviderCantBeCreated(url, _)) if url == "not a url"
        ));
    }

    #[test]
    fn test_creates_provider_for_valid_url() {
        let provider =
            RpcFeeSignalProvider::from_url("http://localhost:8545", &RetryConfig::default());

        assert!(provider.is_ok());
    }
}
