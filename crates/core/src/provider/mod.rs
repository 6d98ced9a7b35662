mod rpc_fee_signal;
pub use rpc_fee_signal::{
    create_retry_client, BundlerProvider, RetryClientError, RpcFeeSignalProvider,
};
