pub mod gas;
mod logger;
pub use logger::{setup_info_logger, setup_logger};
pub mod operation;
mod provider;
pub use provider::{
    create_retry_client, BundlerProvider, RetryClientError, RpcFeeSignalProvider,
};
mod environment;
pub use environment::load_env_from_project_path;
mod yaml;
pub use yaml::{read, FeeEstimatorConfig, ReadYamlError, RetryConfig, DEFAULT_REQUEST_TIMEOUT_MS};

pub use tracing::{error as rbundler_error, info as rbundler_info};
