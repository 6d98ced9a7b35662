use std::{env, fs::File, io::Read, path::Path, time::Duration};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    gas::{BatchFeeEstimator, FeeQueryContext},
    provider::{RetryClientError, RpcFeeSignalProvider},
    rbundler_error,
};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Retry-backoff settings for the JSON-RPC transport.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    #[serde(default = "default_max_rate_limit_retries")]
    pub max_rate_limit_retries: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_compute_units_per_second")]
    pub compute_units_per_second: u64,
}

fn default_max_rate_limit_retries() -> u32 {
    5000
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_compute_units_per_second() -> u64 {
    660
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_rate_limit_retries: default_max_rate_limit_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            compute_units_per_second: default_compute_units_per_second(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeeEstimatorConfig {
    pub name: String,
    pub provider_urls: Vec<String>,
    /// How long the priority fee query may take before the batch is abandoned, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl FeeEstimatorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    pub fn query_context(&self) -> FeeQueryContext {
        FeeQueryContext::new().with_deadline(self.request_timeout())
    }

    /// Fee signals are read from the first configured provider url.
    pub fn fee_signal_provider(&self) -> Result<RpcFeeSignalProvider, RetryClientError> {
        let rpc_url = self.provider_urls.first().ok_or_else(|| {
            RetryClientError::HttpProviderCantBeCreated(
                self.name.clone(),
                "no provider urls configured".to_string(),
            )
        })?;

        RpcFeeSignalProvider::from_url(rpc_url, &self.retry)
    }

    pub fn build_estimator(&self) -> Result<BatchFeeEstimator, RetryClientError> {
        let provider = self.fee_signal_provider()?;

        Ok(BatchFeeEstimator::new(std::sync::Arc::new(provider))
            .with_context(self.query_context()))
    }
}

#[derive(Error, Debug)]
pub enum ReadYamlError {
    #[error("Can not find yaml")]
    CanNotFindYaml,

    #[error("Can not read yaml")]
    CanNotReadYaml,

    #[error("Fee estimator config is invalid yaml and does not match the struct - {0}")]
    ConfigInvalidYaml(String),

    #[error("Environment variable pattern is invalid: {0}")]
    InvalidEnvironmentPattern(#[from] regex::Error),

    #[error("Environment variable {0} not found")]
    EnvironmentVariableNotFound(String),

    #[error("{0} provider urls not defined")]
    ProviderUrlsNotDefined(String),

    #[error("{0} request_timeout_ms must be greater than 0")]
    InvalidRequestTimeout(String),
}

/// Replaces every `${VAR}` in the yaml with the value of that environment variable.
fn substitute_env_variables(contents: &str) -> Result<String, ReadYamlError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let mut missing: Option<String> = None;

    let result = re
        .replace_all(contents, |caps: &Captures| match env::var(&caps[1]) {
            Ok(val) => val,
            Err(_) => {
                missing.get_or_insert_with(|| caps[1].to_string());
                String::new()
            }
        })
        .into_owned();

    if let Some(var_name) = missing {
        rbundler_error!("Environment variable {} not found", var_name);
        return Err(ReadYamlError::EnvironmentVariableNotFound(var_name));
    }

    Ok(result)
}

/// Reads and validates the fee estimator configuration yaml.
///
/// # Arguments
/// * `file_path` - Path to the yaml file
/// * `raw_yaml` - Skip `${VAR}` environment substitution when true
pub fn read(file_path: &Path, raw_yaml: bool) -> Result<FeeEstimatorConfig, ReadYamlError> {
    let mut file = File::open(file_path).map_err(|_| ReadYamlError::CanNotFindYaml)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|_| ReadYamlError::CanNotReadYaml)?;

    let substituted_contents =
        if raw_yaml { contents } else { substitute_env_variables(&contents)? };

    let config: FeeEstimatorConfig = serde_yaml::from_str(&substituted_contents)
        .map_err(|e| ReadYamlError::ConfigInvalidYaml(e.to_string()))?;

    if config.provider_urls.is_empty() {
        return Err(ReadYamlError::ProviderUrlsNotDefined(config.name));
    }

    if config.request_timeout_ms == Some(0) {
        return Err(ReadYamlError::InvalidRequestTimeout(config.name));
    }

    Ok(config)
}
