mod batch_fee_estimator;
pub use batch_fee_estimator::{
    suggest_legacy_gas_price, suggest_max_fee, suggest_priority_fee, BatchFeeEstimator,
    FeeEstimatorError, BASE_FEE_MULTIPLIER,
};

mod batch_fee_quote;
pub use batch_fee_quote::BatchFeeQuote;

mod fee_signal;
pub use fee_signal::{FeeQueryContext, FeeSignalProvider, ProviderError};

mod types;
pub use types::*;
