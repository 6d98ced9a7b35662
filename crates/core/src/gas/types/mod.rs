mod base_fee;
pub use base_fee::BaseFee;

mod fee_conversion_error;
pub use fee_conversion_error::FeeConversionError;

mod gas_price;
pub use gas_price::GasPrice;

mod max_fee;
pub use max_fee::MaxFee;

mod max_priority_fee;
pub use max_priority_fee::MaxPriorityFee;
