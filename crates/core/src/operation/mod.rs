mod batch_operation;
pub use batch_operation::BatchOperation;

mod user_operation;
pub use user_operation::UserOperation;
