use std::{error::Error as StdError, fmt, time::Duration};

use alloy::primitives::U256;
use async_trait::async_trait;
use tokio::sync::watch;

/// Failure reported by a [`FeeSignalProvider`], passed through to the caller untouched.
#[derive(Debug)]
pub struct ProviderError(Box<dyn StdError + Send + Sync>);

impl ProviderError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        ProviderError(error.into())
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for ProviderError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Source of the network's current pricing signal.
///
/// Implementations must be safe to call concurrently; the estimator shares one
/// provider across every batch it prices.
#[async_trait]
pub trait FeeSignalProvider: Send + Sync {
    /// Returns the priority fee per gas the network currently suggests, in wei.
    async fn suggest_priority_fee(&self) -> Result<U256, ProviderError>;
}

/// Bounds the one network query made while pricing a batch.
///
/// Cancellation is level-triggered: once the sender side of the watch channel
/// holds `true`, every query made with this context (or a clone of it) fails.
#[derive(Debug, Clone, Default)]
pub struct FeeQueryContext {
    deadline: Option<Duration>,
    cancel: Option<watch::Receiver<bool>>,
}

impl FeeQueryContext {
    /// A context with no deadline and no cancellation signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the query with a timeout once `deadline` has elapsed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Aborts the query as soon as `cancel` observes `true`.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|cancel| *cancel.borrow())
    }

    /// Resolves once cancellation has been requested. Never resolves when there is
    /// no cancellation signal or its sender went away without cancelling.
    pub(crate) async fn cancelled(&self) {
        if let Some(cancel) = &self.cancel {
            let mut cancel = cancel.clone();
            if cancel.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }

        std::future::pending::<()>().await
    }
}
