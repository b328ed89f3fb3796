//! Per-call limits for provider requests.
//!
//! Every provider call of a scan goes through one [`CallGuard`]. The guard
//! bounds each call by the configured timeout and aborts it as soon as the
//! scan's cancellation token fires. An aborted call's future is dropped,
//! which also tears down whatever request it had in flight.

use std::future::Future;
use std::time::Duration;

use sglobal_common::inventory::ProviderError;
use tokio_util::sync::CancellationToken;

use crate::error::ScanError;

#[derive(Debug, Clone, Default)]
pub struct CallGuard {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl CallGuard {
    pub fn new(cancel: CancellationToken, timeout: Option<Duration>) -> Self {
        Self { cancel, timeout }
    }

    /// Runs one provider call, mapping provider failures through `wrap`.
    pub async fn call<T, F, W>(&self, operation: &str, fut: F, wrap: W) -> Result<T, ScanError>
    where
        F: Future<Output = Result<T, ProviderError>>,
        W: FnOnce(ProviderError) -> ScanError,
    {
        if self.cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }

        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .map_err(|_| ScanError::Timeout {
                        operation: operation.to_string(),
                        after: limit,
                    }),
                None => Ok(fut.await),
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ScanError::Cancelled),
            outcome = bounded => outcome?.map_err(wrap),
        }
    }
}
