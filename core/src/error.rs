use std::time::Duration;

use sglobal_common::inventory::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unable to establish provider session: {0}")]
    Session(String),

    #[error("failed to get regions: {0}")]
    RegionEnumeration(#[source] ProviderError),

    #[error("failed to describe security groups in region {region}: {source}")]
    Inventory {
        region: String,
        #[source]
        source: ProviderError,
    },

    #[error("scan cancelled")]
    Cancelled,

    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },
}
