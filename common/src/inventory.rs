//! # Security Group Inventory
//!
//! Raw security group descriptions as the provider returns them, and the
//! narrow capabilities the scanner needs from the provider.
//!
//! Every field of the raw records is optional. Provider output is not trusted
//! to be complete, and the scanner decides what a missing value means.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error reported by the provider service itself.
    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityGroup {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub ip_permissions: Vec<IpPermission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IpPermission {
    pub ip_protocol: Option<String>,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    pub ip_ranges: Vec<IpRange>,
    pub ipv6_ranges: Vec<Ipv6Range>,
    pub prefix_list_ids: Vec<PrefixListId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IpRange {
    pub cidr_ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Ipv6Range {
    pub cidr_ipv6: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrefixListId {
    pub prefix_list_id: Option<String>,
}

/// One page of a region's security group listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InventoryPage {
    pub security_groups: Vec<SecurityGroup>,
    /// Continuation token, `None` on the last page.
    pub next_token: Option<String>,
}

/// Paginated security group listing, scoped to one region.
#[async_trait]
pub trait SecurityGroupInventory: Send + Sync {
    /// Fetches the page starting at `token`, or the first page when `token` is `None`.
    async fn list_page(&self, token: Option<String>) -> Result<InventoryPage, ProviderError>;
}

/// Region enumeration through the provider's directory.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    async fn list_regions(&self) -> Result<Vec<String>, ProviderError>;
}

/// An established provider session.
pub trait ProviderSession: RegionDirectory {
    /// The region implied by the session's credentials and settings, if any.
    fn default_region(&self) -> Option<String>;

    /// Opens an inventory client bound to `region`.
    fn inventory(&self, region: &str) -> Box<dyn SecurityGroupInventory>;
}
