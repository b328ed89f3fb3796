//! # AWS Provider
//!
//! Reads security groups through the `aws` command-line tool, so credentials,
//! profiles and SSO sessions behave exactly as they do for the tool itself.

mod command;

pub use command::AwsCommand;

use async_trait::async_trait;
use serde::Deserialize;
use sglobal_common::inventory::{
    InventoryPage, ProviderError, ProviderSession, RegionDirectory, SecurityGroupInventory,
};
use tracing::{debug, info};

use crate::error::ScanError;

/// Page size requested from `describe-security-groups`.
const PAGE_SIZE: u32 = 1000;

const REGION_ENV_VARS: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeRegionsOutput {
    #[serde(default)]
    regions: Vec<RegionInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RegionInfo {
    region_name: Option<String>,
}

/// An AWS session resolved from the environment and the CLI's configuration.
#[derive(Debug, Clone)]
pub struct AwsCliSession {
    profile: Option<String>,
    default_region: Option<String>,
}

impl AwsCliSession {
    pub fn new(profile: Option<String>, default_region: Option<String>) -> Self {
        Self {
            profile,
            default_region,
        }
    }

    /// Establishes the session, resolving the default region.
    ///
    /// The region comes from `AWS_REGION`, then `AWS_DEFAULT_REGION`, then the
    /// profile's configured region. Fails if the `aws` tool cannot be run.
    pub async fn connect(profile: Option<String>) -> Result<Self, ScanError> {
        // Runs even when the environment names a region, so a missing tool
        // fails here rather than on the first inventory call.
        let configured = AwsCommand::new(["configure", "get", "region"])
            .opt("--profile", profile.as_deref())
            .output()
            .await;

        let default_region = resolve_region(|var| std::env::var(var).ok(), configured)?;

        match &default_region {
            Some(region) => info!("Session region is {region}"),
            None => debug!("No default region configured"),
        }

        Ok(Self::new(profile, default_region))
    }

    fn command<I, S>(&self, args: I) -> AwsCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AwsCommand::new(args).opt("--profile", self.profile.as_deref())
    }
}

/// Picks the session region from the environment, falling back to the
/// outcome of `aws configure get region`.
fn resolve_region<E>(
    env: E,
    configured: Result<String, ProviderError>,
) -> Result<Option<String>, ScanError>
where
    E: Fn(&str) -> Option<String>,
{
    let configured = match configured {
        Ok(region) if !region.is_empty() => Some(region),
        Ok(_) => None,
        // `configure get` exits non-zero when the key is unset.
        Err(ProviderError::Command { .. }) => None,
        Err(e) => return Err(ScanError::Session(e.to_string())),
    };

    let from_env = REGION_ENV_VARS
        .iter()
        .filter_map(|var| env(*var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty());

    Ok(from_env.or(configured))
}

#[async_trait]
impl RegionDirectory for AwsCliSession {
    async fn list_regions(&self) -> Result<Vec<String>, ProviderError> {
        let output: DescribeRegionsOutput = self
            .command(["ec2", "describe-regions", "--output", "json"])
            .opt("--region", self.default_region.as_deref())
            .json()
            .await?;

        Ok(output
            .regions
            .into_iter()
            .filter_map(|region| region.region_name)
            .collect())
    }
}

impl ProviderSession for AwsCliSession {
    fn default_region(&self) -> Option<String> {
        self.default_region.clone()
    }

    fn inventory(&self, region: &str) -> Box<dyn SecurityGroupInventory> {
        Box::new(AwsCliInventory {
            region: region.to_string(),
            profile: self.profile.clone(),
        })
    }
}

/// Security group listing for one region.
#[derive(Debug, Clone)]
pub struct AwsCliInventory {
    region: String,
    profile: Option<String>,
}

impl AwsCliInventory {
    fn page_command(&self, token: Option<&str>) -> AwsCommand {
        AwsCommand::new(["ec2", "describe-security-groups"])
            .opt("--profile", self.profile.as_deref())
            .opt("--region", Some(self.region.as_str()))
            .arg("--output")
            .arg("json")
            .arg("--max-items")
            .arg(PAGE_SIZE.to_string())
            .opt("--starting-token", token)
    }
}

#[async_trait]
impl SecurityGroupInventory for AwsCliInventory {
    async fn list_page(&self, token: Option<String>) -> Result<InventoryPage, ProviderError> {
        self.page_command(token.as_deref()).json().await
    }
}
