//! # Scan Orchestrator
//!
//! Implements the "scan for global access" use case.
//!
//! The orchestrator resolves which regions to scan, then scans them one after
//! another through the [`ProviderSession`]. Any failure ends the whole run
//! and nothing gathered up to that point is returned.

use sglobal_common::exclusion::ExclusionSet;
use sglobal_common::inventory::ProviderSession;
use sglobal_common::models::SecurityGroupResult;
use tracing::{debug, info};

use crate::error::ScanError;
use crate::guard::CallGuard;
use crate::scanner;

pub const ALL_REGIONS: &str = "all";

/// Which regions a scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelector {
    /// The region of the active session.
    SessionDefault,
    /// Every region the provider directory lists.
    All,
    /// Exactly one named region.
    Named(String),
}

impl From<&str> for RegionSelector {
    fn from(value: &str) -> Self {
        match value {
            "" => Self::SessionDefault,
            ALL_REGIONS => Self::All,
            region => Self::Named(region.to_string()),
        }
    }
}

/// Called with `(region, index, total)` before each region is scanned.
pub type RegionCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

pub struct ScanOrchestrator {
    session: Box<dyn ProviderSession>,
    guard: CallGuard,
    on_region: Option<RegionCallback>,
}

impl ScanOrchestrator {
    pub fn new(session: Box<dyn ProviderSession>) -> Self {
        Self {
            session,
            guard: CallGuard::default(),
            on_region: None,
        }
    }

    pub fn with_guard(mut self, guard: CallGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn on_region(mut self, callback: RegionCallback) -> Self {
        self.on_region = Some(callback);
        self
    }

    /// Turns a selector into the ordered list of regions to scan.
    pub async fn resolve_regions(&self, selector: &RegionSelector) -> Result<Vec<String>, ScanError> {
        match selector {
            RegionSelector::SessionDefault => match self.session.default_region() {
                Some(region) if !region.is_empty() => Ok(vec![region]),
                _ => Err(ScanError::Session(
                    "no region configured for the current session".to_string(),
                )),
            },
            RegionSelector::All => {
                self.guard
                    .call(
                        "describe regions",
                        self.session.list_regions(),
                        ScanError::RegionEnumeration,
                    )
                    .await
            }
            RegionSelector::Named(region) => Ok(vec![region.clone()]),
        }
    }

    /// Scans every region matching `target` and concatenates the findings.
    ///
    /// `target` is empty for the session region, `all`, or a region name.
    pub async fn run(
        &self,
        target: &str,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<SecurityGroupResult>, ScanError> {
        let selector = RegionSelector::from(target);
        let regions = self.resolve_regions(&selector).await?;
        info!("Scanning {} region(s)", regions.len());

        let mut results: Vec<SecurityGroupResult> = Vec::new();
        for (idx, region) in regions.iter().enumerate() {
            if let Some(callback) = &self.on_region {
                callback(region, idx, regions.len());
            }

            let inventory = self.session.inventory(region);
            let found = scanner::scan_region(region, inventory.as_ref(), exclusions, &self.guard).await?;
            debug!("{region}: {} security groups with global access", found.len());
            results.extend(found);
        }

        Ok(results)
    }
}
