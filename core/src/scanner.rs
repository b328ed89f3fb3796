//! # Resource Scanner
//!
//! Walks one region's security group inventory page by page and turns every
//! group with risky inbound rules into a [`SecurityGroupResult`].
//!
//! A failed page aborts the whole region. Results gathered from earlier pages
//! are dropped with it, so a region is either scanned completely or not at all.

use sglobal_common::exclusion::ExclusionSet;
use sglobal_common::inventory::{SecurityGroup, SecurityGroupInventory};
use sglobal_common::models::SecurityGroupResult;
use tracing::debug;

use crate::error::ScanError;
use crate::evaluator;
use crate::guard::CallGuard;

/// Assesses one security group.
///
/// Returns `None` for groups without an id, excluded groups, and groups
/// whose inbound rules are all scoped.
pub fn assess_group(
    region: &str,
    group: &SecurityGroup,
    exclusions: &ExclusionSet,
) -> Option<SecurityGroupResult> {
    let Some(group_id) = group.group_id.as_deref() else {
        debug!("Skipping security group without an id in {region}");
        return None;
    };

    if exclusions.contains(group_id) {
        debug!("Skipping excluded security group {group_id}");
        return None;
    }

    let risky_rules = evaluator::risky_rules(&group.ip_permissions);
    if risky_rules.is_empty() {
        return None;
    }

    Some(SecurityGroupResult {
        region: region.to_string(),
        security_group_id: group_id.to_string(),
        group_name: group.group_name.clone().unwrap_or_default(),
        description: group.description.clone().unwrap_or_default(),
        vpc_id: group.vpc_id.clone().unwrap_or_default(),
        risky_rules,
    })
}

/// Scans every page of `inventory` for groups with global access.
pub async fn scan_region(
    region: &str,
    inventory: &dyn SecurityGroupInventory,
    exclusions: &ExclusionSet,
    guard: &CallGuard,
) -> Result<Vec<SecurityGroupResult>, ScanError> {
    let mut results: Vec<SecurityGroupResult> = Vec::new();
    let mut token: Option<String> = None;
    let mut page_no: usize = 0;

    loop {
        page_no += 1;
        let operation = format!("describe security groups in {region} (page {page_no})");
        let page = guard
            .call(&operation, inventory.list_page(token.take()), |source| {
                ScanError::Inventory {
                    region: region.to_string(),
                    source,
                }
            })
            .await?;

        debug!(
            "{region}: page {page_no} holds {} security groups",
            page.security_groups.len()
        );

        results.extend(
            page.security_groups
                .iter()
                .filter_map(|group| assess_group(region, group, exclusions)),
        );

        match page.next_token {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => break,
        }
    }

    Ok(results)
}
