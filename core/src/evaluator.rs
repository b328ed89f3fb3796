//! # Rule Risk Evaluation
//!
//! Decides which sources of an inbound permission entry grant global access.
//!
//! Sources are checked in a fixed order: IPv4 ranges, IPv6 ranges, then
//! managed prefix lists. Prefix lists are never resolved; a list maintained
//! outside the security group cannot be assumed to be scoped, so every
//! reference is reported as risky.

use sglobal_common::inventory::IpPermission;
use sglobal_common::models::{InboundRule, PREFIX_LIST_MARKER};
use sglobal_common::network::range::{self, AddressFamily};

/// Collects the risky sources of `permission` in discovery order.
pub fn risky_ranges(permission: &IpPermission) -> Vec<String> {
    let v4 = permission
        .ip_ranges
        .iter()
        .filter_map(|r| r.cidr_ip.as_deref())
        .filter(|cidr| range::is_public(cidr, AddressFamily::V4));

    let v6 = permission
        .ipv6_ranges
        .iter()
        .filter_map(|r| r.cidr_ipv6.as_deref())
        .filter(|cidr| range::is_public(cidr, AddressFamily::V6));

    let direct = v4.chain(v6).map(String::from);

    let prefix_lists = permission
        .prefix_list_ids
        .iter()
        .filter_map(|p| p.prefix_list_id.as_deref())
        .map(|id| format!("{PREFIX_LIST_MARKER}{id}"));

    direct.chain(prefix_lists).collect()
}

/// Builds the finding for `permission`, or `None` if it has no risky source.
pub fn evaluate(permission: &IpPermission) -> Option<InboundRule> {
    let cidr_blocks = risky_ranges(permission);
    if cidr_blocks.is_empty() {
        return None;
    }

    Some(InboundRule {
        from_port: permission.from_port,
        to_port: permission.to_port,
        protocol: permission.ip_protocol.clone().unwrap_or_default(),
        cidr_blocks,
    })
}

/// Evaluates every entry, keeping the risky ones in entry order.
pub fn risky_rules(permissions: &[IpPermission]) -> Vec<InboundRule> {
    permissions.iter().filter_map(evaluate).collect()
}
