//! # Scan Findings
//!
//! Values produced by a scan. Both types only ever exist for resources and
//! permission entries that were judged risky, so their lists are never empty.

use serde::Serialize;

/// Marker prepended to managed prefix-list ids in [`InboundRule::cidr_blocks`].
pub const PREFIX_LIST_MARKER: &str = "prefix:";

/// One inbound permission entry that allows global access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundRule {
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    /// Protocol name or number, `-1` meaning all protocols.
    pub protocol: String,
    /// Risky sources in discovery order: IPv4, IPv6, then prefix-list markers.
    pub cidr_blocks: Vec<String>,
}

impl InboundRule {
    /// Human readable port span, `None` when the entry covers all ports.
    pub fn port_span(&self) -> Option<String> {
        match (self.from_port, self.to_port) {
            (Some(from), Some(to)) if from == to => Some(from.to_string()),
            (Some(from), Some(to)) => Some(format!("{from}-{to}")),
            _ => None,
        }
    }
}

/// A security group with at least one risky inbound rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityGroupResult {
    pub region: String,
    pub security_group_id: String,
    pub group_name: String,
    pub description: String,
    pub vpc_id: String,
    pub risky_rules: Vec<InboundRule>,
}
