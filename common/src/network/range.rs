//! # Address Range Classification
//!
//! Decides whether a CIDR block stays inside reserved address space or
//! reaches globally routable addresses.
//!
//! A block is *public* unless a single reserved allocation fully subsumes it.
//! Subsumption is binary over whole prefixes: the reserved network must hold
//! the block's base address and the block must be at least as specific.
//! Blocks that straddle reserved and public space (e.g. `0.0.0.0/0`) are
//! therefore public.

use std::cmp::Ordering;
use std::net::{Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};

/// Reserved IPv4 allocations: RFC 1918, loopback, link-local, multicast.
const RESERVED_V4: &[(Ipv4Addr, u8)] = &[
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
    (Ipv4Addr::new(127, 0, 0, 0), 8),
    (Ipv4Addr::new(169, 254, 0, 0), 16),
    (Ipv4Addr::new(224, 0, 0, 0), 4),
];

/// Reserved IPv6 allocations: unique local, link-local, loopback, multicast.
const RESERVED_V6: &[(Ipv6Addr, u8)] = &[
    (Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    (Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
    (Ipv6Addr::LOCALHOST, 128),
    (Ipv6Addr::new(0xff00, 0, 0, 0, 0, 0, 0, 0), 8),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

/// Relative specificity of two blocks, by prefix length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specificity {
    /// Longer prefix, narrower block.
    More,
    Equal,
    /// Shorter prefix, wider block.
    Less,
}

/// Compares the prefix lengths of `a` and `b`.
pub fn specificity(a: &IpNetwork, b: &IpNetwork) -> Specificity {
    match a.prefix().cmp(&b.prefix()) {
        Ordering::Greater => Specificity::More,
        Ordering::Equal => Specificity::Equal,
        Ordering::Less => Specificity::Less,
    }
}

/// Returns `true` if `inner` is entirely contained in `outer`.
///
/// Blocks of different address families never contain each other.
pub fn contains(outer: &IpNetwork, inner: &IpNetwork) -> bool {
    let same_family = matches!(
        (outer, inner),
        (IpNetwork::V4(_), IpNetwork::V4(_)) | (IpNetwork::V6(_), IpNetwork::V6(_))
    );

    same_family
        && outer.contains(inner.network())
        && specificity(inner, outer) != Specificity::Less
}

/// Parses `cidr` as a block of the given family, normalized to its network address.
///
/// Only the strict `address/prefix` form is accepted. Bare addresses,
/// surrounding whitespace and signed prefixes are rejected.
pub fn parse_cidr(cidr: &str, family: AddressFamily) -> Option<IpNetwork> {
    let (_, prefix) = cidr.split_once('/')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match family {
        AddressFamily::V4 => {
            let net: Ipv4Network = cidr.parse().ok()?;
            Ipv4Network::new(net.network(), net.prefix())
                .ok()
                .map(IpNetwork::V4)
        }
        AddressFamily::V6 => {
            let net: Ipv6Network = cidr.parse().ok()?;
            Ipv6Network::new(net.network(), net.prefix())
                .ok()
                .map(IpNetwork::V6)
        }
    }
}

fn reserved_networks(family: AddressFamily) -> Vec<IpNetwork> {
    match family {
        AddressFamily::V4 => RESERVED_V4
            .iter()
            .filter_map(|(addr, prefix)| Ipv4Network::new(*addr, *prefix).ok())
            .map(IpNetwork::V4)
            .collect(),
        AddressFamily::V6 => RESERVED_V6
            .iter()
            .filter_map(|(addr, prefix)| Ipv6Network::new(*addr, *prefix).ok())
            .map(IpNetwork::V6)
            .collect(),
    }
}

/// Returns `true` if `network` is not subsumed by any reserved allocation.
pub fn is_public_network(network: &IpNetwork) -> bool {
    let family = match network {
        IpNetwork::V4(_) => AddressFamily::V4,
        IpNetwork::V6(_) => AddressFamily::V6,
    };

    !reserved_networks(family)
        .iter()
        .any(|reserved| contains(reserved, network))
}

/// Classifies a CIDR string.
///
/// Input that does not parse as a block of `family` is not applicable and
/// reported as not public.
pub fn is_public(cidr: &str, family: AddressFamily) -> bool {
    match parse_cidr(cidr, family) {
        Some(network) => is_public_network(&network),
        None => false,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
