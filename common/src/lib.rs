//! # sglobal common
//!
//! Types shared by every sglobal crate.
//!
//! * **[`network`]**: address range classification.
//! * **[`inventory`]**: raw provider records and the provider capability traits.
//! * **[`models`]**: scan findings.
//! * **[`exclusion`]**: security groups left out of a scan.
//! * **[`config`]**: settings and the config file.

pub mod config;
pub mod exclusion;
pub mod inventory;
pub mod models;
pub mod network;
