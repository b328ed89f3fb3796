//! # Report Rendering
//!
//! Turns scan findings into the report written to stdout. The format is
//! chosen once at startup from [`OutputFormat`].

pub mod json;
pub mod markdown;
pub mod text;

use sglobal_common::config::OutputFormat;
use sglobal_common::models::{InboundRule, SecurityGroupResult};

pub fn render(format: OutputFormat, results: &[SecurityGroupResult]) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => text::render(&mut out, results)?,
        OutputFormat::Json => json::render(&mut out, results)?,
        OutputFormat::Markdown => markdown::render(&mut out, results)?,
    }
    Ok(out)
}

pub(crate) fn joined_cidrs(rule: &InboundRule) -> String {
    rule.cidr_blocks.join(", ")
}
