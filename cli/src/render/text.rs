use std::fmt::{self, Write};

use colored::*;
use sglobal_common::models::SecurityGroupResult;

use crate::render::joined_cidrs;
use crate::terminal::colors;

fn field(out: &mut impl Write, key: &str, value: &str) -> fmt::Result {
    writeln!(out, "{}: {}", key.color(colors::PRIMARY), value)
}

pub fn render(out: &mut impl Write, results: &[SecurityGroupResult]) -> fmt::Result {
    if results.is_empty() {
        return writeln!(out, "No security groups with global access found.");
    }

    writeln!(
        out,
        "Found {} security groups with global access:\n",
        results.len().to_string().color(colors::RISK).bold()
    )?;

    for result in results {
        field(out, "Region", &result.region)?;
        field(out, "Security Group ID", &result.security_group_id)?;
        field(out, "Group Name", &result.group_name)?;
        field(out, "Description", &result.description)?;
        field(out, "VPC ID", &result.vpc_id)?;
        writeln!(out, "{}", "Risky Inbound Rules:".color(colors::ACCENT))?;

        for rule in &result.risky_rules {
            write!(out, "  - Protocol: {}", rule.protocol)?;
            match (rule.from_port, rule.to_port) {
                (Some(from), Some(to)) if from == to => write!(out, ", Port: {from}")?,
                (Some(from), Some(to)) => write!(out, ", Port Range: {from}-{to}")?,
                _ => {}
            }
            writeln!(out, ", CIDR: {}", joined_cidrs(rule).color(colors::RISK))?;
        }
        writeln!(out)?;
    }

    Ok(())
}
