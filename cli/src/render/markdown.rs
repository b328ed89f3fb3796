use std::fmt::{self, Write};

use sglobal_common::models::SecurityGroupResult;

use crate::render::joined_cidrs;

const HEADER: &str = "| Region | Security Group ID | Group Name | Description | VPC ID | Protocol | Port(s) | CIDR |";
const DIVIDER: &str = "|--------|------------------|------------|-------------|--------|----------|---------|------|";

/// Escapes characters that would break a table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub fn render(out: &mut impl Write, results: &[SecurityGroupResult]) -> fmt::Result {
    if results.is_empty() {
        return writeln!(
            out,
            "## Security Group Scan Results\n\nNo security groups with global access found."
        );
    }

    writeln!(
        out,
        "# Security Group Scan Results\n\nFound **{}** security groups with global access:\n",
        results.len()
    )?;
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{DIVIDER}")?;

    for result in results {
        for (i, rule) in result.risky_rules.iter().enumerate() {
            let ports = rule.port_span().unwrap_or_else(|| "All".to_string());
            let rule_cells = format!(
                "{} | {} | {}",
                cell(&rule.protocol),
                ports,
                cell(&joined_cidrs(rule))
            );

            // Group metadata only on the group's first row.
            if i == 0 {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    cell(&result.region),
                    cell(&result.security_group_id),
                    cell(&result.group_name),
                    cell(&result.description),
                    cell(&result.vpc_id),
                    rule_cells
                )?;
            } else {
                writeln!(out, "| | | | | | {rule_cells} |")?;
            }
        }
    }

    Ok(())
}
