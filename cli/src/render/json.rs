use std::fmt::Write;

use serde::Serialize;
use sglobal_common::models::SecurityGroupResult;

#[derive(Serialize)]
struct Report<'a> {
    count: usize,
    results: &'a [SecurityGroupResult],
}

pub fn render(out: &mut impl Write, results: &[SecurityGroupResult]) -> anyhow::Result<()> {
    let report = Report {
        count: results.len(),
        results,
    };
    writeln!(out, "{}", serde_json::to_string(&report)?)?;
    Ok(())
}
