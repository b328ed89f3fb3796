use colored::*;
use indicatif::ProgressStyle;
use sglobal_core::orchestrator::RegionCallback;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

pub fn region_message(region: &str, idx: usize, total: usize) -> String {
    format!(
        "Scanning security groups in {} ({}/{})...",
        region.green().bold(),
        idx + 1,
        total
    )
}

/// Keeps the spinner of `span` in sync with the region being scanned.
pub fn report_region_progress(span: Span) -> RegionCallback {
    Box::new(move |region, idx, total| {
        span.pb_set_message(&region_message(region, idx, total));
    })
}
