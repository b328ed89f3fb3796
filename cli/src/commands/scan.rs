use anyhow::Context;
use sglobal_common::config::Config;
use sglobal_common::exclusion::ExclusionSet;
use sglobal_common::models::SecurityGroupResult;
use sglobal_core::aws::AwsCliSession;
use sglobal_core::{CallGuard, ScanOrchestrator};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span};

use crate::terminal::spinner;

/// Scans the configured regions and returns every finding.
///
/// The exclusion file is read before any AWS call is made.
pub async fn scan(cfg: &Config, cancel: CancellationToken) -> anyhow::Result<Vec<SecurityGroupResult>> {
    let exclusions = ExclusionSet::load(cfg.exclude_file.as_deref())
        .context("Error loading exclude file")?;
    if !exclusions.is_empty() {
        info!("Excluding {} security groups", exclusions.len());
    }

    let session = AwsCliSession::connect(cfg.profile.clone())
        .await
        .context("Error initializing AWS client")?;

    let span = info_span!("scan", indicatif.pb_show = true);
    let orchestrator = ScanOrchestrator::new(Box::new(session))
        .with_guard(CallGuard::new(cancel, cfg.call_timeout))
        .on_region(spinner::report_region_progress(span.clone()));

    let results = orchestrator
        .run(&cfg.region, &exclusions)
        .instrument(span)
        .await
        .context("Error scanning security groups")?;

    info!("Found {} security groups with global access", results.len());
    Ok(results)
}
