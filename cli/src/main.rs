mod commands;
mod render;
mod terminal;

use std::io::IsTerminal;

use anyhow::Context;
use commands::CommandLine;
use sglobal_common::config::{FileConfig, OutputFormat};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::scan;
use crate::terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let file = match FileConfig::discover(commands.config.as_deref())? {
        Some((path, file)) => {
            info!("Using config file: {}", path.display());
            file
        }
        None => FileConfig::default(),
    };

    let cfg = commands.resolve(file).context("Error creating formatter")?;

    if cfg.output == OutputFormat::Text && !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling scan");
            on_interrupt.cancel();
        }
    });

    let results = scan::scan(&cfg, cancel).await?;

    let report = render::render(cfg.output, &results).context("Error formatting output")?;
    print!("{report}");

    Ok(())
}
