pub mod scan;

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use clap::{ArgAction, Parser};
use sglobal_common::config::{Config, ConfigError, FileConfig, OutputFormat};

const COMMIT: &str = match option_env!("SGLOBAL_COMMIT") {
    Some(commit) => commit,
    None => "none",
};

const BUILD_DATE: &str = match option_env!("SGLOBAL_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

static VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{} (commit: {COMMIT}, built: {BUILD_DATE})",
        env!("CARGO_PKG_VERSION")
    )
});

#[derive(Parser, Debug)]
#[command(name = "sglobal")]
#[command(version = VERSION.as_str())]
#[command(about = "AWS Security Group Global Access Scanner")]
#[command(
    long_about = "sglobal scans AWS Security Groups for rules that allow global access (0.0.0.0/0).\n\
                  It helps identify potentially risky security configurations across your AWS infrastructure."
)]
pub struct CommandLine {
    /// Config file (default is $HOME/.sglobal.yaml)
    #[arg(long, env = "SGLOBAL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AWS region to scan (default: current profile region, 'all' for all regions)
    #[arg(short, long, env = "SGLOBAL_REGION")]
    pub region: Option<String>,

    /// File containing security group IDs to exclude (one per line)
    #[arg(short, long, env = "SGLOBAL_EXCLUDE_FILE", value_name = "FILE")]
    pub exclude_file: Option<PathBuf>,

    /// Output format: text, json, md/markdown [default: json]
    #[arg(short, long, env = "SGLOBAL_OUTPUT", value_name = "FORMAT")]
    pub output: Option<String>,

    /// AWS CLI profile to use
    #[arg(long, env = "SGLOBAL_PROFILE")]
    pub profile: Option<String>,

    /// Timeout in seconds for each AWS call
    #[arg(long, env = "SGLOBAL_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merges flags over the config file. Flags and environment win.
    pub fn resolve(self, file: FileConfig) -> Result<Config, ConfigError> {
        let output = match self.output.or(file.output) {
            Some(name) => name.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        Ok(Config {
            region: self.region.or(file.region).unwrap_or_default(),
            exclude_file: self.exclude_file.or(file.exclude_file),
            output,
            profile: self.profile.or(file.profile),
            call_timeout: self
                .timeout
                .or(file.timeout_secs)
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}
