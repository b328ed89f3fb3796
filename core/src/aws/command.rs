//! Invocations of the `aws` command-line tool.

use std::process::Stdio;

use serde::de::DeserializeOwned;
use sglobal_common::inventory::ProviderError;
use tokio::process::Command;
use tracing::debug;

pub const AWS_PROGRAM: &str = "aws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCommand {
    args: Vec<String>,
}

impl AwsCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends `flag value` when `value` is set.
    pub fn opt(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn display(&self) -> String {
        format!("{AWS_PROGRAM} {}", self.args.join(" "))
    }

    /// Runs the command and returns its trimmed stdout.
    ///
    /// The child is killed if the returned future is dropped before it finishes.
    pub async fn output(&self) -> Result<String, ProviderError> {
        debug!("Running `{}`", self.display());

        let output = Command::new(AWS_PROGRAM)
            .args(&self.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProviderError::Spawn {
                program: AWS_PROGRAM.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::Command {
                command: self.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub async fn json<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        let stdout = self.output().await?;
        Ok(serde_json::from_str(&stdout)?)
    }
}
