use std::{
    ffi::OsStr,
    process::{Output, Stdio},
};

use tokio::process::Command;

use crate::{
    error::{InfoqError, InfoqResult},
    tools::{Tool, ToolConfig},
};

/// Run a tool to completion with its output captured.
///
/// The child is killed if the returned future is dropped.
pub async fn output<I, S>(tools: &ToolConfig, tool: Tool, args: I) -> InfoqResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(tools.path(tool));
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    log::debug!("Running {command:?}");

    Ok(command.output().await?)
}

/// Like [`output`], but a nonzero exit status is an error.
pub async fn run<I, S>(tools: &ToolConfig, tool: Tool, args: I) -> InfoqResult<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = output(tools, tool, args).await?;
    if !output.status.success() {
        return Err(InfoqError::ToolFailed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}
