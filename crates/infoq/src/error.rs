use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

use crate::tools::Tool;

#[derive(Error, Debug)]
pub enum InfoqError {
    #[error("HTTP error: {0}")]
    HttpError(reqwest::StatusCode),

    #[error("Invalid presentation reference: {0}")]
    InvalidPresentation(String),

    #[error("Presentation metadata not found: {0}")]
    MissingMetadata(&'static str),

    #[error("{tool} not found: {source}")]
    MissingExecutable {
        tool: Tool,
        #[source]
        source: which::Error,
    },

    #[error("{tool} failed with {status}: {stderr}")]
    ToolFailed {
        tool: Tool,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Can not detect the duration of {0}")]
    UnknownDuration(PathBuf),

    #[error("File {} already exist. Use -y to overwrite it.", .0.display())]
    OutputExists(PathBuf),

    #[error("Directory {} does not exist.", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Output file {} is empty", .0.display())]
    EmptyOutput(PathBuf),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error(transparent)]
    Base64DecodeError(#[from] base64::DecodeError),
}

impl InfoqError {
    /// Errors caused by the invocation itself rather than by the download.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            InfoqError::InvalidPresentation(_)
                | InfoqError::MissingExecutable { .. }
                | InfoqError::OutputExists(_)
                | InfoqError::OutputDirMissing(_)
        )
    }
}

pub type InfoqResult<T> = Result<T, InfoqError>;
