use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::{InfoqError, InfoqResult};

/// External executables the converter depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Ffmpeg,
    Swfrender,
    Rtmpdump,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Ffmpeg, Tool::Swfrender, Tool::Rtmpdump];

    /// Executable name looked up in `PATH`.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Ffmpeg => "ffmpeg",
            Tool::Swfrender => "swfrender",
            Tool::Rtmpdump => "rtmpdump",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tool paths given explicitly by the user.
#[derive(Debug, Clone, Default)]
pub struct ToolOverrides {
    pub ffmpeg: Option<PathBuf>,
    pub swfrender: Option<PathBuf>,
    pub rtmpdump: Option<PathBuf>,
}

impl ToolOverrides {
    fn get(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::Ffmpeg => self.ffmpeg.as_deref(),
            Tool::Swfrender => self.swfrender.as_deref(),
            Tool::Rtmpdump => self.rtmpdump.as_deref(),
        }
    }
}

/// Resolved locations of every external tool.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    ffmpeg: PathBuf,
    swfrender: PathBuf,
    rtmpdump: PathBuf,
}

impl ToolConfig {
    /// Resolve every tool, preferring the overrides and falling back to `PATH`.
    ///
    /// Fails on the first tool that does not exist or is not executable.
    pub fn locate(overrides: &ToolOverrides) -> InfoqResult<Self> {
        let locate = |tool: Tool| -> InfoqResult<PathBuf> {
            let located = match overrides.get(tool) {
                Some(path) => which::which(path),
                None => which::which(tool.name()),
            };
            let path = located.map_err(|source| InfoqError::MissingExecutable { tool, source })?;
            log::debug!("Using {tool} at {}", path.display());
            Ok(path)
        };

        Ok(Self {
            ffmpeg: locate(Tool::Ffmpeg)?,
            swfrender: locate(Tool::Swfrender)?,
            rtmpdump: locate(Tool::Rtmpdump)?,
        })
    }

    pub fn path(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Swfrender => &self.swfrender,
            Tool::Rtmpdump => &self.rtmpdump,
        }
    }
}
