use std::path::PathBuf;

use clap::{Args, Subcommand};
use infoq::{DiskCache, InfoqClient};

use crate::usage::HELP_TEMPLATE;

mod cache;
mod download;

#[derive(Args, Clone, Debug)]
pub struct GlobalOptions {
    /// Cache downloaded pages and slides on disk
    #[clap(short = 'c', long = "cache", global = true)]
    pub use_cache: bool,

    /// Cache directory. Defaults to $XDG_CACHE_HOME/infoqscraper
    #[clap(long, global = true, env = "INFOQSCRAPER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Debug output
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    pub fn disk_cache(&self) -> DiskCache {
        DiskCache::new(self.cache_dir.clone().unwrap_or_else(DiskCache::default_dir))
    }

    pub fn client(&self) -> anyhow::Result<InfoqClient> {
        let client = InfoqClient::new()?;
        Ok(if self.use_cache {
            client.with_cache(self.disk_cache())
        } else {
            client
        })
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum InfoqCommand {
    /// Download presentations
    #[command(subcommand, help_template = HELP_TEMPLATE)]
    Presentation(PresentationCommand),

    /// Manage the disk cache
    #[command(subcommand, help_template = HELP_TEMPLATE)]
    Cache(cache::CacheCommand),
}

#[derive(Subcommand, Clone, Debug)]
pub enum PresentationCommand {
    /// Download a presentation as a single video file
    #[command(help_template = HELP_TEMPLATE)]
    Download(download::DownloadCommand),
}

impl InfoqCommand {
    pub async fn run(self, global: &GlobalOptions) -> anyhow::Result<()> {
        match self {
            InfoqCommand::Presentation(PresentationCommand::Download(command)) => {
                command.download(global).await
            }
            InfoqCommand::Cache(command) => command.run(global).await,
        }
    }
}
