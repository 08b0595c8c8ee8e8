use clap::Subcommand;
use infoq::cache::human_size;

use super::GlobalOptions;
use crate::usage::HELP_TEMPLATE;

#[derive(Subcommand, Clone, Debug)]
pub enum CacheCommand {
    /// Remove every cached file
    #[command(help_template = HELP_TEMPLATE)]
    Clear,

    /// Print the disk space used by the cache
    #[command(help_template = HELP_TEMPLATE)]
    Size,
}

impl CacheCommand {
    pub async fn run(self, global: &GlobalOptions) -> anyhow::Result<()> {
        let cache = global.disk_cache();
        match self {
            CacheCommand::Clear => {
                cache.clear().await?;
                log::info!("Cache cleared at {}", cache.dir().display());
            }
            CacheCommand::Size => {
                let size = cache.size().await?;
                println!("{}", human_size(size));
            }
        }
        Ok(())
    }
}
