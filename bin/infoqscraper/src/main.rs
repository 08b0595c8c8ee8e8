use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

mod commands;
mod usage;

#[derive(Parser)]
#[command(
    name = "infoqscraper",
    bin_name = "infoqscraper",
    version,
    about = "Download InfoQ presentations as a single video file",
    help_template = usage::HELP_TEMPLATE
)]
struct InfoqArgs {
    #[clap(flatten)]
    global: commands::GlobalOptions,

    #[clap(subcommand)]
    command: commands::InfoqCommand,
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match InfoqArgs::try_parse() {
        Ok(args) => args,
        Err(e) => return usage::report_clap_error(e),
    };
    let InfoqArgs { global, command } = args;
    init_logger(global.verbose);

    let result = tokio::select! {
        result = command.run(&global) => result,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, cleaning up.");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => usage::report_error(e),
    }
}
