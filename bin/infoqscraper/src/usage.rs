use std::process::ExitCode;

use clap::{error::ErrorKind, CommandFactory};
use infoq::InfoqError;

use crate::InfoqArgs;

/// Help output starts with the usage line, like every usage error does.
pub const HELP_TEMPLATE: &str = "usage: {usage}\n\n{about-with-newline}\n{all-args}{after-help}";

const USAGE_EXIT_CODE: u8 = 2;

/// Usage line and full name of the deepest subcommand named in `args`.
fn usage_of<I>(args: I) -> (String, String)
where
    I: IntoIterator<Item = String>,
{
    let mut command = InfoqArgs::command();
    command.build();

    let mut current = &command;
    for arg in args {
        if arg.starts_with('-') {
            continue;
        }
        if let Some(subcommand) = current.find_subcommand(&arg) {
            current = subcommand;
        }
    }

    let mut current = current.clone();
    let name = current
        .get_bin_name()
        .unwrap_or_else(|| current.get_name())
        .to_string();
    let rendered = current.render_usage().to_string();
    let usage = rendered
        .trim()
        .strip_prefix("Usage:")
        .unwrap_or(&rendered)
        .trim()
        .to_string();

    (format!("usage: {usage}"), name)
}

fn print_usage_error(message: &str) -> ExitCode {
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let (usage, name) = usage_of(args);
    eprintln!("{usage}");
    eprintln!("{name}: error: {message}");
    ExitCode::from(USAGE_EXIT_CODE)
}

pub fn report_clap_error(error: clap::Error) -> ExitCode {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = error.print();
            ExitCode::from(USAGE_EXIT_CODE)
        }
        _ => print_usage_error(clap_message(&error.render().to_string())),
    }
}

/// The message of a rendered clap error, without its usage and hint paragraphs.
fn clap_message(rendered: &str) -> &str {
    let message = rendered.split("\n\n").next().unwrap_or_default().trim();
    message.strip_prefix("error:").unwrap_or(message).trim()
}

pub fn report_error(error: anyhow::Error) -> ExitCode {
    let is_usage_error = error
        .downcast_ref::<InfoqError>()
        .is_some_and(InfoqError::is_usage_error);

    if is_usage_error {
        print_usage_error(&error.to_string())
    } else {
        log::error!("{error:#}");
        ExitCode::FAILURE
    }
}
