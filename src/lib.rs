pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod generate;
pub mod io_utils;
pub mod projection;
pub mod transfer;
pub mod ui;

use std::{env, ffi::OsString, sync::OnceLock};

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, error::ErrorKind};
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands, GenerateCommands, SINGLE_DASH_LONG_FLAGS},
    config::AppConfig,
    projection::Projection,
    ui::Ui,
};

/// Exit code returned after printing help in place of running a command.
pub const HELP_EXIT_CODE: i32 = 1;

/// Exit code for a command line `clap` rejects.
pub const USAGE_EXIT_CODE: i32 = 1;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("chartfeed", LevelFilter::Warn);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<i32> {
    init_logging();
    let ui = ui::select_ui();
    let cli = match Cli::try_parse_from(preprocess_cli_args(env::args_os())) {
        Ok(cli) => cli,
        Err(err) => return Ok(report_parse_error(&err, ui.as_ref())),
    };
    let config = AppConfig::from_env();
    debug!("Feed endpoint: {}", config.feed_url);
    execute(cli, &config, ui.as_ref())
}

/// Reports a `clap` parse outcome through `ui` and returns the exit code.
///
/// `--help` and `--version` are successful runs; anything else `clap`
/// rejects is a usage failure.
pub fn report_parse_error(err: &clap::Error, ui: &dyn Ui) -> i32 {
    let rendered = err.render().to_string();
    let rendered = rendered.trim_end();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            ui.output(rendered);
            0
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            ui.output(rendered);
            HELP_EXIT_CODE
        }
        kind => {
            debug!("Command line rejected: {kind:?}");
            ui.error(rendered);
            USAGE_EXIT_CODE
        }
    }
}

/// Dispatches a parsed command line and returns the process exit code.
///
/// Command failures are reported through `ui` and turned into an exit code;
/// the outer `Err` is reserved for failures of the dispatcher itself.
pub fn execute(cli: Cli, config: &AppConfig, ui: &dyn Ui) -> Result<i32> {
    let outcome = match cli.command {
        None => return show_help(ui, &[]),
        Some(Commands::Generate(args)) => match args.command {
            None => return show_help(ui, &["generate"]),
            Some(GenerateCommands::List(list)) => {
                generate::execute(&list, Projection::Descriptive, config, ui).map(drop)
            }
            Some(GenerateCommands::ListImages(list)) => {
                generate::execute(&list, Projection::Images, config, ui).map(drop)
            }
        },
        Some(Commands::Transfer(args)) => match args.file.as_deref() {
            None => return show_help(ui, &["transfer"]),
            Some(file) => transfer::execute(file, &args, config, ui).map(drop),
        },
    };

    match outcome {
        Ok(()) => Ok(0),
        Err(err) => {
            debug!("Command failed: {err:?}");
            ui.error(&err.to_string());
            Ok(err.exit_code())
        }
    }
}

fn show_help(ui: &dyn Ui, path: &[&str]) -> Result<i32> {
    let mut command = Cli::command();
    command.build();
    let mut target = &mut command;
    for name in path {
        target = target
            .find_subcommand_mut(name)
            .ok_or_else(|| anyhow!("Unknown command '{name}'"))?;
    }
    let help = target.render_help().to_string();
    ui.output(help.trim_end());
    Ok(HELP_EXIT_CODE)
}

/// Rewrites single-dash long flags (`-filename=foo`, `-path out`) into the
/// double-dash form `clap` expects. Arguments after `--` are left alone.
pub fn preprocess_cli_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut processed = Vec::new();
    if let Some(bin) = iter.next() {
        processed.push(bin);
    }
    let mut passthrough = false;
    for arg in iter {
        if passthrough {
            processed.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            processed.push(arg);
            continue;
        }
        processed.push(normalize_flag(arg));
    }
    processed
}

fn normalize_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if SINGLE_DASH_LONG_FLAGS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}
