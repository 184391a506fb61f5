mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{render_err, Cli, CliError, Cmd};
use covgen::ComponentKind;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            return render_err(
                cli.json,
                CliError::operational(format!("failed to resolve cwd: {e}")),
            )
        }
    };

    let json = cli.json;
    let res = match cli.cmd {
        Cmd::Activity(args) => commands::activity(&cwd, json, args),
        Cmd::Fragment(args) => {
            commands::component(&cwd, json, ComponentKind::Fragment, args, None, None)
        }
        Cmd::Dialog(args) => {
            commands::component(&cwd, json, ComponentKind::Dialog, args, None, None)
        }
        Cmd::Adapter(args) => commands::adapter(&cwd, json, args),
        Cmd::Packages(args) => commands::packages(&cwd, json, args),
        Cmd::LayoutName(args) => commands::layout_name(json, args),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => render_err(json, e),
    }
}
