//! Entry point for cmn-launch.
use std::process::ExitCode;

use clap::Parser;
use cmn_launch::{
    cli::{execute_cli_command, CliCommand, LaunchArgs, LaunchProfile, LaunchRequest, ParsedCommand},
    launch::{
        config::LauncherConfig,
        runtime::{self, RuntimeExit},
    },
    lib::telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing().map_err(RuntimeExit::from_error)?;
    let args = LaunchArgs::parse();
    let command = args.into_command().map_err(RuntimeExit::from_error)?;

    match command {
        ParsedCommand::Launch(request) => launch(request).await,
        ParsedCommand::Cli(command) => handle_cli_command(command),
    }
}

async fn launch(request: LaunchRequest) -> Result<(), RuntimeExit> {
    let config =
        LauncherConfig::load(&request.config).map_err(|err| RuntimeExit::from_config_error(&err))?;
    let profile =
        LaunchProfile::resolve(request, config).map_err(|err| RuntimeExit::from_launch_error(&err))?;
    runtime::run_launch(profile).await
}

fn handle_cli_command(command: CliCommand) -> Result<(), RuntimeExit> {
    let message = execute_cli_command(command).map_err(RuntimeExit::from_error)?;
    println!("{message}");
    Ok(())
}
