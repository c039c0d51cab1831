//! `maddad-login` entry point: loads settings, wires adapters and runs one
//! CLI command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use frontend::app::{LoginSettings, build_login_flow, session_store};
use frontend::inbound::cli::{CliArgs, Command, run_layout, run_login, run_session};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = LoginSettings::load_from_iter([OsString::from("maddad-login")])
        .map_err(|error| eyre!("failed to load MADDAD_* settings: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args, settings))
}

async fn run(args: CliArgs, settings: LoginSettings) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    let sessions = session_store(&settings);

    match args.command {
        Command::Login(login) => {
            let flow = build_login_flow(&settings, sessions)
                .wrap_err("failed to wire the login flow")?;
            let signed_in = run_login(&flow, &login, &mut out)
                .await
                .wrap_err("login command failed")?;
            flow.teardown();
            Ok(if signed_in {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Session { command } => {
            run_session(sessions.as_ref(), command, &mut out)
                .wrap_err("session command failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Layout(layout) => {
            run_layout(layout, &mut out).wrap_err("layout command failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
