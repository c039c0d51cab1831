//! Terminal command surface for the login flow.
//!
//! Commands only talk to domain ports; wiring happens in the binary.

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{LoginFlow, LoginOutcome, PortalRole};
use crate::presentation::{
    MemoryStyleHost, StyleHost, about_banner_style, about_section_style, mount_about_stylesheets,
};

/// `maddad-login` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "maddad-login",
    about = "Sign in to the Maddad Karo portal and manage the stored session",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in as a receiver or donor
    Login(LoginArgs),
    /// Inspect or clear the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Print About section styles and stylesheets for a viewport
    Layout(LayoutArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Portal role: receiver or donor
    #[arg(long, value_name = "role", default_value = "receiver")]
    pub role: PortalRole,
    /// Account email
    #[arg(long, value_name = "email")]
    pub email: String,
    /// Account password
    #[arg(long, value_name = "password", env = "MADDAD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SessionCommand {
    /// Print the stored session as JSON
    Show,
    /// Forget the stored session
    Clear,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct LayoutArgs {
    /// Viewport width in pixels
    #[arg(long, value_name = "px")]
    pub width: u32,
    /// Whether the section has scrolled into view
    #[arg(long)]
    pub visible: bool,
}

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to write command output: {0}")]
    Output(#[from] io::Error),
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Sign in with `args`, printing the feedback line followed by either the
/// session role and destination or the error as JSON. Returns whether a
/// session was created.
pub async fn run_login(
    flow: &LoginFlow,
    args: &LoginArgs,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    flow.set_email(&args.email);
    flow.set_password(&args.password);
    let outcome = flow.submit(args.role, &args.email, &args.password).await;

    writeln!(out, "{}", outcome.feedback())?;
    if let LoginOutcome::SignedIn {
        session,
        destination,
        ..
    } = &outcome
    {
        writeln!(out, "role={}", session.role)?;
        writeln!(out, "destination={destination}")?;
    }
    if let Some(error) = outcome.error() {
        writeln!(out, "error={}", serde_json::to_string(&error)?)?;
    }
    Ok(outcome.is_signed_in())
}

/// Run a `session` subcommand against `sessions`.
pub fn run_session(
    sessions: &dyn SessionStore,
    command: SessionCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        SessionCommand::Show => match sessions.current_session()? {
            Some(session) => writeln!(out, "{}", serde_json::to_string_pretty(&session)?)?,
            None => writeln!(out, "no session")?,
        },
        SessionCommand::Clear => {
            sessions.clear_session()?;
            writeln!(out, "session cleared")?;
        }
    }
    Ok(())
}

/// Print the About section and banner styles for `args`, together with the
/// stylesheets both components hold mounted while rendered.
pub fn run_layout(args: LayoutArgs, out: &mut impl Write) -> Result<(), CliError> {
    let head = Arc::new(MemoryStyleHost::new());
    let host: Arc<dyn StyleHost> = head.clone();
    let mounted = mount_about_stylesheets(&host);
    let styles = json!({
        "section": about_section_style(args.width, args.visible),
        "banner": about_banner_style(args.width, args.visible),
        "stylesheets": head.snapshot(),
    });
    drop(mounted);
    writeln!(out, "{}", serde_json::to_string_pretty(&styles)?)?;
    Ok(())
}
