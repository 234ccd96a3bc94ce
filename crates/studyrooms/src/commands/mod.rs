//! Command dispatch: bridges CLI args -> portal calls -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod reservations;
pub mod spaces;
pub mod staff;
pub mod stats;
pub mod util;
pub mod weather;

use studyrooms_core::Portal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
///
/// Session commands run as is; everything else first makes sure a token
/// is available (stored, or obtained from configured credentials).
pub async fn dispatch(
    cmd: Command,
    portal: &Portal,
    global: &GlobalOpts,
    profile_name: &str,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(portal, args, global, profile_name).await,
        Command::Logout => auth::logout(portal, global).await,
        Command::Status => auth::status(portal, global, profile_name).await,
        Command::Register(args) => auth::register(portal, args, global).await,
        cmd => {
            if let Command::Stats(ref args) = cmd {
                stats::check(args)?;
            }
            portal.ensure_signed_in().await?;
            match cmd {
                Command::Spaces(args) => spaces::handle(portal, args, global).await,
                Command::Reservations(args) => reservations::handle(portal, args, global).await,
                Command::Staff(args) => staff::handle(portal, args, global).await,
                Command::Stats(args) => stats::handle(portal, args, global).await,
                Command::Weather(args) => weather::handle(portal, args, global).await,
                // Handled above or before dispatch
                Command::Login(_)
                | Command::Logout
                | Command::Status
                | Command::Register(_)
                | Command::Config(_)
                | Command::Completions(_) => unreachable!(),
            }
        }
    }
}
