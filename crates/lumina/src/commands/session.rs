//! `lumina session` command implementation.

use clap::Subcommand;

use crate::context::Context;
use crate::error::CliError;
use crate::output::Output;

/// Simulated login commands.
#[derive(Subcommand, Debug)]
pub(crate) enum SessionCommand {
    /// Log in as the guest comment author.
    Login,
    /// Log out the comment author, or lock the admin area with `--admin`.
    Logout {
        /// Lock the admin area instead.
        #[arg(long)]
        admin: bool,
    },
    /// Unlock the admin area.
    Admin {
        /// Admin password.
        password: String,
    },
    /// Show who is logged in.
    Status,
}

impl SessionCommand {
    /// Execute the session command.
    pub(crate) fn execute(self, ctx: &Context, output: &Output) -> Result<(), CliError> {
        let sessions = ctx.sessions();
        match self {
            Self::Login => {
                let user = sessions.login_guest()?;
                output.success(&format!("Logged in as {} (@{})", user.name, user.username));
            }
            Self::Logout { admin: true } => {
                sessions.logout_admin()?;
                output.success("Admin area locked");
            }
            Self::Logout { admin: false } => {
                sessions.logout()?;
                output.success("Logged out");
            }
            Self::Admin { password } => {
                if !sessions.login_admin(&password, &ctx.config.admin.password)? {
                    return Err(CliError::Unauthorized("incorrect password".to_owned()));
                }
                output.success("Admin area unlocked");
            }
            Self::Status => {
                let session = sessions.load()?;
                match session.user() {
                    Some(user) => output.info(&format!("User: {} (@{})", user.name, user.username)),
                    None => output.info("User: not logged in"),
                }
                output.info(&format!(
                    "Admin: {}",
                    if session.is_admin() { "yes" } else { "no" }
                ));
            }
        }
        Ok(())
    }
}
