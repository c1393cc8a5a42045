pub mod check;
pub mod init;
pub mod router;
pub mod signin;
pub mod signup;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "doorman", about = "Sign-in and sign-up screens for the terminal.")]
pub struct Cli {
    /// Make the stubbed sign-in/registration calls fail, to exercise the error alerts.
    #[arg(long = "reject-auth")]
    pub reject_auth: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a settings file with the default values.
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Validate form input without opening the screens.
    Check {
        #[command(subcommand)]
        form: CheckCommands,
    },
    /// Show configuration paths and effective settings.
    Status,
}

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Validate sign-in input.
    Signin {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Validate sign-up input.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
}
