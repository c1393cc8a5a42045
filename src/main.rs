mod auth;
mod cli;
mod error;
mod form;
mod logging;
mod models;
mod navigation;
mod settings;
mod tui;
mod validation;

use clap::Parser;

use auth::{AuthService, StubAuthService};
use cli::{CheckCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let settings = settings::load_settings();
    let log_guard = logging::init(&settings);

    let result = match cli.command {
        None => {
            let auth: Box<dyn AuthService> = if cli.reject_auth {
                Box::new(StubAuthService::rejecting())
            } else {
                Box::new(StubAuthService::new())
            };
            cli::router::run(&settings, auth)
        }
        Some(Commands::Init { force }) => cli::init::run(force),
        Some(Commands::Check { form }) => match form {
            CheckCommands::Signin { email, password } => cli::check::signin(&email, password),
            CheckCommands::Signup {
                name,
                email,
                password,
            } => cli::check::signup(&name, &email, password),
        },
        Some(Commands::Status) => cli::status::run(),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        drop(log_guard);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
