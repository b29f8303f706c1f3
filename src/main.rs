mod auth;
mod cli_messages;
mod config;
mod consts;
mod donations;
mod environment;
mod error_classifier;
mod events;
mod feed;
mod impact;
mod logging;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::auth::Role;
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the live donation dashboard
    Start {
        /// Print feed updates and notices to the console instead of the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Run against built-in sample donations instead of the donation service
        #[arg(long, action = clap::ArgAction::SetTrue)]
        demo: bool,

        /// Enable background colors
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Save the identity used by the dashboard
    Login {
        /// Identifier of the user
        #[arg(long, value_name = "USER_ID")]
        user_id: String,

        /// Either "donor" or "recipient"
        #[arg(long, value_name = "ROLE")]
        role: Role,

        /// Name shown in the dashboard greeting
        #[arg(long, value_name = "NAME")]
        display_name: Option<String>,
    },
    /// Clear the saved identity
    Logout,
}

/// Loads the saved configuration, if there is one.
fn load_config(path: &Path) -> Option<Config> {
    if !path.exists() {
        return None;
    }
    match Config::load_from_file(path) {
        Ok(config) => Some(config),
        Err(e) => {
            crate::print_cmd_warn!("Ignoring config", "{}: {}", path.display(), e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let config = load_config(&config_path);

    // FOODSHARE_ENVIRONMENT wins over the environment saved at login
    let environment = Environment::resolve(
        std::env::var("FOODSHARE_ENVIRONMENT").ok().as_deref(),
        config.as_ref().map(|c| c.environment),
    );

    let args = Args::parse();
    match args.command {
        Command::Start {
            headless,
            demo,
            with_background,
        } => start(config.as_ref(), environment, headless, demo, with_background).await,
        Command::Login {
            user_id,
            role,
            display_name,
        } => {
            let user_id = user_id.trim().to_string();
            if user_id.is_empty() {
                return Err(Box::from("User ID must not be empty"));
            }
            let config = Config::new(user_id, role, display_name, environment);
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!(
                "Logged in",
                "{} as {} ({})",
                config.user_id,
                config.role,
                config.environment
            );
            Ok(())
        }
        Command::Logout => {
            crate::print_cmd_info!("Logging out", "Clearing {}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}

/// Starts the dashboard session.
///
/// # Arguments
/// * `config` - Saved configuration; `None` starts an anonymous session.
/// * `env` - The environment to connect to.
/// * `headless` - Print events instead of drawing the dashboard.
/// * `demo` - Use the in-memory sample service.
/// * `with_background` - Whether to enable background colors.
async fn start(
    config: Option<&Config>,
    env: Environment,
    headless: bool,
    demo: bool,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    if config.is_none() {
        crate::print_cmd_info!(
            "Not logged in",
            "Browsing anonymously. Run `foodshare login` to claim or donate."
        );
    }

    let session = setup_session(config, env, demo)?;
    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, with_background).await
    }
}
