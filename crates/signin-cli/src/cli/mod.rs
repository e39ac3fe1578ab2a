//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use signin_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "signin")]
#[command(version)]
#[command(about = "Validate and submit sign-in credentials")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Validate credentials without submitting them
    Validate {
        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Password
        #[arg(long, default_value = "")]
        password: String,

        /// Print the rendered form as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit credentials to the configured backend
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Show the password in the rendered form
        #[arg(long)]
        show_password: bool,

        /// Print the rendered form as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the default config as TOML
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // config commands must work even when the existing file is broken
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },

        Commands::Validate {
            email,
            password,
            json,
        } => {
            let config = config::Config::load().context("load config")?;
            let _log_guard = logging::init(&config.log).context("init logging")?;
            commands::validate::run(&email, &password, json)
        }

        Commands::Login {
            email,
            password,
            show_password,
            json,
        } => {
            let config = config::Config::load().context("load config")?;
            let _log_guard = logging::init(&config.log).context("init logging")?;
            let password = match password {
                Some(password) => password,
                None => commands::login::read_password_from_stdin()?,
            };

            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(commands::login::run(
                &config,
                commands::login::LoginOptions {
                    email,
                    password,
                    show_password,
                    json,
                },
            ))
        }
    }
}
