//! Referral Dashboard CLI
//!
//! Command-line front end for the referral dashboard:
//! - Register or log in
//! - Show referral code, links and earnings
//! - Generate a new referral code
//! - Copy the code or a link to the clipboard
//! - Log out

use anyhow::Context;
use clap::{Parser, Subcommand};
use referral_dashboard::config::generate_default_config;
use referral_dashboard::{
    render, Config, CopyTarget, Credentials, Dashboard, FileStorage, LoggingConfig,
    Osc52Clipboard, OutputFormat, ReferralClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "referral")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage your referral codes, links and earnings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Referral API base URL (overrides config and REFERRAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides config and REFERRAL_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Config file (default: searched in standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        /// Full name
        #[arg(short, long)]
        name: String,
    },

    /// Sign in with an existing account
    Login {
        #[arg(short, long)]
        email: String,
    },

    /// Show referral code, links and earnings
    Show,

    /// Generate a new referral code
    Generate,

    /// Copy the referral code or a link to the clipboard
    Copy {
        #[command(subcommand)]
        target: CopyCommand,
    },

    /// Sign out and forget the session
    Logout,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CopyCommand {
    /// The referral code
    Code,
    /// A referral link, numbered as in `referral show`
    Link { number: usize },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }
    if let Some(file) = cli.session_file.clone() {
        config.session.file = file;
    }

    init_logging(&config.logging);

    tracing::debug!(api = %config.api.base_url, session = ?config.session.file, "Starting");

    let client = ReferralClient::new(config.api.client_config())
        .context("Failed to create HTTP client")?;
    let storage = FileStorage::new(&config.session.file);
    let mut dashboard = Dashboard::new(Arc::new(client), Arc::new(storage));

    let ok = match cli.command {
        Commands::Register { email, name } => {
            dashboard.toggle_mode();
            dashboard
                .submit(Credentials::Register {
                    email,
                    full_name: name,
                })
                .await
        }

        Commands::Login { email } => dashboard.submit(Credentials::Login { email }).await,

        Commands::Show => {
            dashboard.bootstrap().await;
            true
        }

        Commands::Generate => {
            dashboard.bootstrap().await;
            if dashboard.state().user.is_none() {
                eprintln!("Not signed in. Run `referral login --email <EMAIL>` first.");
                std::process::exit(1);
            }
            dashboard.regenerate_code().await
        }

        Commands::Copy { target } => {
            dashboard.bootstrap().await;
            let target = match target {
                CopyCommand::Code => Ok(CopyTarget::Code),
                CopyCommand::Link { number } => CopyTarget::link_number(number),
            };

            let clipboard = Osc52Clipboard::stderr();
            match target.and_then(|target| dashboard.copy(target, &clipboard)) {
                Ok(ack) => {
                    println!("{}", ack);
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Logout => {
            dashboard.logout().context("Failed to clear session")?;
            println!("Logged out.");
            return Ok(());
        }

        Commands::Config { output } => return write_config(output.as_deref()),
    };

    print!("{}", render(dashboard.state(), cli.format));

    if !ok && dashboard.state().error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries the view.
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("referral_dashboard={level},referral={level}", level = logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}
