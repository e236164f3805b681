//! Kubedash CLI - terminal dashboard for Kubernetes pods, services and deployments

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use kubedash::commands::deploy::DeployArgs;
use kubedash::commands::resources::Listing;
use kubedash::commands::{Session, SessionOptions};
use kubedash::config::Settings;
use kubedash::utils::{enhance_error, errors::display_error_and_exit, logger};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubedash")]
#[command(author, version, about = "Terminal dashboard for Kubernetes pods, services and deployments", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Dashboard backend URL (overrides [server] base_url)
    #[arg(long, global = true, env = "KUBEDASH_SERVER")]
    server: Option<String>,

    /// Bearer token from a previous login; skips the login page
    #[arg(long, global = true, env = "KUBEDASH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Dry-run mode: show what would be created without sending it
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the bearer token
    Login,

    /// Interactive dashboard
    Dashboard,

    /// List pods
    Pods,

    /// List services
    Services,

    /// List namespaces
    Namespaces,

    /// Create a deployment (prompts for anything not given)
    Deploy {
        /// Target namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Deployment name
        #[arg(long)]
        name: Option<String>,

        /// Container image
        #[arg(short, long)]
        image: Option<String>,

        /// Number of replicas
        #[arg(short, long)]
        replicas: Option<String>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write an example config file
    Init {
        /// Where to write it (default: ~/.config/kubedash/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();
    let (settings, load_error) = Settings::load_or_default();

    if !settings.colors.enabled {
        colored::control::set_override(false);
    }
    logger::init(cli.verbose, settings.colors.enabled);
    if let Some(e) = load_error {
        kubedash::log_warn!("{:#}; using defaults", e);
    }

    if let Err(e) = run(cli, settings) {
        display_error_and_exit(enhance_error(e));
    }
}

fn run(cli: Cli, settings: Settings) -> Result<()> {
    let options = SessionOptions {
        server: cli.server,
        token: cli.token,
        dry_run: cli.dry_run,
    };

    if cli.dry_run {
        kubedash::log_info!("DRY RUN MODE: No deployments will be created");
    }

    match cli.command {
        Commands::Login => kubedash::commands::login::run(&Session::new(settings, options)?),
        Commands::Dashboard => kubedash::commands::dashboard::run(&Session::new(settings, options)?),
        Commands::Pods => handle_listing(settings, options, Listing::Pods),
        Commands::Services => handle_listing(settings, options, Listing::Services),
        Commands::Namespaces => handle_listing(settings, options, Listing::Namespaces),
        Commands::Deploy {
            namespace,
            name,
            image,
            replicas,
        } => {
            let session = Session::new(settings, options)?;
            kubedash::commands::deploy::run(
                &session,
                DeployArgs {
                    namespace,
                    name,
                    image,
                    replicas,
                },
            )
        }
        Commands::Config { command } => handle_config_command(command),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    }
}

fn handle_listing(settings: Settings, options: SessionOptions, listing: Listing) -> Result<()> {
    let session = Session::new(settings, options)?;
    kubedash::commands::resources::run(&session, listing)
}

fn handle_config_command(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => {
            let written = kubedash::commands::config::init(path, force)?;
            println!("Wrote {}", written.display());
            Ok(())
        }
        ConfigCommands::Show => {
            print!("{}", kubedash::commands::config::show()?);
            Ok(())
        }
    }
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kubedash", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("kubedash {}", env!("CARGO_PKG_VERSION"));
    println!("Terminal dashboard for Kubernetes pods, services and deployments");
    Ok(())
}
