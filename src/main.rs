use anyhow::Result;
use clap::{Parser, Subcommand};

/// reptrack - workout logging and monthly calendar
#[derive(Parser)]
#[command(name = "reptrack")]
#[command(about = "Log exercise reps and compare them to your plan", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Send a text message through the email to SMS gateway
    Sms {
        /// Phone number, digits only or with + and separators
        #[arg(long)]
        to: String,

        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = reptrack::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    reptrack::observability::init_observability(
        "reptrack",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => reptrack::cli::serve(config, host, port).await,
        Commands::Migrate => reptrack::cli::migrate(config).await,
        Commands::Reset => reptrack::cli::reset(config).await,
        Commands::Sms { to, message } => reptrack::cli::send_sms(config, to, message).await,
    }
}
