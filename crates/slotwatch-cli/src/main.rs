mod commands;
mod notify;
mod poll;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "slotwatch")]
#[command(about = "Watch an appointment booking page for open slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll until an appointment opens within the window, then notify
    Watch {
        /// Window size in days, counted from now
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
        /// Seconds to wait between checks
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
        /// Keep polling after the first match, notifying only for new ones
        #[arg(long)]
        keep_watching: bool,
    },
    /// Run a single check and print matching locations
    Check {
        /// Window size in days, counted from now
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
    /// List every location id referenced by the booking page
    Ids,
    /// Show the booking date listed on one location's page
    Date {
        /// Location id as listed by `slotwatch ids`
        location_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = slotwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Watch {
            days,
            interval,
            keep_watching,
        } => commands::run_watch(&config, days, interval, keep_watching).await,
        Commands::Check { days } => commands::run_check(&config, days).await,
        Commands::Ids => commands::run_ids(&config).await,
        Commands::Date { location_id } => commands::run_date(&config, location_id).await,
    }
}
