//! Operator CLI for catalog synchronization.
//!
//! Pulls ships, organization data or organization member rosters from the
//! Star Citizen API into the app database. Per-item failures are reported
//! in the run summary without aborting the run; missing API credentials
//! abort before any work starts.

use clap::{Parser, Subcommand};
use stanton::server::{config::Config, scapi, service::sync, startup};

#[derive(Parser)]
#[command(
    name = "stanton-sync",
    about = "Synchronize catalog data from the Star Citizen API"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Overwrite existing rows instead of skipping them
    #[arg(long, global = true)]
    force: bool,

    /// Drop cached API responses before fetching
    #[arg(long, global = true)]
    clear_cache: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Sync the full ship catalog
    Ships,
    /// Sync organization details by SID
    Organization { sid: String },
    /// Sync the organization member roster by SID
    Members { sid: String },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let cli = Cli::parse();

    let config = match Config::sync_from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let sc_client = scapi::Client::builder()
        .base_url(&config.sc_api_base_url)
        .maybe_api_key(config.sc_api_key)
        .build()
        .expect("Failed to build the SC API client");

    if !sc_client.is_enabled() {
        eprintln!("Star Citizen API client is not configured, set SC_API_KEY in the environment");
        std::process::exit(1);
    }

    if cli.clear_cache {
        sc_client.clear_cache(None);
    }

    let db = startup::connect_to_app_database(&config.database_url)
        .await
        .expect("Failed to connect to the app database");

    let outcome = match &cli.command {
        Command::Ships => {
            let report = sync::ShipSyncService::new(&db, &sc_client)
                .sync_ships(cli.force)
                .await;

            report.map(|report| print_report("Ship sync complete", &report))
        }
        Command::Organization { sid } => sync::OrgSyncService::new(&db, &sc_client)
            .sync_organization(sid)
            .await
            .map(|outcome| {
                println!("Organization sync complete ({outcome:?})");
            }),
        Command::Members { sid } => {
            let report = sync::OrgSyncService::new(&db, &sc_client)
                .sync_members(sid, cli.force)
                .await;

            report.map(|report| print_report("Member sync complete", &report))
        }
    };

    if let Err(err) = outcome {
        eprintln!("Sync failed: {err}");
        std::process::exit(1);
    }
}

fn print_report(heading: &str, report: &sync::SyncReport) {
    println!("{heading}");
    println!("  processed: {}", report.processed());
    println!("  created:   {}", report.created);
    println!("  updated:   {}", report.updated);
    println!("  skipped:   {}", report.skipped);
    println!("  errors:    {}", report.errored);
}
