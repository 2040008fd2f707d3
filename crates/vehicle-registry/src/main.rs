//! Vehicle Registry - command line access to the vehicles store

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{Config, LogFormat};
use vehicle_db::{Database, NewVehicle, VehicleRepository};

/// Vehicle Registry - look up and update registered vehicles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// SQLite database path (overrides the config file)
    #[arg(long, env = "VEHICLE_REGISTRY_DATABASE")]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new vehicle
    Add {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        owner: i64,
        #[arg(long)]
        model: String,
        #[arg(long, default_value = "garage")]
        stored: String,
    },
    /// Look up a vehicle by id, optionally checking owner or status
    Get {
        #[arg(long)]
        id: i64,
        #[arg(long, conflicts_with = "status")]
        owner: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Look up a vehicle by plate
    Plate { plate: String },
    /// List every vehicle of an owner
    Owned { owner: i64 },
    /// Change the status of a vehicle
    SetStatus {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        status: String,
    },
    /// Delete a vehicle by plate
    Delete { plate: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if let Some(path) = args.database {
        config.database.path = path;
    }

    // Initialize logging
    init_logging(&config.logging.level, config.logging.format);

    info!("Starting Vehicle Registry v{}", env!("CARGO_PKG_VERSION"));

    // Create data directory
    if let Some(parent) = Path::new(&config.database.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    // Initialize database
    let db = Database::new(&config.database.url())
        .await
        .context("Failed to open vehicle database")?;
    let repo = VehicleRepository::new(Arc::new(db.clone()));

    let outcome = run(&repo, args.command).await;
    db.close().await;
    outcome
}

/// Execute one subcommand and print its result as JSON
async fn run(repo: &VehicleRepository, command: Command) -> Result<()> {
    match command {
        Command::Add {
            plate,
            owner,
            model,
            stored,
        } => {
            let vehicle = repo
                .insert_vehicle(NewVehicle {
                    plate,
                    owner,
                    model,
                    stored,
                })
                .await?;
            info!(id = vehicle.id, plate = %vehicle.plate, "Vehicle registered");
            print_json(&vehicle)
        }
        Command::Get {
            id,
            owner: Some(owner),
            ..
        } => print_json(&repo.get_vehicle_owner(id, owner).await),
        Command::Get {
            id,
            status: Some(status),
            ..
        } => print_json(&repo.get_vehicle_status(id, &status).await),
        Command::Get { id, .. } => print_json(&repo.get_vehicle_by_id(id).await),
        Command::Plate { plate } => print_json(&repo.get_vehicle_plate(&plate).await),
        Command::Owned { owner } => print_json(&repo.get_owned_vehicles(owner).await),
        Command::SetStatus { id, status } => {
            print_json(&repo.set_vehicle_status(id, &status).await)
        }
        Command::Delete { plate } => print_json(&repo.delete_vehicle(&plate).await),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays pure JSON
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
