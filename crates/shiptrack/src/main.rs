//! `shiptrack` - CLI for the shipment record store
//!
//! This binary is the presentation layer: it builds one store at startup,
//! passes it to the handler for the chosen command, and turns every store
//! error into a notification on stderr with a non-zero exit code.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use shiptrack::cli::{Cli, Command, ConfigCommand, OutputFormat};
use shiptrack::render;
use shiptrack::{init_logging, Config, Result, ShipmentForm, ShipmentStore};

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config_file, data) = (cli.config, cli.data);
    match cli.command {
        Command::Track(cmd) => {
            let store = open_store(config_file, data)?;
            handle_track(&store, &cmd.tracking_id, cmd.format)
        }
        Command::Add(cmd) => {
            let mut store = open_store(config_file, data)?;
            handle_add(&mut store, &cmd.into())
        }
        Command::Delete(cmd) => {
            let mut store = open_store(config_file, data)?;
            handle_delete(&mut store, &cmd.tracking_id)
        }
        Command::List(cmd) => handle_list(&open_store(config_file, data)?, cmd.format),
        Command::Status(cmd) => handle_status(&open_store(config_file, data)?, cmd.json),
        // Loads its own file so a broken default cannot block validating another.
        Command::Config(cmd) => handle_config(config_file, cmd),
    }
}

fn open_store(
    config_file: Option<PathBuf>,
    data_override: Option<PathBuf>,
) -> Result<ShipmentStore> {
    let config = Config::load_from(config_file)?;
    let data_path = data_override.unwrap_or_else(|| config.data_path());
    let mut store = ShipmentStore::new(&data_path, config.schedule()?);
    if let Err(e) = store.load() {
        // The store is empty but usable; tell the user and carry on.
        eprintln!("Warning: {e}");
    }
    debug!("Store ready with {} shipments", store.len());
    Ok(store)
}

fn handle_track(store: &ShipmentStore, tracking_id: &str, format: OutputFormat) -> Result<()> {
    let record = store.lookup(tracking_id)?;
    match format {
        OutputFormat::Plain => println!("{}", render::tracking_report(record)),
        OutputFormat::Json => println!("{}", render::record_json(record)?),
    }
    Ok(())
}

fn handle_add(store: &mut ShipmentStore, form: &ShipmentForm) -> Result<()> {
    let record = store.insert(form)?;
    println!("Record added successfully: {}", record.tracking_id);
    Ok(())
}

fn handle_delete(store: &mut ShipmentStore, tracking_id: &str) -> Result<()> {
    let record = store.delete(tracking_id)?;
    println!("Record deleted successfully: {}", record.tracking_id);
    Ok(())
}

fn handle_list(store: &ShipmentStore, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            if store.is_empty() {
                println!("No records.");
            } else {
                print!("{}", render::listing(store.list_all()));
            }
        }
        OutputFormat::Json => println!("{}", render::listing_json(store.list_all())?),
    }
    Ok(())
}

fn handle_status(store: &ShipmentStore, json: bool) -> Result<()> {
    let stats = store.stats();
    if json {
        let status = serde_json::json!({
            "data_path": store.path(),
            "total_shipments": stats.total_shipments,
            "with_transit": stats.with_transit,
            "total_cost": stats.total_cost,
            "file_size_bytes": stats.file_size_bytes,
            "zone": store.schedule().zone_label(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("shiptrack status");
        println!("----------------");
        println!("Data file:     {}", store.path().display());
        println!("File size:     {} bytes", stats.file_size_bytes);
        println!("Shipments:     {}", stats.total_shipments);
        println!("With transit:  {}", stats.with_transit);
        println!("Total cost:    {}", render::format_cost(stats.total_cost));
        println!("Zone:          {}", store.schedule().zone_label());
    }
    Ok(())
}

fn handle_config(config_file: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                let schedule = &config.schedule;
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!();
                println!("[Schedule]");
                println!(
                    "  Origin time:        {:02}:{:02}",
                    schedule.origin_hour, schedule.origin_minute
                );
                println!(
                    "  Transit offset:     +{} hours",
                    schedule.transit_offset_hours
                );
                println!(
                    "  Destination:        +{} days at {:02}:00",
                    schedule.destination_offset_days, schedule.destination_hour
                );
                println!(
                    "  Zone:               {} (UTC{:+} minutes)",
                    schedule.zone_label, schedule.utc_offset_minutes
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_file.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_file)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
