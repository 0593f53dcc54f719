//! Command-line interface for shiptrack.
//!
//! This module provides the CLI structure for the `shiptrack` binary. Each
//! subcommand maps onto one store operation.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, StatusCommand,
    TrackCommand,
};

use crate::logging::Verbosity;

/// shiptrack - Record and track courier shipments
///
/// Keeps sender, receiver, route and cost for each package in a local data
/// file, and shows the simulated timeline for any tracking ID.
#[derive(Debug, Parser)]
#[command(name = "shiptrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use this data file instead of the configured one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for store events, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tracking report for a shipment
    Track(TrackCommand),

    /// Add a new shipment
    Add(AddCommand),

    /// Delete a shipment
    Delete(DeleteCommand),

    /// List every shipment in tracking ID order
    List(ListCommand),

    /// Show data file and store summary
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
