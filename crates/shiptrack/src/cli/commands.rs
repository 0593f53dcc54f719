//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::shipment::ShipmentForm;

/// Track command arguments.
#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Tracking ID to look up (case-insensitive)
    pub tracking_id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
///
/// Blank values are accepted here and rejected by the store, so the user sees
/// the same field-level error the store reports.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Tracking ID for the new shipment
    #[arg(long = "id", value_name = "ID")]
    pub tracking_id: String,

    /// Origin location
    #[arg(long)]
    pub origin: String,

    /// Transit location (optional)
    #[arg(long, default_value = "")]
    pub transit: String,

    /// Destination location
    #[arg(long)]
    pub destination: String,

    /// Sender name
    #[arg(long)]
    pub sender_name: String,

    /// Sender contact
    #[arg(long)]
    pub sender_contact: String,

    /// Receiver name
    #[arg(long)]
    pub receiver_name: String,

    /// Receiver contact
    #[arg(long)]
    pub receiver_contact: String,

    /// Shipping cost
    #[arg(long, allow_hyphen_values = true)]
    pub cost: String,
}

impl From<AddCommand> for ShipmentForm {
    fn from(cmd: AddCommand) -> Self {
        Self {
            tracking_id: cmd.tracking_id,
            origin: cmd.origin,
            transit: cmd.transit,
            destination: cmd.destination,
            sender_name: cmd.sender_name,
            sender_contact: cmd.sender_contact,
            receiver_name: cmd.receiver_name,
            receiver_contact: cmd.receiver_contact,
            cost: cmd.cost,
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Tracking ID to remove (case-insensitive)
    pub tracking_id: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_add_command_into_form() {
        let cmd = AddCommand {
            tracking_id: "abc123".to_string(),
            origin: "Delhi".to_string(),
            transit: String::new(),
            destination: "Mumbai".to_string(),
            sender_name: "A".to_string(),
            sender_contact: "1".to_string(),
            receiver_name: "B".to_string(),
            receiver_contact: "2".to_string(),
            cost: "100".to_string(),
        };
        let form = ShipmentForm::from(cmd);
        assert_eq!(form.tracking_id, "abc123");
        assert_eq!(form.transit, "");
        assert_eq!(form.cost, "100");
    }

    #[test]
    fn test_track_command_debug() {
        let cmd = TrackCommand {
            tracking_id: "X1".to_string(),
            format: OutputFormat::Json,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("X1"));
        assert!(debug_str.contains("Json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
