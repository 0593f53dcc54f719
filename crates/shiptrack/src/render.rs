//! Text and JSON renderings of shipment records.
//!
//! Timestamps are turned into strings here and in the data file only. Every
//! record carries a destination time, and a transit stop always has its time.

use std::fmt::Write as _;

use serde::Serialize;

use crate::shipment::{ShipmentRecord, TrackingId};
use crate::storage::document::StoredShipment;

/// Currency symbol printed before costs.
const CURRENCY: &str = "₹";

/// Full tracking report for one shipment.
#[must_use]
pub fn tracking_report(record: &ShipmentRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tracking ID: {}", record.tracking_id);
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out);
    let _ = writeln!(out, "SENDER INFORMATION:");
    let _ = writeln!(out, "Name: {}", record.sender_name);
    let _ = writeln!(out, "Contact: {}", record.sender_contact);
    let _ = writeln!(out);
    let _ = writeln!(out, "RECEIVER INFORMATION:");
    let _ = writeln!(out, "Name: {}", record.receiver_name);
    let _ = writeln!(out, "Contact: {}", record.receiver_contact);
    let _ = writeln!(out);
    let _ = writeln!(out, "SHIPMENT DETAILS:");
    let _ = writeln!(out, "Cost: {}", format_cost(record.cost));
    let _ = writeln!(out);
    let _ = writeln!(out, "TIMELINE:");
    let _ = writeln!(out, "Origin ({}): {}", record.origin, record.origin_time);
    if let Some(transit) = &record.transit {
        let _ = writeln!(out, "Transit ({}): {}", transit.location, transit.time);
    }
    let _ = write!(
        out,
        "Destination ({}): {}",
        record.destination, record.destination_time
    );
    out
}

/// One block of the full listing.
#[must_use]
pub fn listing_entry(tracking_id: &TrackingId, record: &ShipmentRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID: {tracking_id}");
    let _ = writeln!(out, "Sender: {}", record.sender_name);
    let _ = writeln!(out, "Receiver: {}", record.receiver_name);
    let _ = writeln!(out, "Cost: {}", format_cost(record.cost));
    let _ = writeln!(out, "Origin: {} ({})", record.origin, record.origin_time);
    if let Some(transit) = &record.transit {
        let _ = writeln!(out, "Transit: {} ({})", transit.location, transit.time);
    }
    let _ = writeln!(
        out,
        "Destination: {} ({})",
        record.destination, record.destination_time
    );
    let _ = writeln!(out, "{}", "-".repeat(40));
    out
}

/// Full listing of every shipment, in the order given.
#[must_use]
pub fn listing<'a>(
    entries: impl IntoIterator<Item = (&'a TrackingId, &'a ShipmentRecord)>,
) -> String {
    entries
        .into_iter()
        .map(|(id, record)| listing_entry(id, record))
        .collect()
}

/// Format a cost with its currency symbol.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    format!("{CURRENCY}{cost:.2}")
}

/// A shipment in the data file layout, tagged with its tracking ID.
#[derive(Debug, Serialize)]
pub struct JsonShipment<'a> {
    /// Tracking identifier.
    pub tracking_id: &'a TrackingId,
    /// Remaining fields, flattened.
    #[serde(flatten)]
    pub shipment: StoredShipment,
}

impl<'a> JsonShipment<'a> {
    /// Wrap a record for JSON output.
    #[must_use]
    pub fn new(record: &'a ShipmentRecord) -> Self {
        Self {
            tracking_id: &record.tracking_id,
            shipment: StoredShipment::from(record),
        }
    }
}

/// Pretty JSON for one shipment.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn record_json(record: &ShipmentRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonShipment::new(record))
}

/// Pretty JSON array for many shipments.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn listing_json<'a>(
    entries: impl IntoIterator<Item = (&'a TrackingId, &'a ShipmentRecord)>,
) -> serde_json::Result<String> {
    let items: Vec<_> = entries
        .into_iter()
        .map(|(_, record)| JsonShipment::new(record))
        .collect();
    serde_json::to_string_pretty(&items)
}
