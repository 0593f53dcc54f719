//! On-disk layout of the shipment data file.
//!
//! The file holds one JSON object mapping tracking ID to a flat shipment
//! object. Transit location and time are two nullable fields there; they are
//! folded into a single optional leg when loaded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shipment::{LegTime, ShipmentRecord, TrackingId, TransitLeg};

/// Indentation used when writing the data file.
const INDENT: &[u8] = b"    ";

/// One shipment as it appears in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredShipment {
    /// Origin location.
    pub origin: String,
    /// Destination location.
    pub destination: String,
    /// Transit location or null.
    pub transit: Option<String>,
    /// Sender name.
    pub sender_name: String,
    /// Sender contact.
    pub sender_contact: String,
    /// Receiver name.
    pub receiver_name: String,
    /// Receiver contact.
    pub receiver_contact: String,
    /// Cost.
    pub cost: f64,
    /// Origin timestamp.
    pub origin_time: LegTime,
    /// Transit timestamp or null.
    pub transit_time: Option<LegTime>,
    /// Destination timestamp.
    pub destination_time: LegTime,
}

impl From<&ShipmentRecord> for StoredShipment {
    fn from(record: &ShipmentRecord) -> Self {
        Self {
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            transit: record.transit_location().map(str::to_string),
            sender_name: record.sender_name.clone(),
            sender_contact: record.sender_contact.clone(),
            receiver_name: record.receiver_name.clone(),
            receiver_contact: record.receiver_contact.clone(),
            cost: record.cost,
            origin_time: record.origin_time.clone(),
            transit_time: record.transit_time().cloned(),
            destination_time: record.destination_time.clone(),
        }
    }
}

impl StoredShipment {
    /// Convert into an in-memory record under `tracking_id`.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if only one of transit and
    /// transit time is set, or if the cost is negative or not finite.
    pub fn into_record(self, tracking_id: TrackingId) -> Result<ShipmentRecord, String> {
        let transit = match (self.transit, self.transit_time) {
            (Some(location), Some(time)) => Some(TransitLeg { location, time }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(format!("{tracking_id}: transit is set but transit_time is null"))
            }
            (None, Some(_)) => {
                return Err(format!("{tracking_id}: transit_time is set but transit is null"))
            }
        };

        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(format!("{tracking_id}: cost {} is not a non-negative number", self.cost));
        }

        Ok(ShipmentRecord {
            tracking_id,
            origin: self.origin,
            destination: self.destination,
            transit,
            sender_name: self.sender_name,
            sender_contact: self.sender_contact,
            receiver_name: self.receiver_name,
            receiver_contact: self.receiver_contact,
            cost: self.cost,
            origin_time: self.origin_time,
            destination_time: self.destination_time,
        })
    }
}

/// Parse a data file into records keyed by normalized tracking ID.
///
/// # Errors
///
/// Returns a description of the problem if the text is not a valid document,
/// a record is inconsistent, or two keys normalize to the same ID.
pub fn decode(text: &str) -> Result<BTreeMap<TrackingId, ShipmentRecord>, String> {
    let raw: BTreeMap<String, StoredShipment> =
        serde_json::from_str(text).map_err(|e| e.to_string())?;

    let mut records = BTreeMap::new();
    for (key, stored) in raw {
        let tracking_id = TrackingId::new(&key);
        if tracking_id.is_empty() {
            return Err("blank tracking ID".to_string());
        }
        if records.contains_key(&tracking_id) {
            return Err(format!("tracking ID {tracking_id} appears more than once"));
        }
        let record = stored.into_record(tracking_id.clone())?;
        records.insert(tracking_id, record);
    }
    Ok(records)
}

/// Serialize records into the data file layout.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode(records: &BTreeMap<TrackingId, ShipmentRecord>) -> serde_json::Result<Vec<u8>> {
    let document: BTreeMap<&str, StoredShipment> = records
        .iter()
        .map(|(id, record)| (id.as_str(), StoredShipment::from(record)))
        .collect();

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;
    Ok(out)
}
