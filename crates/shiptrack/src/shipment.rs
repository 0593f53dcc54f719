//! Core shipment types for shiptrack.
//!
//! This module defines the tracking identifier, the structured leg timestamp,
//! the stored shipment record, and the raw form input an insert starts from.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::timeline::Timeline;

/// Wall-clock layout of a leg timestamp, without the zone suffix.
pub const LEG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A case-normalized tracking identifier.
///
/// Construction trims surrounding whitespace and uppercases, so two IDs that
/// differ only in case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Normalize a raw identifier.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// The normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackingId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A leg timestamp: local wall-clock time plus the label of its zone.
///
/// Rendered as `YYYY-MM-DD HH:MM:SS <ZONE>` only when written to disk or shown
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegTime {
    /// Local date and time in the labelled zone.
    pub local: NaiveDateTime,
    /// Zone label, e.g. `IST`.
    pub zone: String,
}

fn leg_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) (\S+)$")
            .expect("Invalid leg time pattern")
    })
}

impl LegTime {
    /// Create a leg time.
    #[must_use]
    pub fn new(local: NaiveDateTime, zone: impl Into<String>) -> Self {
        Self {
            local,
            zone: zone.into(),
        }
    }

    /// Parse the persisted `YYYY-MM-DD HH:MM:SS <ZONE>` form.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the text does not match.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let caps = leg_time_pattern()
            .captures(text.trim())
            .ok_or_else(|| format!("malformed timestamp {text:?}"))?;
        let local = NaiveDateTime::parse_from_str(&caps[1], LEG_TIME_FORMAT)
            .map_err(|e| format!("invalid timestamp {text:?}: {e}"))?;
        Ok(Self::new(local, &caps[2]))
    }
}

impl fmt::Display for LegTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.local.format(LEG_TIME_FORMAT), self.zone)
    }
}

impl Serialize for LegTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LegTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(de::Error::custom)
    }
}

/// The optional intermediate stop of a shipment.
///
/// Location and time travel together, so a record can never carry one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitLeg {
    /// Where the shipment passes through.
    pub location: String,
    /// When it is scheduled to be there.
    pub time: LegTime,
}

/// A stored shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    /// Unique key.
    pub tracking_id: TrackingId,
    /// Where the shipment starts.
    pub origin: String,
    /// Where the shipment ends.
    pub destination: String,
    /// Intermediate stop, if any.
    pub transit: Option<TransitLeg>,
    /// Sender name.
    pub sender_name: String,
    /// Sender phone or email.
    pub sender_contact: String,
    /// Receiver name.
    pub receiver_name: String,
    /// Receiver phone or email.
    pub receiver_contact: String,
    /// Shipping cost, never negative.
    pub cost: f64,
    /// When the shipment leaves the origin.
    pub origin_time: LegTime,
    /// Simulated arrival at the destination.
    pub destination_time: LegTime,
}

impl ShipmentRecord {
    /// Build a record from validated input and its derived timeline.
    ///
    /// A transit timestamp in `timeline` is only used when the shipment has a
    /// transit location.
    #[must_use]
    pub fn from_parts(shipment: ValidShipment, timeline: Timeline) -> Self {
        let transit = match (shipment.transit, timeline.transit) {
            (Some(location), Some(time)) => Some(TransitLeg { location, time }),
            _ => None,
        };
        Self {
            tracking_id: shipment.tracking_id,
            origin: shipment.origin,
            destination: shipment.destination,
            transit,
            sender_name: shipment.sender_name,
            sender_contact: shipment.sender_contact,
            receiver_name: shipment.receiver_name,
            receiver_contact: shipment.receiver_contact,
            cost: shipment.cost,
            origin_time: timeline.origin,
            destination_time: timeline.destination,
        }
    }

    /// Check if the shipment has an intermediate stop.
    #[must_use]
    pub fn has_transit(&self) -> bool {
        self.transit.is_some()
    }

    /// Transit location, if any.
    #[must_use]
    pub fn transit_location(&self) -> Option<&str> {
        self.transit.as_ref().map(|leg| leg.location.as_str())
    }

    /// Transit timestamp, if any.
    #[must_use]
    pub fn transit_time(&self) -> Option<&LegTime> {
        self.transit.as_ref().map(|leg| &leg.time)
    }
}

/// Raw insert input, one string per form entry.
///
/// Every field except `transit` is required. Values are trimmed before they
/// are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentForm {
    /// Tracking identifier, any case.
    pub tracking_id: String,
    /// Origin location.
    pub origin: String,
    /// Transit location, blank for none.
    pub transit: String,
    /// Destination location.
    pub destination: String,
    /// Sender name.
    pub sender_name: String,
    /// Sender contact.
    pub sender_contact: String,
    /// Receiver name.
    pub receiver_name: String,
    /// Receiver contact.
    pub receiver_contact: String,
    /// Cost as typed.
    pub cost: String,
}

/// Form input that passed presence and cost checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidShipment {
    /// Normalized identifier.
    pub tracking_id: TrackingId,
    /// Origin location.
    pub origin: String,
    /// Transit location, `None` when the form left it blank.
    pub transit: Option<String>,
    /// Destination location.
    pub destination: String,
    /// Sender name.
    pub sender_name: String,
    /// Sender contact.
    pub sender_contact: String,
    /// Receiver name.
    pub receiver_name: String,
    /// Receiver contact.
    pub receiver_contact: String,
    /// Parsed cost.
    pub cost: f64,
}

impl ShipmentForm {
    /// Required fields in form order, paired with their trimmed values.
    fn required_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("tracking_id", self.tracking_id.trim()),
            ("origin", self.origin.trim()),
            ("destination", self.destination.trim()),
            ("sender_name", self.sender_name.trim()),
            ("sender_contact", self.sender_contact.trim()),
            ("receiver_name", self.receiver_name.trim()),
            ("receiver_contact", self.receiver_contact.trim()),
            ("cost", self.cost.trim()),
        ]
    }

    /// Check presence of every required field, then the cost.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank
    /// required field, or [`ValidationError::InvalidCost`] if the cost is not
    /// a finite, non-negative number.
    pub fn validate(&self) -> std::result::Result<ValidShipment, ValidationError> {
        let tracking_id = TrackingId::new(&self.tracking_id);

        if let Some((name, _)) = self
            .required_fields()
            .into_iter()
            .find(|(_, value)| value.is_empty())
        {
            return Err(ValidationError::MissingField(name));
        }

        let cost = parse_cost(&self.cost)?;
        let transit = Some(self.transit.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(ValidShipment {
            tracking_id,
            origin: self.origin.trim().to_string(),
            transit,
            destination: self.destination.trim().to_string(),
            sender_name: self.sender_name.trim().to_string(),
            sender_contact: self.sender_contact.trim().to_string(),
            receiver_name: self.receiver_name.trim().to_string(),
            receiver_contact: self.receiver_contact.trim().to_string(),
            cost,
        })
    }
}

/// Parse a cost string into a finite, non-negative number.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCost`] carrying the rejected text.
pub fn parse_cost(raw: &str) -> std::result::Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        // `-0` passes the range check; adding zero clears the sign bit.
        Ok(cost) if cost.is_finite() && cost >= 0.0 => Ok(cost + 0.0),
        _ => Err(ValidationError::InvalidCost(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form() -> ShipmentForm {
        ShipmentForm {
            tracking_id: " abc123 ".to_string(),
            origin: "Delhi".to_string(),
            transit: String::new(),
            destination: "Mumbai".to_string(),
            sender_name: "A".to_string(),
            sender_contact: "1".to_string(),
            receiver_name: "B".to_string(),
            receiver_contact: "2".to_string(),
            cost: "100".to_string(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn test_tracking_id_normalizes() {
        assert_eq!(TrackingId::new("  ab-12c ").as_str(), "AB-12C");
        assert_eq!(TrackingId::new("abc"), TrackingId::new("ABC"));
        assert!(TrackingId::new("   ").is_empty());
    }

    #[test]
    fn test_tracking_id_ordering_is_lexicographic() {
        let mut ids = vec![
            TrackingId::new("b2"),
            TrackingId::new("A10"),
            TrackingId::new("a2"),
        ];
        ids.sort();
        let ids: Vec<_> = ids.iter().map(TrackingId::as_str).collect();
        assert_eq!(ids, vec!["A10", "A2", "B2"]);
    }

    #[test]
    fn test_leg_time_display_and_parse() {
        let time = LegTime::new(at(2024, 3, 5, 10), "IST");
        assert_eq!(time.to_string(), "2024-03-05 10:00:00 IST");
        assert_eq!(LegTime::parse("2024-03-05 10:00:00 IST"), Ok(time));
    }

    #[test]
    fn test_leg_time_parse_rejects_garbage() {
        assert!(LegTime::parse("yesterday").is_err());
        assert!(LegTime::parse("2024-03-05 10:00:00").is_err());
        assert!(LegTime::parse("2024-13-05 10:00:00 IST").is_err());
    }

    #[test]
    fn test_leg_time_serde_uses_string_form() {
        let time = LegTime::new(at(2024, 1, 1, 15), "UTC");
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"2024-01-01 15:00:00 UTC\"");
        let back: LegTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn test_validate_ok_without_transit() {
        let valid = form().validate().unwrap();
        assert_eq!(valid.tracking_id.as_str(), "ABC123");
        assert!(valid.transit.is_none());
        assert!((valid.cost - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_keeps_transit() {
        let mut f = form();
        f.transit = " Nagpur ".to_string();
        assert_eq!(f.validate().unwrap().transit.as_deref(), Some("Nagpur"));
    }

    #[test]
    fn test_validate_missing_field_named() {
        let mut f = form();
        f.receiver_contact = "  ".to_string();
        assert_eq!(
            f.validate(),
            Err(ValidationError::MissingField("receiver_contact"))
        );

        let mut f = form();
        f.tracking_id = String::new();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("tracking_id")));
    }

    #[test]
    fn test_missing_field_checked_before_cost() {
        let mut f = form();
        f.origin = String::new();
        f.cost = "abc".to_string();
        assert_eq!(f.validate(), Err(ValidationError::MissingField("origin")));
    }

    #[test]
    fn test_parse_cost() {
        assert!(parse_cost("0").is_ok());
        assert!(parse_cost(" 12.50 ").is_ok());
        assert_eq!(
            parse_cost("abc"),
            Err(ValidationError::InvalidCost("abc".to_string()))
        );
        assert!(parse_cost("-1").is_err());
        let zero = parse_cost("-0").unwrap();
        assert!(zero.is_sign_positive());
        assert_eq!(format!("{zero:.2}"), "0.00");
        assert!(parse_cost("inf").is_err());
        assert!(parse_cost("NaN").is_err());
    }

    #[test]
    fn test_from_parts_pairs_transit() {
        let mut f = form();
        f.transit = "Nagpur".to_string();
        let timeline = Timeline {
            origin: LegTime::new(at(2024, 1, 1, 10), "IST"),
            transit: Some(LegTime::new(at(2024, 1, 1, 12), "IST")),
            destination: LegTime::new(at(2024, 1, 3, 15), "IST"),
        };
        let record = ShipmentRecord::from_parts(f.validate().unwrap(), timeline.clone());
        assert_eq!(record.transit_location(), Some("Nagpur"));
        assert_eq!(record.transit_time(), timeline.transit.as_ref());

        let record = ShipmentRecord::from_parts(form().validate().unwrap(), timeline);
        assert!(!record.has_transit());
        assert!(record.transit_time().is_none());
    }
}
