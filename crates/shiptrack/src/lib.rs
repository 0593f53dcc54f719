//! `shiptrack` - Courier shipment record keeping
//!
//! This library provides the shipment record store: validated insertion with
//! a simulated leg timeline, lookup and deletion by case-insensitive tracking
//! ID, ordered listing, and wholesale persistence to a JSON data file.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod shipment;
pub mod storage;
pub mod timeline;

pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use logging::init_logging;
pub use shipment::{LegTime, ShipmentForm, ShipmentRecord, TrackingId, TransitLeg};
pub use storage::{ShipmentStore, StoreStats};
pub use timeline::{Clock, FixedClock, Schedule, SystemClock, Timeline};
