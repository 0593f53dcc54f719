//! Storage layer for shiptrack.
//!
//! This module provides the shipment record store: an ordered in-memory map
//! from tracking ID to record, loaded wholesale from a JSON data file and
//! rewritten wholesale after every insert or delete.

pub mod document;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::shipment::{ShipmentForm, ShipmentRecord, TrackingId};
use crate::timeline::{Clock, Schedule, SystemClock};

/// Store of shipment records backed by a single data file.
///
/// Provides:
/// - Wholesale load from and save to the data file
/// - Validated insertion with derived leg timestamps
/// - Deletion and lookup by case-insensitive tracking ID
/// - Listing in ascending tracking ID order
///
/// A failed insert or delete leaves the in-memory records exactly as they
/// were before the call.
#[derive(Debug)]
pub struct ShipmentStore {
    /// Path to the data file.
    path: PathBuf,
    /// Records keyed by normalized tracking ID.
    records: BTreeMap<TrackingId, ShipmentRecord>,
    /// Schedule used to stamp new shipments.
    schedule: Schedule,
    /// Source of today's date for new shipments.
    clock: Box<dyn Clock>,
}

impl ShipmentStore {
    /// Create an empty store bound to `path`, using the system clock.
    ///
    /// Nothing is read until [`ShipmentStore::load`] is called.
    #[must_use]
    pub fn new(path: impl AsRef<Path>, schedule: Schedule) -> Self {
        Self::with_clock(path, schedule, SystemClock)
    }

    /// Create an empty store bound to `path` with a custom clock.
    #[must_use]
    pub fn with_clock(
        path: impl AsRef<Path>,
        schedule: Schedule,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: BTreeMap::new(),
            schedule,
            clock: Box::new(clock),
        }
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the schedule used for new shipments.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Number of stored shipments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no shipments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the in-memory records with the contents of the data file.
    ///
    /// A missing file yields an empty store. Returns the number of records
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageRead`] if the file exists but cannot be read or
    /// parsed. The store is left empty and remains usable.
    pub fn load(&mut self) -> Result<usize> {
        self.records.clear();

        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(0);
            }
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                return Err(Error::storage_read(&self.path, e.to_string()));
            }
        };

        match document::decode(&text) {
            Ok(records) => {
                self.records = records;
                info!(
                    "Loaded {} shipments from {}",
                    self.records.len(),
                    self.path.display()
                );
                Ok(self.records.len())
            }
            Err(message) => {
                warn!("Could not parse {}: {}", self.path.display(), message);
                Err(Error::storage_read(&self.path, message))
            }
        }
    }

    /// Write every record to the data file, replacing its contents.
    ///
    /// The data is written to a sibling temporary file first and renamed into
    /// place, so a failed save never truncates the previous file. Missing
    /// parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if any step fails. In-memory records
    /// are untouched either way.
    pub fn save(&self) -> Result<()> {
        let bytes = document::encode(&self.records)
            .map_err(|e| Error::storage_write(&self.path, std::io::Error::other(e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| Error::storage_write(&self.path, source))?;
            }
        }

        let tmp = temp_path(&self.path);
        if let Err(source) = std::fs::write(&tmp, &bytes) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::storage_write(&self.path, source));
        }
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::storage_write(&self.path, source));
        }

        debug!(
            "Saved {} shipments to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Validate a form, stamp it, store it, and persist.
    ///
    /// Checks run in this order: tracking ID normalization, presence of
    /// every required field, cost, then uniqueness.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a blank required field or a bad cost
    /// - [`Error::DuplicateKey`] if the tracking ID is already stored
    /// - [`Error::StorageWrite`] if persisting fails; the insert is undone
    pub fn insert(&mut self, form: &ShipmentForm) -> Result<ShipmentRecord> {
        let shipment = form.validate()?;

        if self.records.contains_key(&shipment.tracking_id) {
            debug!("Rejecting duplicate tracking ID {}", shipment.tracking_id);
            return Err(Error::DuplicateKey(shipment.tracking_id));
        }

        let today = self.schedule.today(self.clock.as_ref());
        let timeline = self.schedule.timeline(today, shipment.transit.is_some());
        let record = ShipmentRecord::from_parts(shipment, timeline);
        let tracking_id = record.tracking_id.clone();

        self.records.insert(tracking_id.clone(), record.clone());
        if let Err(e) = self.save() {
            self.records.remove(&tracking_id);
            warn!("Insert of {} rolled back: {}", tracking_id, e);
            return Err(e);
        }

        info!("Added shipment {}", tracking_id);
        Ok(record)
    }

    /// Remove a shipment and persist.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no record has this tracking ID
    /// - [`Error::StorageWrite`] if persisting fails; the record is restored
    pub fn delete(&mut self, tracking_id: &str) -> Result<ShipmentRecord> {
        let tracking_id = TrackingId::new(tracking_id);
        let Some(record) = self.records.remove(&tracking_id) else {
            return Err(Error::NotFound(tracking_id));
        };

        if let Err(e) = self.save() {
            self.records.insert(tracking_id.clone(), record);
            warn!("Delete of {} rolled back: {}", tracking_id, e);
            return Err(e);
        }

        info!("Deleted shipment {}", tracking_id);
        Ok(record)
    }

    /// Find a shipment by tracking ID, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this tracking ID.
    pub fn lookup(&self, tracking_id: &str) -> Result<&ShipmentRecord> {
        let tracking_id = TrackingId::new(tracking_id);
        self.records
            .get(&tracking_id)
            .ok_or(Error::NotFound(tracking_id))
    }

    /// Iterate over all shipments in ascending tracking ID order.
    ///
    /// Each call starts a fresh pass over the current records.
    pub fn list_all(&self) -> impl Iterator<Item = (&TrackingId, &ShipmentRecord)> + '_ {
        self.records.iter()
    }

    /// Summary figures for the store.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let total_cost = self.records.values().map(|r| r.cost).sum();
        let with_transit = self.records.values().filter(|r| r.has_transit()).count();
        let file_size_bytes = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);

        StoreStats {
            total_shipments: self.records.len(),
            with_transit,
            total_cost,
            file_size_bytes,
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    /// Total number of shipments stored.
    pub total_shipments: usize,
    /// Shipments that have a transit stop.
    pub with_transit: usize,
    /// Sum of all costs.
    pub total_cost: f64,
    /// Size of the data file in bytes, 0 if it does not exist.
    pub file_size_bytes: u64,
}

/// Sibling path used while writing the data file.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("shipments"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}
