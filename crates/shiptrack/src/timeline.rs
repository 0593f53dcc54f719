//! Simulated leg timeline for new shipments.
//!
//! Each insert gets three timestamps derived from a fixed schedule: origin on
//! the current day at a set hour, transit a few hours later on the same run,
//! and destination a number of calendar days later at another set hour. The
//! only wall-clock input is the current date, supplied through [`Clock`].

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::config::ScheduleConfig;
use crate::error::{Error, Result};
use crate::shipment::LegTime;

/// Source of the current instant.
pub trait Clock: std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Leg timestamps assigned to one shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Departure from the origin.
    pub origin: LegTime,
    /// Pass through the transit stop, when there is one.
    pub transit: Option<LegTime>,
    /// Arrival at the destination.
    pub destination: LegTime,
}

/// Validated timeline schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    origin_time: NaiveTime,
    transit_offset: TimeDelta,
    destination_days: Days,
    destination_time: NaiveTime,
    zone_label: String,
    offset: FixedOffset,
}

impl Schedule {
    /// Build a schedule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if an hour or minute is out of
    /// range, the UTC offset is not a valid zone offset, or the destination
    /// would be reached before the transit stop.
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        let invalid = |message: String| Error::ConfigValidation { message };

        let origin_time = NaiveTime::from_hms_opt(config.origin_hour, config.origin_minute, 0)
            .ok_or_else(|| {
                invalid(format!(
                    "origin time {:02}:{:02} is not a valid time of day",
                    config.origin_hour, config.origin_minute
                ))
            })?;
        let destination_time = NaiveTime::from_hms_opt(config.destination_hour, 0, 0)
            .ok_or_else(|| {
                invalid(format!(
                    "destination_hour ({}) must be between 0 and 23",
                    config.destination_hour
                ))
            })?;
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                invalid(format!(
                    "utc_offset_minutes ({}) is not a valid zone offset",
                    config.utc_offset_minutes
                ))
            })?;

        let transit_offset = TimeDelta::hours(i64::from(config.transit_offset_hours));
        let transit_minutes =
            i64::from(config.origin_hour * 60 + config.origin_minute) + transit_offset.num_minutes();
        let destination_minutes = i64::from(config.destination_offset_days) * 24 * 60
            + i64::from(config.destination_hour * 60);
        if destination_minutes < transit_minutes {
            return Err(invalid(
                "destination must not be scheduled before the transit stop".to_string(),
            ));
        }

        Ok(Self {
            origin_time,
            transit_offset,
            destination_days: Days::new(u64::from(config.destination_offset_days)),
            destination_time,
            zone_label: config.zone_label.clone(),
            offset,
        })
    }

    /// Zone label appended to every timestamp.
    #[must_use]
    pub fn zone_label(&self) -> &str {
        &self.zone_label
    }

    /// Offset of the labelled zone from UTC.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Today's date in the labelled zone.
    #[must_use]
    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        clock.now().with_timezone(&self.offset).date_naive()
    }

    /// Derive the leg timestamps for a shipment created on `date`.
    #[must_use]
    pub fn timeline(&self, date: NaiveDate, with_transit: bool) -> Timeline {
        let origin = date.and_time(self.origin_time);
        let transit = with_transit.then(|| self.stamp(origin + self.transit_offset));
        let destination = date
            .checked_add_days(self.destination_days)
            .unwrap_or(NaiveDate::MAX)
            .and_time(self.destination_time);

        Timeline {
            origin: self.stamp(origin),
            transit,
            destination: self.stamp(destination),
        }
    }

    fn stamp(&self, local: chrono::NaiveDateTime) -> LegTime {
        LegTime::new(local, self.zone_label.clone())
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
            .expect("default schedule configuration is valid")
    }
}
