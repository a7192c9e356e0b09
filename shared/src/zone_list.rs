//! Zone List - ordered collection of fixed-offset time zones
//!
//! Every edit returns a new list and leaves the receiver untouched, so the
//! host can detect a change by comparing old and new values. Degenerate edits
//! (cancelled drags, stale indices) hand back an unchanged copy.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named time zone with a fixed UTC offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeZoneEntry {
    /// Unique name within a list (e.g., "IST")
    pub name: String,
    /// Offset from UTC in hours; may be fractional
    pub offset_hours: f64,
}

impl TimeZoneEntry {
    pub fn new(name: impl Into<String>, offset_hours: f64) -> Self {
        Self {
            name: name.into(),
            offset_hours,
        }
    }

    /// Offset rounded to whole minutes
    pub fn offset_minutes(&self) -> i64 {
        crate::time_model::offset_to_minutes(self.offset_hours)
    }

    /// Format the offset as "UTC±hh:mm"
    pub fn format_utc_offset(&self) -> String {
        let minutes = self.offset_minutes();
        let sign = if minutes >= 0 { "+" } else { "-" };
        let abs_minutes = minutes.unsigned_abs();
        format!("UTC{}{:02}:{:02}", sign, abs_minutes / 60, abs_minutes % 60)
    }
}

/// Largest offset magnitude accepted by `ZoneList::new`, in hours
pub const MAX_OFFSET_HOURS: f64 = 26.0;

/// The zones every session starts with
pub fn default_zones() -> Vec<TimeZoneEntry> {
    vec![
        TimeZoneEntry::new("UTC", 0.0),
        TimeZoneEntry::new("IST", 5.5),
        TimeZoneEntry::new("EST", -5.0),
        TimeZoneEntry::new("PST", -8.0),
    ]
}

/// Error type for building a zone list
#[derive(Debug, Error, PartialEq)]
pub enum ZoneListError {
    /// Two entries share a name
    #[error("duplicate zone name: {0}")]
    DuplicateName(String),
    /// An offset is NaN or infinite
    #[error("zone {0} has a non-finite offset")]
    NonFiniteOffset(String),
    /// An offset lies outside ±`MAX_OFFSET_HOURS`
    #[error("zone {0} has offset {1}h outside the ±26h range")]
    OffsetOutOfRange(String, f64),
}

/// Ordered, display-order list of zones with unique names
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneList {
    entries: Vec<TimeZoneEntry>,
}

impl Default for ZoneList {
    fn default() -> Self {
        Self {
            entries: default_zones(),
        }
    }
}

impl ZoneList {
    /// Build a list, rejecting duplicate names and unusable offsets
    pub fn new(entries: Vec<TimeZoneEntry>) -> Result<Self, ZoneListError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !entry.offset_hours.is_finite() {
                return Err(ZoneListError::NonFiniteOffset(entry.name.clone()));
            }
            if entry.offset_hours.abs() > MAX_OFFSET_HOURS {
                return Err(ZoneListError::OffsetOutOfRange(
                    entry.name.clone(),
                    entry.offset_hours,
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ZoneListError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TimeZoneEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeZoneEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeZoneEntry> {
        self.entries.iter()
    }

    /// Move the entry at `from` so it lands at `to`
    ///
    /// `to` indexes the list after the entry has been taken out. A `None`
    /// destination (cancelled drop) or any out-of-bounds index returns an
    /// unchanged copy.
    pub fn reorder(&self, from: usize, to: Option<usize>) -> Self {
        let Some(to) = to else {
            debug!("Drop cancelled, order unchanged");
            return self.clone();
        };
        if from >= self.entries.len() || to >= self.entries.len() {
            debug!("Ignoring reorder {} -> {} on {} zones", from, to, self.entries.len());
            return self.clone();
        }

        let mut entries = self.entries.clone();
        let moved = entries.remove(from);
        entries.insert(to, moved);
        Self { entries }
    }

    /// Drop the entry at `index`; out-of-range indices return an unchanged copy
    pub fn remove(&self, index: usize) -> Self {
        if index >= self.entries.len() {
            debug!("Ignoring remove of index {} on {} zones", index, self.entries.len());
            return self.clone();
        }

        let entries = self
            .entries
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, entry)| entry.clone())
            .collect();
        Self { entries }
    }

    /// Reverse the display order
    pub fn reverse(&self) -> Self {
        Self {
            entries: self.entries.iter().rev().cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ZoneList {
    type Item = &'a TimeZoneEntry;
    type IntoIter = std::slice::Iter<'a, TimeZoneEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
