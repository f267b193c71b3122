//! Keyed wager record store with a JSON file round-trip.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{LedgerError, Result};

use super::record::WagerRecord;

/// Records keyed by `(date, group)`, iterated in date order.
///
/// One group settles one wager per day, so re-entering a key replaces the
/// earlier record rather than accumulating a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: BTreeMap<(NaiveDate, String), WagerRecord>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record at its `(date, group)` key. Returns
    /// the record that was replaced, if any.
    pub fn upsert(&mut self, record: WagerRecord) -> Result<Option<WagerRecord>> {
        record.validate()?;
        let key = (record.date, record.group.clone());
        Ok(self.records.insert(key, record))
    }

    /// Removes and returns the record at `(date, group)`.
    pub fn remove(&mut self, date: NaiveDate, group: &str) -> Result<WagerRecord> {
        self.records
            .remove(&(date, group.to_owned()))
            .ok_or_else(|| {
                LedgerError::RecordNotFound {
                    date,
                    group: group.to_owned(),
                }
                .into()
            })
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate, group: &str) -> Option<&WagerRecord> {
        self.records.get(&(date, group.to_owned()))
    }

    /// Records in ascending `(date, group)` order.
    pub fn iter(&self) -> impl Iterator<Item = &WagerRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Loads a store from `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger file, starting empty");
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };
        let records: Vec<WagerRecord> = serde_json::from_str(&raw)?;
        let mut store = Self::new();
        for record in records {
            store.upsert(record)?;
        }
        debug!(path = %path.display(), records = store.len(), "ledger loaded");
        Ok(store)
    }

    /// Writes the store to `path` as a JSON array in iteration order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let records: Vec<&WagerRecord> = self.iter().collect();
        let raw = serde_json::to_string_pretty(&records)?;
        fs::write(path, raw)?;
        debug!(path = %path.display(), records = self.len(), "ledger saved");
        Ok(())
    }
}
