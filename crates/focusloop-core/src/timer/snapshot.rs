//! Background-survival snapshots.
//!
//! An in-progress run is externalized as a flat triple of absolute start
//! time, run length, and mode - never a live timer handle - so recovery
//! after an arbitrarily long process suspension stays exact against the
//! wall clock. The triple is stored as three independent key/value
//! entries, verbatim.

use serde::{Deserialize, Serialize};

use super::mode::Mode;
use crate::error::{SnapshotError, StoreError};
use crate::storage::KvStore;

pub const KEY_STARTED_AT: &str = "timer.started_at_epoch_ms";
pub const KEY_RUN_LENGTH: &str = "timer.run_length_ms";
pub const KEY_MODE: &str = "timer.mode";

/// The raw run triple persisted across process suspension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSnapshot {
    pub started_at_epoch_ms: u64,
    pub run_length_ms: u64,
    pub mode: Mode,
}

impl BackgroundSnapshot {
    /// Externalize the triple as three independent entries.
    pub fn write_to(&self, kv: &mut KvStore) -> Result<(), StoreError> {
        kv.kv_set(KEY_STARTED_AT, &self.started_at_epoch_ms.to_string())?;
        kv.kv_set(KEY_RUN_LENGTH, &self.run_length_ms.to_string())?;
        kv.kv_set(KEY_MODE, self.mode.as_str())?;
        Ok(())
    }

    /// Remove any persisted triple.
    pub fn clear(kv: &mut KvStore) -> Result<(), StoreError> {
        kv.kv_delete(KEY_STARTED_AT)?;
        kv.kv_delete(KEY_RUN_LENGTH)?;
        kv.kv_delete(KEY_MODE)?;
        Ok(())
    }

    /// Read a persisted triple back.
    ///
    /// All three entries absent means no snapshot was persisted
    /// (`Ok(None)`). Anything in between - some entries missing, or an
    /// unparseable value - is data corruption: the error carries a mode
    /// hint when the mode entry survived, so callers can fall back to a
    /// stopped state in the persisted mode.
    pub fn read_from(kv: &KvStore) -> Result<Option<Self>, SnapshotError> {
        let started = kv.kv_get(KEY_STARTED_AT);
        let length = kv.kv_get(KEY_RUN_LENGTH);
        let mode_raw = kv.kv_get(KEY_MODE);

        if started.is_none() && length.is_none() && mode_raw.is_none() {
            return Ok(None);
        }

        let mode_hint = mode_raw.and_then(|raw| raw.parse::<Mode>().ok());

        let mode = match mode_raw {
            None => {
                return Err(SnapshotError::MissingField {
                    field: "mode",
                    mode_hint: None,
                })
            }
            Some(raw) => raw.parse::<Mode>().map_err(|message| {
                SnapshotError::InvalidField {
                    field: "mode",
                    message,
                    mode_hint: None,
                }
            })?,
        };

        let started_at_epoch_ms = parse_ms_field(started, "started_at_epoch_ms", mode_hint)?;
        let run_length_ms = parse_ms_field(length, "run_length_ms", mode_hint)?;

        Ok(Some(Self {
            started_at_epoch_ms,
            run_length_ms,
            mode,
        }))
    }
}

fn parse_ms_field(
    raw: Option<&str>,
    field: &'static str,
    mode_hint: Option<Mode>,
) -> Result<u64, SnapshotError> {
    match raw {
        None => Err(SnapshotError::MissingField { field, mode_hint }),
        Some(raw) => raw.parse::<u64>().map_err(|e| SnapshotError::InvalidField {
            field,
            message: e.to_string(),
            mode_hint,
        }),
    }
}
