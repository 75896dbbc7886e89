//! Event schedule snapshots.
//!
//! The sitemap lists one URL per session. Sessions come from a
//! [`ScheduleSource`]; the stock source reads a JSON snapshot from disk:
//!
//! ```json
//! {
//!   "modified": "2015-05-20T10:00:00-07:00",
//!   "sessions": {
//!     "keynote": { "title": "Keynote", "startTimestamp": "2015-05-28T09:30:00-07:00", "tags": ["FLAG_KEYNOTE"] }
//!   }
//! }
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
};
use thiserror::Error;

/// Errors fetching schedule data.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid schedule data in `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// One conference session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_timestamp: Option<DateTime<FixedOffset>>,
    pub end_timestamp: Option<DateTime<FixedOffset>>,
    pub tags: Vec<String>,
}

/// Point-in-time view of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// When the schedule last changed.
    pub modified: DateTime<FixedOffset>,
    /// Sessions keyed by identifier, in ascending order.
    #[serde(default)]
    pub sessions: BTreeMap<String, Session>,
}

/// Provider of the latest schedule.
pub trait ScheduleSource {
    fn latest_event_data(&self) -> Result<ScheduleSnapshot, ScheduleError>;
}

/// Reads the snapshot from a JSON file on every call.
#[derive(Debug, Clone)]
pub struct FileScheduleSource {
    path: PathBuf,
}

impl FileScheduleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSource for FileScheduleSource {
    fn latest_event_data(&self) -> Result<ScheduleSnapshot, ScheduleError> {
        let content =
            fs::read_to_string(&self.path).map_err(|err| ScheduleError::Io(self.path.clone(), err))?;
        serde_json::from_str(&content).map_err(|err| ScheduleError::Parse(self.path.clone(), err))
    }
}
