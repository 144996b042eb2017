use crate::models::week::WeekKey;
use chrono::NaiveDate;
use serde::Serialize;

/// One row of the `courtsession` source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSession {
    pub date: NaiveDate,
    pub start_time: String,
    pub description: String,
    pub court_room: String,
    pub officer_code: String,
}

/// A court session or special date, normalized for calendar placement.
///
/// An empty `start_time` marks an untimed (block) entry that takes part in
/// week lane alignment; anything else is a timed entry rendered after the
/// lanes of its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub start_time: String,
    pub description: String,
    /// Resolved ARGB hex, `None` when the officer has no configured color.
    pub color: Option<String>,
    pub officer_code: String,
    pub display_order: i32,
    pub week: WeekKey,
}

impl SessionRecord {
    pub fn is_timed(&self) -> bool {
        !self.start_time.is_empty()
    }
}
