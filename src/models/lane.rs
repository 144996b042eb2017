use crate::models::week::WeekKey;
use serde::Serialize;

/// A distinct untimed description within one week and its global rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekLane {
    pub description: String,
    pub week: WeekKey,
    pub display_order: i32,
    /// Dense 1-based rank over all lanes of the run, ordered by
    /// `(week, display_order, description)`.
    pub rank: u32,
}

/// Immutable lane ordering for a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LaneTable {
    lanes: Vec<WeekLane>,
}

impl LaneTable {
    /// `lanes` must already be sorted by rank.
    pub(crate) fn from_sorted(lanes: Vec<WeekLane>) -> Self {
        Self { lanes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeekLane> {
        self.lanes.iter()
    }

    /// Lanes of one week in rank order.
    pub fn for_week(&self, week: WeekKey) -> impl Iterator<Item = &WeekLane> {
        self.lanes.iter().filter(move |l| l.week == week)
    }

    pub fn rank_of(&self, week: WeekKey, description: &str) -> Option<u32> {
        self.for_week(week)
            .find(|l| l.description == description)
            .map(|l| l.rank)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
