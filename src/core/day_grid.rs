//! Day grid builder: per weekday, the lane-aligned untimed entries followed
//! by that day's timed entries.

use crate::models::{LaneTable, SessionRecord, WeekKey};
use crate::utils::date::{date_range, is_weekday};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rank given to timed entries so they sort after every lane.
pub const TIMED_RANK: u32 = u32::MAX;

/// Display order carried by blank lane slots.
pub const BLANK_DISPLAY_ORDER: i32 = 999;

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub date: NaiveDate,
    /// `None` for a lane that has no entry on this date.
    pub record: Option<SessionRecord>,
    pub rank: u32,
}

impl Slot {
    pub fn is_blank(&self) -> bool {
        self.record.is_none()
    }

    fn sort_key(&self) -> (u32, i32, &str, &str) {
        match &self.record {
            Some(r) => (self.rank, r.display_order, r.start_time.as_str(), r.description.as_str()),
            None => (self.rank, BLANK_DISPLAY_ORDER, "", ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

impl DayPlan {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One plan per weekday in `[min date, max date]` of `records`.
pub fn build_day_plans(records: &[SessionRecord], lanes: &LaneTable) -> BTreeMap<NaiveDate, DayPlan> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&SessionRecord>> = BTreeMap::new();
    for r in records {
        by_date.entry(r.date).or_default().push(r);
    }

    let (Some(first), Some(last)) = (by_date.keys().next().copied(), by_date.keys().next_back().copied()) else {
        return BTreeMap::new();
    };

    let mut plans = BTreeMap::new();
    for date in date_range(first, last).filter(|d| is_weekday(*d)) {
        let day_records = by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        plans.insert(date, plan_day(date, day_records, lanes));
    }
    plans
}

fn plan_day(date: NaiveDate, records: &[&SessionRecord], lanes: &LaneTable) -> DayPlan {
    let mut slots: Vec<Slot> = lanes
        .for_week(WeekKey::of(date))
        .map(|lane| Slot {
            date,
            record: records
                .iter()
                .find(|r| !r.is_timed() && r.description == lane.description)
                .map(|r| (*r).clone()),
            rank: lane.rank,
        })
        .collect();

    slots.extend(records.iter().filter(|r| r.is_timed()).map(|r| Slot {
        date,
        record: Some((*r).clone()),
        rank: TIMED_RANK,
    }));

    slots.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    DayPlan { date, slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lanes::assign_lanes;

    fn rec(d: u32, desc: &str, order: i32, time: &str) -> SessionRecord {
        let date = NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        SessionRecord {
            date,
            start_time: time.into(),
            description: desc.into(),
            color: None,
            officer_code: String::new(),
            display_order: order,
            week: WeekKey::of(date),
        }
    }

    fn texts(plan: &DayPlan) -> Vec<String> {
        plan.slots
            .iter()
            .map(|s| s.record.as_ref().map(|r| r.description.clone()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn blank_slots_hold_lane_positions() {
        let records = vec![
            rec(6, "A TRIALS", 1, ""),
            rec(6, "B TRIALS", 2, ""),
            rec(7, "B TRIALS", 2, ""),
        ];
        let lanes = assign_lanes(&records);
        let plans = build_day_plans(&records, &lanes);

        assert_eq!(texts(&plans[&NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()]), vec!["A TRIALS", "B TRIALS"]);
        let tuesday = &plans[&NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()];
        assert_eq!(texts(tuesday), vec!["", "B TRIALS"]);
        assert!(tuesday.slots[0].is_blank());
        assert_eq!(tuesday.slots[1].rank, lanes.rank_of(WeekKey::of(tuesday.date), "B TRIALS").unwrap());
    }

    #[test]
    fn timed_entries_follow_lanes_in_their_own_order() {
        let records = vec![
            rec(6, "2:00 Review (B)", 3, "14:00"),
            rec(6, "9:00 Motion (B)", 3, "09:00"),
            rec(6, "A TRIALS", 1, ""),
        ];
        let lanes = assign_lanes(&records);
        let plans = build_day_plans(&records, &lanes);
        let monday = &plans[&NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()];
        assert_eq!(texts(monday), vec!["A TRIALS", "9:00 Motion (B)", "2:00 Review (B)"]);
        assert_eq!(monday.slots[2].rank, TIMED_RANK);
    }

    #[test]
    fn weekends_are_skipped_and_gaps_filled() {
        let records = vec![rec(3, "X", 1, ""), rec(6, "Y", 1, "")];
        let lanes = assign_lanes(&records);
        let plans = build_day_plans(&records, &lanes);
        let dates: Vec<u32> = plans.keys().map(|d| chrono::Datelike::day(d)).collect();
        assert_eq!(dates, vec![3, 6]);
    }

    #[test]
    fn every_weekday_of_a_week_gets_every_lane() {
        let records = vec![
            rec(13, "A", 1, ""),
            rec(15, "B", 1, ""),
            rec(17, "C", 0, ""),
        ];
        let lanes = assign_lanes(&records);
        let plans = build_day_plans(&records, &lanes);
        for plan in plans.values() {
            let ranks: Vec<u32> = plan.slots.iter().map(|s| s.rank).collect();
            assert_eq!(ranks, vec![1, 2, 3], "{}", plan.date);
        }
    }
}
