//! Week lane assigner: one stable vertical ordering of untimed descriptions
//! per week, computed once from the complete record set.

use crate::models::{LaneTable, SessionRecord, WeekKey, WeekLane};
use std::collections::HashMap;

/// Distinct `(description, week)` pairs of untimed records, sorted by
/// `(week, display_order, description)` and ranked with one global 1-based
/// counter (ranks do not restart per week).
///
/// A description seen with several display orders in one week keeps the
/// lowest. Full ties keep first-seen order (stable sort).
pub fn assign_lanes(records: &[SessionRecord]) -> LaneTable {
    let mut lanes: Vec<WeekLane> = Vec::new();
    let mut index: HashMap<(WeekKey, &str), usize> = HashMap::new();

    for r in records.iter().filter(|r| !r.is_timed()) {
        match index.get(&(r.week, r.description.as_str())) {
            Some(&i) => {
                let lane = &mut lanes[i];
                lane.display_order = lane.display_order.min(r.display_order);
            }
            None => {
                index.insert((r.week, r.description.as_str()), lanes.len());
                lanes.push(WeekLane {
                    description: r.description.clone(),
                    week: r.week,
                    display_order: r.display_order,
                    rank: 0,
                });
            }
        }
    }

    lanes.sort_by(|a, b| {
        (a.week, a.display_order, &a.description).cmp(&(b.week, b.display_order, &b.description))
    });
    for (i, lane) in lanes.iter_mut().enumerate() {
        lane.rank = i as u32 + 1;
    }

    LaneTable::from_sorted(lanes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(y: i32, m: u32, d: u32, desc: &str, order: i32, time: &str) -> SessionRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
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

    #[test]
    fn ranks_are_global_and_ordered() {
        let records = vec![
            rec(2025, 1, 8, "B TRIALS", 1, ""),
            rec(2025, 1, 6, "A TRIALS", 1, ""),
            rec(2025, 1, 7, "ZZ HOLIDAY", 0, ""),
            rec(2025, 1, 13, "A TRIALS", 1, ""),
            rec(2025, 1, 6, "9:00 Motion (B)", 3, "09:00"),
        ];
        let table = assign_lanes(&records);
        let got: Vec<(String, u32, u32)> = table
            .iter()
            .map(|l| (l.description.clone(), l.week.week, l.rank))
            .collect();
        assert_eq!(
            got,
            vec![
                ("ZZ HOLIDAY".to_string(), 1, 1),
                ("A TRIALS".to_string(), 1, 2),
                ("B TRIALS".to_string(), 1, 3),
                ("A TRIALS".to_string(), 2, 4),
            ]
        );
    }

    #[test]
    fn timed_records_never_get_lanes() {
        let table = assign_lanes(&[rec(2025, 1, 6, "9:00 Motion (B)", 3, "09:00")]);
        assert!(table.is_empty());
    }

    #[test]
    fn special_date_with_order_zero_leads_its_week() {
        let records = vec![
            rec(2025, 1, 2, "ARRAIGNMENTS", 1, ""),
            rec(2025, 1, 1, "NEW YEAR'S DAY", 0, ""),
        ];
        let table = assign_lanes(&records);
        let week = WeekKey::of(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let first = table.for_week(week).next().unwrap();
        assert_eq!(first.description, "NEW YEAR'S DAY");
        assert!(table.rank_of(week, "NEW YEAR'S DAY") < table.rank_of(week, "ARRAIGNMENTS"));
    }

    #[test]
    fn duplicate_description_keeps_lowest_order() {
        let records = vec![
            rec(2025, 1, 6, "X", 4, ""),
            rec(2025, 1, 7, "X", 2, ""),
            rec(2025, 1, 7, "Y", 3, ""),
        ];
        let table = assign_lanes(&records);
        let order: Vec<&str> = table.iter().map(|l| l.description.as_str()).collect();
        assert_eq!(order, vec!["X", "Y"]);
        assert_eq!(table.len(), 2);
    }
}
