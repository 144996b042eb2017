use crate::utils::date::sunday_week_of_year;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Sunday-start (`%U`) week bucket. The year is part of the key so that
/// week numbers from different years never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            week: sunday_week_of_year(date),
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}
