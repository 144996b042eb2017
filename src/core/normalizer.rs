//! Session normalizer: raw session rows and special dates become
//! [`SessionRecord`]s with their final calendar text, color and order.

use crate::config::{ColorTable, SessionMapping, SpecialDate};
use crate::core::abbreviate::Abbreviations;
use crate::errors::{AppError, AppResult};
use crate::models::{RawSession, SessionRecord, WeekKey};
use crate::utils::date::date_range;
use crate::utils::time::format_calendar_time;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Display order of sessions no mapping row claims.
pub const UNMAPPED_DISPLAY_ORDER: i32 = 3;

pub const OFFICER_TOKEN: &str = "${JudicialOfficer}$";
pub const COURT_ROOM_TOKEN: &str = "$CourtRoom}$";

static OFFICE_CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z]{3}\) ").expect("valid office code regex"));

/// A session-name mapping row with its matcher compiled.
#[derive(Debug, Clone)]
pub struct CompiledMapping {
    pub odyssey_name: String,
    pub calendar_name: String,
    pub display_order: i32,
    pattern: Regex,
}

impl CompiledMapping {
    /// Hyphens are dropped from the pattern and every run of spaces matches
    /// any run of characters, so `"SU CR JURY TRIALS"` finds
    /// `"su cr - jury trials"` and `"SUCRJURYTRIALS"` alike.
    pub fn compile(mapping: &SessionMapping, key: &str) -> AppResult<Self> {
        let cleaned = mapping.odyssey_name.replace('-', "");
        let tokens: Vec<String> = cleaned
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        let pattern = Regex::new(&format!("(?i){}", tokens.join(".*")))
            .map_err(|e| AppError::config(format!("{key}.odyssey_name"), e.to_string()))?;

        Ok(Self {
            odyssey_name: mapping.odyssey_name.clone(),
            calendar_name: mapping.calendar_name.clone(),
            display_order: mapping.display_order,
            pattern,
        })
    }

    pub fn matches(&self, raw_description: &str) -> bool {
        self.pattern.is_match(raw_description)
    }

    pub fn render(&self, officer_code: &str, court_room: &str) -> String {
        self.calendar_name
            .replace(COURT_ROOM_TOKEN, court_room)
            .replace(OFFICER_TOKEN, officer_code)
    }
}

/// First mapping in table order whose pattern matches.
pub fn find_mapping<'m>(mappings: &'m [CompiledMapping], raw_description: &str) -> Option<&'m CompiledMapping> {
    mappings.iter().find(|m| m.matches(raw_description))
}

/// `"<h:mm> <description without (ABC) code> (<last officer char>)"`
pub fn timed_description(raw: &RawSession) -> AppResult<String> {
    let time = format_calendar_time(&raw.start_time)?;
    let description = OFFICE_CODE_PREFIX.replacen(&raw.description, 1, "");
    let officer_tail: String = raw.officer_code.chars().last().map(String::from).unwrap_or_default();
    Ok(format!("{time} {description} ({officer_tail})"))
}

pub fn normalize_session(
    raw: &RawSession,
    mappings: &[CompiledMapping],
    judge_colors: &HashMap<String, String>,
) -> AppResult<SessionRecord> {
    let color = judge_colors.get(&raw.officer_code).cloned();

    let (start_time, description, display_order) = match find_mapping(mappings, &raw.description) {
        Some(m) => (String::new(), m.render(&raw.officer_code, &raw.court_room), m.display_order),
        None => (
            raw.start_time.clone(),
            timed_description(raw)?,
            UNMAPPED_DISPLAY_ORDER,
        ),
    };

    Ok(SessionRecord {
        date: raw.date,
        start_time,
        description,
        color,
        officer_code: raw.officer_code.clone(),
        display_order,
        week: WeekKey::of(raw.date),
    })
}

/// One untimed record per day of the special date's span.
pub fn normalize_special_date(
    special: &SpecialDate,
    colors: &ColorTable<'_>,
    key: &str,
) -> AppResult<Vec<SessionRecord>> {
    let (begin, end) = special.span().ok_or_else(|| {
        AppError::config(key, "needs `date`, or `begin_date` and `end_date`")
    })?;
    let color = colors.hex(&special.color, &format!("{key}.color"))?;

    Ok(date_range(begin, end)
        .map(|date| SessionRecord {
            date,
            start_time: String::new(),
            description: special.name.clone(),
            color: Some(color.clone()),
            officer_code: String::new(),
            display_order: special.display_order,
            week: WeekKey::of(date),
        })
        .collect())
}

/// Abbreviate untimed descriptions in place.
pub fn apply_abbreviations(records: &mut [SessionRecord], abbreviations: &Abbreviations) {
    if abbreviations.is_empty() {
        return;
    }
    for r in records.iter_mut().filter(|r| !r.is_timed()) {
        r.description = abbreviations.apply(&r.description);
    }
}

/// Normalize every raw session and special date, then abbreviate.
pub fn normalize_all(
    raw: &[RawSession],
    special_dates: &[SpecialDate],
    mappings: &[CompiledMapping],
    judge_colors: &HashMap<String, String>,
    colors: &ColorTable<'_>,
    abbreviations: &Abbreviations,
) -> AppResult<Vec<SessionRecord>> {
    let mut records = Vec::with_capacity(raw.len() + special_dates.len());

    let mut unmatched_officers = 0usize;
    for r in raw {
        let rec = normalize_session(r, mappings, judge_colors)?;
        if rec.color.is_none() {
            unmatched_officers += 1;
        }
        records.push(rec);
    }
    if unmatched_officers > 0 {
        warn!(
            count = unmatched_officers,
            "sessions without a configured officer color, default color will be used"
        );
    }

    for (i, sd) in special_dates.iter().enumerate() {
        records.extend(normalize_special_date(sd, colors, &format!("special_dates[{i}]"))?);
    }

    apply_abbreviations(&mut records, abbreviations);

    debug!(records = records.len(), "normalized session records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn mapping(pattern: &str, template: &str, order: i32) -> CompiledMapping {
        CompiledMapping::compile(
            &SessionMapping {
                odyssey_name: pattern.into(),
                calendar_name: template.into(),
                display_order: order,
            },
            "session_mappings[0]",
        )
        .unwrap()
    }

    fn raw(desc: &str, time: &str, officer: &str, room: &str) -> RawSession {
        RawSession {
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            start_time: time.into(),
            description: desc.into(),
            court_room: room.into(),
            officer_code: officer.into(),
        }
    }

    #[test]
    fn mapped_session_becomes_untimed_block() {
        let maps = vec![mapping(
            "SU CR JURY TRIALS",
            "SUPERIOR COURT CRIMINAL JURY TRIAL (${JudicialOfficer}$-$CourtRoom}$)",
            0,
        )];
        let rec = normalize_session(
            &raw("SU CR JURY TRIALS", "09:00", "JSB", "101"),
            &maps,
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(rec.description, "SUPERIOR COURT CRIMINAL JURY TRIAL (JSB-101)");
        assert_eq!(rec.start_time, "");
        assert_eq!(rec.display_order, 0);
        assert!(!rec.is_timed());
    }

    #[test]
    fn unmapped_session_keeps_its_time() {
        let mut colors = HashMap::new();
        colors.insert("JSB".to_string(), "FFBDD7EE".to_string());
        let r = raw("(ABC) Motion Hearing", "09:00", "JSB", "101");
        let rec = normalize_session(&r, &[], &colors).unwrap();
        assert_eq!(rec.description, "9:00 Motion Hearing (B)");
        assert_eq!(rec.start_time, "09:00");
        assert_eq!(rec.display_order, UNMAPPED_DISPLAY_ORDER);
        assert_eq!(rec.color.as_deref(), Some("FFBDD7EE"));

        // pure: same input, same output
        assert_eq!(normalize_session(&r, &[], &colors).unwrap(), rec);
    }

    #[test]
    fn unknown_officer_has_no_color() {
        let rec = normalize_session(&raw("Arraignments", "13:30", "XYZ", "2"), &[], &HashMap::new()).unwrap();
        assert_eq!(rec.color, None);
        assert_eq!(rec.description, "1:30 Arraignments (Z)");
    }

    #[test]
    fn pattern_spaces_are_wildcards_and_hyphens_vanish() {
        let m = mapping("DI CR PRE-TRIAL CONFERENCE", "X", 2);
        assert!(m.matches("(DIS) di cr pretrial conference"));
        assert!(m.matches("DI CR - PRETRIAL CONFERENCE"));
        assert!(!m.matches("DI CV PRETRIAL CONFERENCE"));

        let compact = mapping("SU CR JURY TRIALS", "X", 0);
        assert!(compact.matches("SUCRJURYTRIALS"));
    }

    #[test]
    fn first_mapping_in_table_order_wins() {
        let maps = vec![
            mapping("JURY TRIALS", "GENERIC JURY ($CourtRoom}$)", 5),
            mapping("SU CR JURY TRIALS", "CRIMINAL JURY ($CourtRoom}$)", 0),
        ];
        let rec = normalize_session(&raw("SU CR JURY TRIALS", "09:00", "JSB", "7"), &maps, &HashMap::new()).unwrap();
        assert_eq!(rec.description, "GENERIC JURY (7)");
        assert_eq!(rec.display_order, 5);
    }

    #[test]
    fn only_the_first_office_code_is_stripped() {
        let r = raw("(ABC) Review (DEF) Hearing", "10:00", "MKL", "1");
        assert_eq!(timed_description(&r).unwrap(), "10:00 Review (DEF) Hearing (L)");
    }

    #[test]
    fn special_date_range_expands_per_day() {
        let mut table = BTreeMap::new();
        table.insert("Lavender".to_string(), "FFE4DFEC".to_string());
        let sd = SpecialDate {
            name: "JUDICIAL CONFERENCE".into(),
            date: None,
            begin_date: NaiveDate::from_ymd_opt(2025, 6, 16),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 18),
            color: "Lavender".into(),
            display_order: 1,
        };
        let recs = normalize_special_date(&sd, &ColorTable::new(&table), "special_dates[0]").unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.start_time.is_empty() && r.officer_code.is_empty()));
        assert_eq!(recs[0].color.as_deref(), Some("FFE4DFEC"));
    }

    #[test]
    fn abbreviations_skip_timed_entries() {
        let abbr = Abbreviations::compile(&[("COURT".to_string(), "CT".to_string())]).unwrap();
        let maps = vec![mapping("SU CR JURY TRIALS", "SUPERIOR COURT ($CourtRoom}$)", 0)];
        let mut recs = vec![
            normalize_session(&raw("SU CR JURY TRIALS", "09:00", "JSB", "1"), &maps, &HashMap::new()).unwrap(),
            normalize_session(&raw("Traffic Court", "09:00", "JSB", "1"), &maps, &HashMap::new()).unwrap(),
        ];
        apply_abbreviations(&mut recs, &abbr);
        assert_eq!(recs[0].description, "SUPERIOR CT (1)");
        assert_eq!(recs[1].description, "9:00 Traffic Court (B)");
    }
}
