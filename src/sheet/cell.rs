//! Cell values of the calendar grid.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Literal token of an unfilled session slot, as it appears in debug dumps.
pub const PLACEHOLDER_TOKEN: &str = "${court_session}$";

static COLOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?s)(.*)-\[([0-9A-Fa-f]{6,8})\]$").expect("valid color tag regex"));

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum CellValue {
    #[default]
    Empty,
    /// Insertable session slot, consumed by placement.
    Placeholder,
    /// Day-of-month label at the top of a week block.
    DayNumber(u32),
    /// Plain text: headers, blank-day markers.
    Text(String),
    /// A placed session; the color travels beside the text instead of
    /// inside it and is applied by the color pass.
    Entry { text: String, color: Option<String> },
}

impl CellValue {
    pub fn entry(text: impl Into<String>, color: Option<String>) -> Self {
        CellValue::Entry {
            text: text.into(),
            color,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CellValue::Placeholder)
    }

    /// Nothing visible in the cell.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(t) | CellValue::Entry { text: t, .. } => t.trim().is_empty(),
            CellValue::Placeholder | CellValue::DayNumber(_) => false,
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Placeholder => PLACEHOLDER_TOKEN.to_string(),
            CellValue::DayNumber(n) => n.to_string(),
            CellValue::Text(t) | CellValue::Entry { text: t, .. } => t.clone(),
        }
    }

    pub fn starts_with_digit(&self) -> bool {
        match self {
            CellValue::DayNumber(_) => true,
            CellValue::Text(t) | CellValue::Entry { text: t, .. } => {
                t.chars().next().is_some_and(|c| c.is_ascii_digit())
            }
            _ => false,
        }
    }

    /// Text with the color embedded as a `-[hex]` suffix.
    pub fn tagged_text(&self) -> String {
        match self {
            CellValue::Entry {
                text,
                color: Some(color),
            } => format!("{text}-[{color}]"),
            other => other.display_text(),
        }
    }

    /// Inverse of [`CellValue::tagged_text`]. Untagged text stays plain.
    pub fn from_tagged(s: &str) -> Self {
        if s == PLACEHOLDER_TOKEN {
            return CellValue::Placeholder;
        }
        if s.is_empty() {
            return CellValue::Empty;
        }
        match COLOR_TAG.captures(s) {
            Some(caps) => CellValue::Entry {
                text: caps[1].to_string(),
                color: Some(caps[2].to_string()),
            },
            None => CellValue::Text(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_format_matches_legacy_dumps() {
        let v = CellValue::entry("SU CT CIVIL JURY TRIALS (JSB-101)", Some("FFBDD7EE".into()));
        assert_eq!(v.tagged_text(), "SU CT CIVIL JURY TRIALS (JSB-101)-[FFBDD7EE]");
        assert_eq!(CellValue::from_tagged(&v.tagged_text()), v);
    }

    #[test]
    fn stripping_is_idempotent() {
        let stripped = CellValue::from_tagged("9:00 Motion Hearing (B)-[FF000000]");
        let text = stripped.display_text();
        assert_eq!(text, "9:00 Motion Hearing (B)");
        assert_eq!(CellValue::from_tagged(&text), CellValue::Text(text.clone()));
    }

    #[test]
    fn hyphenated_text_without_tag_is_plain() {
        let v = CellValue::from_tagged("PRE-TRIAL (JSB-101)");
        assert_eq!(v, CellValue::Text("PRE-TRIAL (JSB-101)".into()));
    }

    #[test]
    fn emptiness() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("  ".into()).is_empty());
        assert!(!CellValue::Placeholder.is_empty());
        assert!(!CellValue::DayNumber(3).is_empty());
    }

    #[test]
    fn digit_detection() {
        assert!(CellValue::DayNumber(12).starts_with_digit());
        assert!(CellValue::entry("9:00 Arraignments (B)", None).starts_with_digit());
        assert!(!CellValue::entry("HOLIDAY", None).starts_with_digit());
    }
}
