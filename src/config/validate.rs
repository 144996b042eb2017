//! Configuration checks run before any sheet is touched. Each issue names
//! the offending key path.

use crate::config::{Config, MergeMode};
use crate::errors::{AppError, AppResult};
use crate::sheet::{LineStyle, WEEKDAY_COLUMNS};
use crate::utils::cell_ref::parse_a1;
use crate::utils::colors::is_hex_color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub key: String,
    pub reason: String,
}

impl ConfigIssue {
    fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Fails with the first issue found.
pub fn validate(cfg: &Config) -> AppResult<()> {
    match issues(cfg).into_iter().next() {
        Some(i) => Err(AppError::Config {
            key: i.key,
            reason: i.reason,
        }),
        None => Ok(()),
    }
}

pub fn issues(cfg: &Config) -> Vec<ConfigIssue> {
    let mut out = Vec::new();
    let color_known = |name: &str| cfg.colors.contains_key(name);

    for (name, hex) in &cfg.colors {
        if !is_hex_color(hex) {
            out.push(ConfigIssue::new(
                format!("colors.{name}"),
                format!("'{hex}' is not an RGB/ARGB hex value"),
            ));
        }
    }

    if !color_known(&cfg.default_color) {
        out.push(ConfigIssue::new(
            "default_color",
            format!("unknown color '{}'", cfg.default_color),
        ));
    }

    for (i, j) in cfg.judges.iter().enumerate() {
        if j.odyssey_code.trim().is_empty() {
            out.push(ConfigIssue::new(format!("judges[{i}].odyssey_code"), "must not be empty"));
        }
        if !color_known(&j.color) {
            out.push(ConfigIssue::new(
                format!("judges[{i}].color"),
                format!("unknown color '{}'", j.color),
            ));
        }
    }

    for (i, sd) in cfg.special_dates.iter().enumerate() {
        if sd.span().is_none() {
            out.push(ConfigIssue::new(
                format!("special_dates[{i}]"),
                "needs `date`, or `begin_date` and `end_date` with begin <= end",
            ));
        }
        if !color_known(&sd.color) {
            out.push(ConfigIssue::new(
                format!("special_dates[{i}].color"),
                format!("unknown color '{}'", sd.color),
            ));
        }
    }

    for (i, m) in cfg.session_mappings.iter().enumerate() {
        if m.odyssey_name.replace(['-', ' '], "").is_empty() {
            out.push(ConfigIssue::new(
                format!("session_mappings[{i}].odyssey_name"),
                "pattern is empty and would match every session",
            ));
        }
    }

    for (phrase, _) in &cfg.abbreviations {
        if phrase.is_empty() {
            out.push(ConfigIssue::new("abbreviations", "empty phrase"));
        }
    }

    let layout = &cfg.layout;
    if LineStyle::from_name(&layout.heavy_border).is_none() {
        out.push(ConfigIssue::new(
            "layout.heavy_border",
            format!("unknown border style '{}'", layout.heavy_border),
        ));
    }
    if !color_known(&layout.heavy_border_color) {
        out.push(ConfigIssue::new(
            "layout.heavy_border_color",
            format!("unknown color '{}'", layout.heavy_border_color),
        ));
    }

    for (i, block) in layout.header.iter().enumerate() {
        let key = format!("layout.header[{i}]");
        let tl = parse_a1(&block.top_left_cell);
        let br = parse_a1(&block.bottom_right_cell);
        match (tl, br) {
            (Ok((r1, c1)), Ok((r2, c2))) => {
                if r2 < r1 || c2 < c1 {
                    out.push(ConfigIssue::new(
                        format!("{key}.bottom_right_cell"),
                        "must be below and right of top_left_cell",
                    ));
                } else if c2 >= WEEKDAY_COLUMNS {
                    out.push(ConfigIssue::new(
                        format!("{key}.bottom_right_cell"),
                        format!("calendar sheets have {WEEKDAY_COLUMNS} columns"),
                    ));
                } else {
                    let needed = match block.merge_cells {
                        MergeMode::ByRow => c2 - c1 + 1,
                        MergeMode::ByColumn | MergeMode::ByBoth => 1,
                    };
                    if block.text.len() < needed {
                        out.push(ConfigIssue::new(
                            format!("{key}.text"),
                            format!("expected {needed} text value(s), found {}", block.text.len()),
                        ));
                    }
                }
            }
            (Err(e), _) => out.push(ConfigIssue::new(format!("{key}.top_left_cell"), e.to_string())),
            (_, Err(e)) => out.push(ConfigIssue::new(format!("{key}.bottom_right_cell"), e.to_string())),
        }
        check_style(&mut out, cfg, &block.style, &format!("{key}.style"));
    }

    check_style(&mut out, cfg, &layout.styles.day_number, "layout.styles.day_number");
    check_style(&mut out, cfg, &layout.styles.blank_day, "layout.styles.blank_day");
    check_style(&mut out, cfg, &layout.styles.session, "layout.styles.session");

    out
}

fn check_style(out: &mut Vec<ConfigIssue>, cfg: &Config, style: &crate::config::StyleSpec, key: &str) {
    if let Err(AppError::Config { key, reason }) = style.resolve(&cfg.colors(), key) {
        out.push(ConfigIssue { key, reason });
    }
}
