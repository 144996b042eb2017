//! YAML configuration: paths, logging, colors, judges, special dates,
//! session-name mappings, abbreviations and the sheet layout.

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub mod style;
pub mod validate;

pub use style::StyleSpec;

/// Commented template written by `init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.yaml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    #[serde(default)]
    pub logs_folder: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub colors: BTreeMap<String, String>,
    #[serde(default = "default_color_name")]
    pub default_color: String,
    #[serde(default)]
    pub judges: Vec<Judge>,
    #[serde(default)]
    pub special_dates: Vec<SpecialDate>,
    #[serde(default)]
    pub session_mappings: Vec<SessionMapping>,
    /// Applied in file order.
    #[serde(default, with = "ordered_pairs")]
    pub abbreviations: Vec<(String, String)>,
    pub layout: Layout,
}

fn default_output_folder() -> String {
    ".".to_string()
}
fn default_color_name() -> String {
    "White".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_console_level")]
    pub console_level: String,
    #[serde(default = "default_file_level")]
    pub file_level: String,
}

fn default_console_level() -> String {
    "info".to_string()
}
fn default_file_level() -> String {
    "debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: default_console_level(),
            file_level: default_file_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judge {
    pub name: String,
    pub odyssey_code: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDate {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub begin_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub color: String,
    #[serde(default)]
    pub display_order: i32,
}

impl SpecialDate {
    /// Inclusive date span: a single `date`, or `begin_date..=end_date`.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.date, self.begin_date, self.end_date) {
            (Some(d), _, _) => Some((d, d)),
            (None, Some(b), Some(e)) if b <= e => Some((b, e)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMapping {
    pub odyssey_name: String,
    pub calendar_name: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeMode {
    ByRow,
    ByColumn,
    ByBoth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: String,
    pub top_left_cell: String,
    pub bottom_right_cell: String,
    pub merge_cells: MergeMode,
    /// `{month}` and `{year}` are substituted per sheet.
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default)]
    pub style: StyleSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutStyles {
    pub day_number: StyleSpec,
    pub blank_day: StyleSpec,
    pub session: StyleSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub header: Vec<HeaderBlock>,
    pub styles: LayoutStyles,
    /// Written into day-number cells of weekdays outside the month.
    #[serde(default)]
    pub blank_day_text: String,
    #[serde(default = "default_block_font_size")]
    pub block_font_size: f64,
    #[serde(default = "default_cell_unit_per_inch")]
    pub cell_unit_per_inch: f64,
    #[serde(default = "default_column_width_inches")]
    pub column_width_inches: f64,
    #[serde(default)]
    pub session_row_height: Option<f64>,
    #[serde(default = "default_heavy_border")]
    pub heavy_border: String,
    #[serde(default = "default_heavy_border_color")]
    pub heavy_border_color: String,
}

fn default_block_font_size() -> f64 {
    9.0
}
fn default_cell_unit_per_inch() -> f64 {
    13.0
}
fn default_column_width_inches() -> f64 {
    2.0
}
fn default_heavy_border() -> String {
    "medium".to_string()
}
fn default_heavy_border_color() -> String {
    "Black".to_string()
}

/// Color name → ARGB hex lookup.
pub struct ColorTable<'a> {
    colors: &'a BTreeMap<String, String>,
}

impl<'a> ColorTable<'a> {
    pub fn new(colors: &'a BTreeMap<String, String>) -> Self {
        Self { colors }
    }

    /// Hex value of `name`; a missing name is a configuration error at `key`.
    pub fn hex(&self, name: &str, key: &str) -> AppResult<String> {
        self.colors
            .get(name)
            .map(|h| h.trim().trim_start_matches('#').to_ascii_uppercase())
            .ok_or_else(|| AppError::config(key, format!("unknown color '{name}'")))
    }
}

impl Config {
    /// Platform configuration directory of the application.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("court-calendar")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("court_calendar.yaml")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("court_sessions.sqlite")
    }

    /// Parse a configuration document without semantic checks.
    pub fn parse_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            let key = e
                .location()
                .map(|l| format!("line {}", l.line()))
                .unwrap_or_else(|| "<document>".to_string());
            AppError::config(key, e.to_string())
        })
    }

    /// Parse and validate a configuration document.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let cfg = Self::parse_yaml(content)?;
        validate::validate(&cfg)?;
        Ok(cfg)
    }

    /// Path given on the command line, or the default location.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf).unwrap_or_else(Self::config_file)
    }

    /// Load the configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = Self::resolve_path(path);
        if !path.exists() {
            return Err(AppError::config(
                path.display().to_string(),
                "configuration file not found (run `court-calendar init`)",
            ));
        }
        let content = fs::read_to_string(&path)?;
        Self::from_yaml_str(&content)
    }

    pub fn colors(&self) -> ColorTable<'_> {
        ColorTable::new(&self.colors)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn output_dir(&self) -> PathBuf {
        expand_tilde(&self.output_folder)
    }

    pub fn logs_dir(&self) -> Option<PathBuf> {
        self.logs_folder.as_deref().map(expand_tilde)
    }

    /// Create output and log folders if missing.
    pub fn ensure_folders(&self) -> AppResult<()> {
        fs::create_dir_all(self.output_dir())?;
        if let Some(logs) = self.logs_dir() {
            fs::create_dir_all(logs)?;
        }
        Ok(())
    }

    /// Render the default template for the given locations.
    pub fn default_template(database: &Path, output: &Path, logs: &Path) -> String {
        DEFAULT_CONFIG_TEMPLATE
            .replace("__DATABASE__", &yaml_path(database))
            .replace("__OUTPUT__", &yaml_path(output))
            .replace("__LOGS__", &yaml_path(logs))
    }

    /// Write the default configuration to `config_path` unless it exists.
    /// Returns `true` when a new file was written.
    pub fn init_file(config_path: &Path, database: &Path) -> AppResult<bool> {
        if config_path.exists() {
            return Ok(false);
        }
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;

        let content = Self::default_template(database, &dir.join("output"), &dir.join("logs"));
        fs::write(config_path, content)?;
        Ok(true)
    }
}

fn yaml_path(p: &Path) -> String {
    // single-quoted YAML: backslashes are literal, quotes are doubled
    p.to_string_lossy().replace('\'', "''")
}

/// Serialize `Vec<(String, String)>` as a YAML mapping, keeping file order.
mod ordered_pairs {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(pairs: &[(String, String)], s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(pairs.len()))?;
        for (k, v) in pairs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<(String, String)>, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of phrase to abbreviation")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    out.push((k, v));
                }
                Ok(out)
            }
        }

        d.deserialize_map(PairsVisitor)
    }
}
