//! Resolved, immutable run data shared by every pipeline stage. Built once
//! from the configuration and passed explicitly; there is no global state.

use crate::config::{Config, HeaderBlock};
use crate::core::abbreviate::Abbreviations;
use crate::core::normalizer::CompiledMapping;
use crate::errors::{AppError, AppResult};
use crate::sheet::{BorderSide, CellStyle, LineStyle};
use std::collections::HashMap;

pub struct ResolvedHeader {
    pub block: HeaderBlock,
    pub style: CellStyle,
}

pub struct RunContext<'a> {
    pub config: &'a Config,
    pub year: i32,
    pub run_id: String,
    pub mappings: Vec<CompiledMapping>,
    pub abbreviations: Abbreviations,
    /// Odyssey officer code → ARGB hex.
    pub judge_colors: HashMap<String, String>,
    pub default_color: String,
    pub headers: Vec<ResolvedHeader>,
    pub day_number_style: CellStyle,
    pub blank_day_style: CellStyle,
    pub session_style: CellStyle,
    pub heavy_border: BorderSide,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a Config, year: i32, run_id: impl Into<String>) -> AppResult<Self> {
        let colors = config.colors();

        let mappings = config
            .session_mappings
            .iter()
            .enumerate()
            .map(|(i, m)| CompiledMapping::compile(m, &format!("session_mappings[{i}]")))
            .collect::<AppResult<Vec<_>>>()?;

        let abbreviations = Abbreviations::compile(&config.abbreviations)?;

        let mut judge_colors = HashMap::new();
        for (i, j) in config.judges.iter().enumerate() {
            let hex = colors.hex(&j.color, &format!("judges[{i}].color"))?;
            judge_colors.insert(j.odyssey_code.clone(), hex);
        }

        let headers = config
            .layout
            .header
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Ok(ResolvedHeader {
                    block: b.clone(),
                    style: b.style.resolve(&colors, &format!("layout.header[{i}].style"))?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let styles = &config.layout.styles;
        let heavy_style = LineStyle::from_name(&config.layout.heavy_border).ok_or_else(|| {
            AppError::config(
                "layout.heavy_border",
                format!("unknown border style '{}'", config.layout.heavy_border),
            )
        })?;

        Ok(Self {
            config,
            year,
            run_id: run_id.into(),
            mappings,
            abbreviations,
            judge_colors,
            default_color: colors.hex(&config.default_color, "default_color")?,
            headers,
            day_number_style: styles.day_number.resolve(&colors, "layout.styles.day_number")?,
            blank_day_style: styles.blank_day.resolve(&colors, "layout.styles.blank_day")?,
            session_style: styles.session.resolve(&colors, "layout.styles.session")?,
            heavy_border: BorderSide {
                style: heavy_style,
                color: colors.hex(&config.layout.heavy_border_color, "layout.heavy_border_color")?,
            },
        })
    }

    pub fn blank_day_text(&self) -> &str {
        &self.config.layout.blank_day_text
    }

    pub fn block_font_size(&self) -> f64 {
        self.config.layout.block_font_size
    }

    pub fn column_width(&self) -> f64 {
        self.config.layout.cell_unit_per_inch * self.config.layout.column_width_inches
    }
}
