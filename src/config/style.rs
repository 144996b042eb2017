//! Declarative style settings as they appear in the YAML layout section.
//! Colors are color *names*, resolved against the `colors` table.

use crate::config::ColorTable;
use crate::errors::{AppError, AppResult};
use crate::sheet::{Alignment, BorderSide, Borders, CellStyle, Font, HAlign, LineStyle, VAlign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSpec {
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default)]
    pub fill: Option<FillSpec>,
    #[serde(default)]
    pub border: Option<BorderSpec>,
    #[serde(default)]
    pub alignment: Option<AlignmentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_font_name")]
    pub name: String,
    #[serde(default = "default_font_size")]
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default = "default_font_color")]
    pub color: String,
}

fn default_font_name() -> String {
    "Calibri".to_string()
}
fn default_font_size() -> f64 {
    11.0
}
fn default_font_color() -> String {
    "Black".to_string()
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: default_font_name(),
            size: default_font_size(),
            bold: false,
            italic: false,
            color: default_font_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSpec {
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorderSpec {
    pub left: Option<SideSpec>,
    pub right: Option<SideSpec>,
    pub top: Option<SideSpec>,
    pub bottom: Option<SideSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideSpec {
    pub style: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentSpec {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    #[serde(default)]
    pub wrap: bool,
}

impl StyleSpec {
    /// Resolve color names and style keywords. `key` is the configuration
    /// path of this style, used in error messages.
    pub fn resolve(&self, colors: &ColorTable, key: &str) -> AppResult<CellStyle> {
        let font = Font {
            name: self.font.name.clone(),
            size: self.font.size,
            bold: self.font.bold,
            italic: self.font.italic,
            color: colors.hex(&self.font.color, &format!("{key}.font.color"))?,
        };

        let fill = match &self.fill {
            Some(f) => Some(colors.hex(&f.color, &format!("{key}.fill.color"))?),
            None => None,
        };

        let border = match &self.border {
            Some(b) => Borders {
                left: resolve_side(b.left.as_ref(), colors, &format!("{key}.border.left"))?,
                right: resolve_side(b.right.as_ref(), colors, &format!("{key}.border.right"))?,
                top: resolve_side(b.top.as_ref(), colors, &format!("{key}.border.top"))?,
                bottom: resolve_side(b.bottom.as_ref(), colors, &format!("{key}.border.bottom"))?,
            },
            None => Borders::default(),
        };

        let alignment = match &self.alignment {
            Some(a) => Alignment {
                horizontal: match a.horizontal.as_deref() {
                    Some(h) => parse_halign(h)
                        .ok_or_else(|| AppError::config(format!("{key}.alignment.horizontal"), format!("unknown alignment '{h}'")))?,
                    None => HAlign::General,
                },
                vertical: match a.vertical.as_deref() {
                    Some(v) => parse_valign(v)
                        .ok_or_else(|| AppError::config(format!("{key}.alignment.vertical"), format!("unknown alignment '{v}'")))?,
                    None => VAlign::Bottom,
                },
                wrap: a.wrap,
            },
            None => Alignment::default(),
        };

        Ok(CellStyle {
            font,
            fill,
            border,
            alignment,
        })
    }
}

fn resolve_side(
    side: Option<&SideSpec>,
    colors: &ColorTable,
    key: &str,
) -> AppResult<Option<BorderSide>> {
    let Some(side) = side else {
        return Ok(None);
    };
    let style = LineStyle::from_name(&side.style).ok_or_else(|| {
        AppError::config(format!("{key}.style"), format!("unknown border style '{}'", side.style))
    })?;
    Ok(Some(BorderSide {
        style,
        color: colors.hex(&side.color, &format!("{key}.color"))?,
    }))
}

fn parse_halign(s: &str) -> Option<HAlign> {
    match s.to_ascii_lowercase().as_str() {
        "general" => Some(HAlign::General),
        "left" => Some(HAlign::Left),
        "center" | "centre" => Some(HAlign::Center),
        "right" => Some(HAlign::Right),
        _ => None,
    }
}

fn parse_valign(s: &str) -> Option<VAlign> {
    match s.to_ascii_lowercase().as_str() {
        "top" => Some(VAlign::Top),
        "center" | "centre" => Some(VAlign::Center),
        "bottom" => Some(VAlign::Bottom),
        _ => None,
    }
}
