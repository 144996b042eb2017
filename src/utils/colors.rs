//! Spreadsheet color helpers. Configuration stores colors as ARGB hex
//! strings (`"FFBDD7EE"`); the workbook writer wants a 24-bit RGB value.

/// Accepts `RRGGBB` or `AARRGGBB` (with or without a leading `#`).
pub fn parse_hex_rgb(hex: &str) -> Option<u32> {
    let h = hex.trim().trim_start_matches('#');
    if !h.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = match h.len() {
        6 => h,
        8 => &h[2..],
        _ => return None,
    };
    u32::from_str_radix(rgb, 16).ok()
}

pub fn is_hex_color(hex: &str) -> bool {
    parse_hex_rgb(hex).is_some()
}
