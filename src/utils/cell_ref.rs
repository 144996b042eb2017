//! A1-style cell references used by the header layout configuration.

use crate::errors::{AppError, AppResult};

/// Parse `"B3"` into zero-based `(row, col)` = `(2, 1)`.
pub fn parse_a1(reference: &str) -> AppResult<(usize, usize)> {
    let r = reference.trim();
    let split = r
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| AppError::InvalidCellRef(reference.to_string()))?;
    let (letters, digits) = r.split_at(split);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidCellRef(reference.to_string()));
    }

    let mut col = 0usize;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits
        .parse()
        .map_err(|_| AppError::InvalidCellRef(reference.to_string()))?;
    if row == 0 {
        return Err(AppError::InvalidCellRef(reference.to_string()));
    }

    Ok((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_references() {
        assert_eq!(parse_a1("A1").unwrap(), (0, 0));
        assert_eq!(parse_a1("e2").unwrap(), (1, 4));
        assert_eq!(parse_a1("AB10").unwrap(), (9, 27));
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_a1("1A").is_err());
        assert!(parse_a1("A0").is_err());
        assert!(parse_a1("A").is_err());
    }
}
