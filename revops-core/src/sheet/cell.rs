//! Typed parsing of raw cell text.
//!
//! Everything coming out of the sheet is text. These parsers turn it into a
//! small closed set of typed values at the grid boundary; nothing downstream
//! sees untyped cells. Numeric fields are zero-defaulted: a blank or
//! unparseable cell is 0, never an error.

use chrono::NaiveDate;

/// Date labels are day/month/year text, e.g. "15/01/2026".
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
}

/// Plain integer cell. Blank or unparseable → 0.
pub fn parse_int(text: &str) -> i64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    trimmed.parse().unwrap_or_else(|_| {
        log::debug!("Unparseable integer cell: {:?}", text);
        0
    })
}

/// Currency cell, e.g. "$1.234.567". The dot is a thousands mark, not a
/// decimal point; strip symbol and separators, then parse as integer.
pub fn parse_currency(text: &str) -> i64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | '.' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return 0;
    }

    cleaned.parse().unwrap_or_else(|_| {
        log::debug!("Unparseable currency cell: {:?}", text);
        0
    })
}

/// Decimal cell, e.g. "12,5" or "$1.234,56". Dots are thousands marks; the
/// comma is the decimal point. Rounded to 3 decimal places.
pub fn parse_decimal(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) => round3(value),
        Err(_) => {
            log::debug!("Unparseable decimal cell: {:?}", text);
            0.0
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
