//! Peso amount and date formatting (es-CL)

use crate::{EsTextError, Result};
use chrono::{Datelike, NaiveDate};

/// Spanish month names (long, lower-case as written in es-CL dates)
pub const MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Thousands separator used in Chile
const THOUSANDS_SEPARATOR: char = '.';

/// Chilean Spanish formatting utilities
pub struct EsFormatter;

impl EsFormatter {
    /// Format an identifier as a RUT (`12.345.678-5`)
    pub fn format_rut(value: &str) -> String {
        crate::format_rut(value)
    }

    /// Group a peso amount (`500.000`), empty when no digits are present
    pub fn format_currency(value: &str) -> String {
        format_currency(value)
    }

    /// Format an ISO date (`2024-03-15`) as `15 de marzo de 2024`
    pub fn format_iso_date(value: &str) -> String {
        format_iso_date_long(value)
    }

    /// Format a calendar date as `15 de marzo de 2024`
    pub fn format_date(date: NaiveDate) -> String {
        format_naive_date_long(date)
    }
}

/// Group a peso amount with `.` every three digits
///
/// Every non-digit character is dropped first; leading zeros do not count.
/// Input without any digit formats to an empty string, never to zero.
///
/// # Examples
/// ```
/// use es_text::format_currency;
/// assert_eq!(format_currency("500000"), "500.000");
/// assert_eq!(format_currency("$1.250.000"), "1.250.000");
/// assert_eq!(format_currency(""), "");
/// ```
pub fn format_currency(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return "0".to_string();
    }

    group_thousands(significant, THOUSANDS_SEPARATOR)
}

/// Insert `sep` between runs of three characters, counting from the right
///
/// # Examples
/// ```
/// use es_text::group_thousands;
/// assert_eq!(group_thousands("12345678", '.'), "12.345.678");
/// assert_eq!(group_thousands("100", '.'), "100");
/// ```
pub fn group_thousands(digits: &str, sep: char) -> String {
    let count = digits.chars().count();
    let mut result = String::with_capacity(digits.len() + count / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            result.push(sep);
        }
        result.push(c);
    }

    result
}

/// Spanish name of a month (1-12), empty when out of range
pub fn month_name(month: u32) -> &'static str {
    let month_idx = month.wrapping_sub(1) as usize;
    MONTHS_LONG.get(month_idx).copied().unwrap_or("")
}

/// Format a date in long es-CL form (e.g., "15 de marzo de 2024")
///
/// # Arguments
/// * `year` - Gregorian year
/// * `month` - Month (1-12)
/// * `day` - Day of month
pub fn format_date_long(year: i32, month: u32, day: u32) -> String {
    format!("{day} de {} de {year}", month_name(month))
}

/// Format a calendar date in long es-CL form
pub fn format_naive_date_long(date: NaiveDate) -> String {
    format_date_long(date.year(), date.month(), date.day())
}

/// Format an ISO date string in long es-CL form
///
/// The calendar date is taken as typed, with no time-zone shift.
/// Empty or invalid input formats to an empty string.
///
/// # Examples
/// ```
/// use es_text::format_iso_date_long;
/// assert_eq!(format_iso_date_long("2024-03-15"), "15 de marzo de 2024");
/// assert_eq!(format_iso_date_long(""), "");
/// ```
pub fn format_iso_date_long(value: &str) -> String {
    parse_iso_date(value)
        .map(format_naive_date_long)
        .unwrap_or_default()
}

/// Parse `YYYY-MM-DD`, also accepting a trailing `T...` time part
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let date_part = match trimmed.split_once('T') {
        Some((date, _)) => date,
        None => trimmed,
    };

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| EsTextError::InvalidDate(value.to_string()))
}
