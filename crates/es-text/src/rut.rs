//! RUT (Rol Único Tributario) formatting

use crate::formatter::group_thousands;

/// Format a RUT as `12.345.678-5`
///
/// Everything except digits and the `k`/`K` check character is dropped, the
/// last character becomes the check character, and the rest is grouped in
/// threes from the right. Input of one character or less is returned cleaned
/// but otherwise unchanged. Formatting an already formatted RUT is a no-op.
///
/// # Examples
/// ```
/// use es_text::format_rut;
/// assert_eq!(format_rut("123456785"), "12.345.678-5");
/// assert_eq!(format_rut("12.345.678-5"), "12.345.678-5");
/// assert_eq!(format_rut("7"), "7");
/// ```
pub fn format_rut(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'k' | 'K'))
        .collect();

    if cleaned.len() <= 1 {
        return cleaned;
    }

    // Cleaned input is ASCII, so byte split is safe
    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    format!("{}-{check}", group_thousands(body, '.'))
}
