//! ES Text - Chilean Spanish (es-CL) text formatting
//!
//! This crate provides:
//! - RUT identifier formatting (`12.345.678-5`)
//! - Peso amount grouping (`500.000`)
//! - Long dates (`15 de marzo de 2024`)
//!
//! # Example
//!
//! ```ignore
//! use es_text::{format_currency, format_rut, EsFormatter};
//!
//! let rut = format_rut("123456785");             // "12.345.678-5"
//! let amount = format_currency("500000");         // "500.000"
//! let date = EsFormatter::format_iso_date("2024-03-15"); // "15 de marzo de 2024"
//! ```

mod formatter;
mod rut;

pub use formatter::EsFormatter;
pub use rut::format_rut;

// Re-export commonly used formatting functions
pub use formatter::{
    format_currency, format_date_long, format_iso_date_long, format_naive_date_long,
    group_thousands, month_name, parse_iso_date, MONTHS_LONG,
};

use thiserror::Error;

/// Errors that can occur during Spanish text processing
#[derive(Debug, Error)]
pub enum EsTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for Spanish text operations
pub type Result<T> = std::result::Result<T, EsTextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rut() {
        assert_eq!(format_rut("123456785"), "12.345.678-5");
        assert_eq!(format_rut("12.345.678-5"), "12.345.678-5");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("500000"), "500.000");
        assert_eq!(format_currency("abc"), "");
    }

    #[test]
    fn test_error_display() {
        let err = EsTextError::InvalidDate("2024-13-01".to_string());
        assert_eq!(err.to_string(), "Invalid date: 2024-13-01");
    }
}
