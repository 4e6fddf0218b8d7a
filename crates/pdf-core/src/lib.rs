//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating blank PDF documents with any page size
//! - Placing text with the standard Helvetica family (WinAnsi encoded)
//! - Measuring and wrapping text with the built-in glyph metrics
//! - Serializing documents to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PdfDocument, StandardFont};
//!
//! let mut doc = PdfDocument::new(612.0, 792.0);
//! let page = doc.add_blank_page()?;
//! doc.set_font(StandardFont::HelveticaBold, 16.0);
//! doc.insert_text("CONTRATO DE TRABAJO", page, 306.0, 56.7, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod text;

pub use document::PdfDocument;
pub use font::{FontStyle, FontWeight, StandardFont};
pub use text::{generate_text_operators, wrap_to_width, MetricWrap, TextRenderContext, TextWrap};

use thiserror::Error;

/// Points per millimetre
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
        // US Letter
        assert!((mm_to_pt(215.9) - 612.0).abs() < 1e-9);
        assert!((mm_to_pt(279.4) - 792.0).abs() < 1e-9);
    }

    #[test]
    fn test_error_display() {
        let err = PdfError::InvalidPage(3, 2);
        assert_eq!(err.to_string(), "Invalid page number: 3 (document has 2 pages)");
    }
}
