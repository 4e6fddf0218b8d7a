//! Template Engine - Chilean legal document composition and layout
//!
//! This crate provides:
//! - Template kinds and their field schemas
//! - Document composition (labor contract, contract amendment, sworn declaration)
//! - Pagination onto fixed-size pages with header and signature handling
//! - PDF export
//!
//! # Example
//!
//! ```ignore
//! use template::{FieldValues, FooterStamp, TemplateKind, TemplateRenderer};
//!
//! let fields = template::parse_field_values(form_json)?;
//! let renderer = TemplateRenderer::new(TemplateKind::LaborContract, &fields);
//! println!("{}", renderer.preview());
//! let path = renderer.export("out", &FooterStamp::today())?;
//! ```

pub mod kinds;
pub mod layout;
pub mod parser;
mod renderer;
mod schema;

pub use kinds::{composer_for, render, DocumentComposer};
pub use layout::{
    is_section_header, is_signature_line, layout, Footer, FooterStamp, Page, PageGeometry,
    Paginator, RenderedDocument, TextFragment,
};
pub use parser::{parse_document_request, parse_field_values};
pub use renderer::{export_to_file, to_pdf_bytes, TemplateRenderer};
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown template kind: {0}")]
    UnknownTemplateKind(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
