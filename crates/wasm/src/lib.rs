//! WASM bindings for tramite
//!
//! This crate provides JavaScript-friendly API for:
//! - Chilean formatting helpers (RUT, pesos, dates)
//! - Composing a document from form values and previewing it
//! - Rendering the document to PDF bytes
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { DocumentDraft, EsFormatter } from 'tramite-wasm';
//!
//! await init();
//!
//! EsFormatter.formatRut('123456785'); // "12.345.678-5"
//!
//! const draft = DocumentDraft.create('contrato-laboral', formData);
//! preview.textContent = draft.preview();
//! const pdf = draft.toPdf();          // Uint8Array
//! download(pdf, `${draft.fileName()}.pdf`);
//! ```

use chrono::NaiveDate;
use template::{FieldValues, FooterStamp, PageGeometry, Paginator, TemplateKind};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Chilean formatting utilities
#[wasm_bindgen]
pub struct EsFormatter;

#[wasm_bindgen]
impl EsFormatter {
    /// Format a RUT
    ///
    /// @param value - Raw identifier (e.g., "123456785")
    /// @returns Formatted RUT (e.g., "12.345.678-5")
    #[wasm_bindgen(js_name = formatRut)]
    pub fn format_rut(value: &str) -> String {
        es_text::format_rut(value)
    }

    /// Group a peso amount
    ///
    /// @param value - Raw amount (e.g., "500000")
    /// @returns Grouped amount (e.g., "500.000"), empty when not numeric
    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(value: &str) -> String {
        es_text::format_currency(value)
    }

    /// Write out an ISO date
    ///
    /// @param value - Date as YYYY-MM-DD
    /// @returns Long date (e.g., "15 de marzo de 2024"), empty when invalid
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(value: &str) -> String {
        es_text::format_iso_date_long(value)
    }
}

/// A composed document for one set of form values
#[wasm_bindgen]
pub struct DocumentDraft {
    kind: TemplateKind,
    fields: FieldValues,
    document: template::CanonicalDocument,
}

#[wasm_bindgen]
impl DocumentDraft {
    /// Compose a document
    ///
    /// @param kind - "contrato-laboral", "anexo-contrato" or "declaracion-jurada"
    /// @param fields - Form values object
    /// @returns DocumentDraft instance
    pub fn create(kind: &str, fields: JsValue) -> Result<DocumentDraft, JsValue> {
        let kind: TemplateKind = kind.parse().map_err(to_js_error)?;
        let value: serde_json::Value = serde_wasm_bindgen::from_value(fields)?;
        let fields = template::parser::field_values_from_json(&value).map_err(to_js_error)?;
        Ok(Self::compose(kind, fields))
    }

    /// Compose a document from a JSON string of form values
    ///
    /// @param kind - Template kind slug
    /// @param json - Form values as JSON
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(kind: &str, json: &str) -> Result<DocumentDraft, JsValue> {
        let kind: TemplateKind = kind.parse().map_err(to_js_error)?;
        let fields = template::parse_field_values(json).map_err(to_js_error)?;
        Ok(Self::compose(kind, fields))
    }

    /// Template kind slug
    pub fn kind(&self) -> String {
        self.kind.slug().to_string()
    }

    /// Document title
    pub fn title(&self) -> String {
        self.document.title.clone()
    }

    /// Document body
    pub fn body(&self) -> String {
        self.document.body.clone()
    }

    /// Plain-text preview
    pub fn preview(&self) -> String {
        self.document.preview().to_string()
    }

    /// Suggested download name without extension
    #[wasm_bindgen(js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.kind.file_name(&self.fields)
    }

    /// Schema fields that are still blank
    #[wasm_bindgen(js_name = missingFields)]
    pub fn missing_fields(&self) -> Vec<JsValue> {
        self.kind
            .missing_fields(&self.fields)
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Render to PDF
    ///
    /// @param geometry - Optional page geometry object (camelCase keys)
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = toPdf)]
    pub fn to_pdf(&self, geometry: JsValue) -> Result<Vec<u8>, JsValue> {
        let geometry = if geometry.is_undefined() || geometry.is_null() {
            PageGeometry::default()
        } else {
            let geometry: PageGeometry = serde_wasm_bindgen::from_value(geometry)?;
            geometry.validate().map_err(to_js_error)?;
            geometry
        };

        let rendered = Paginator::new(&geometry).layout(&self.document, &today()?);
        template::to_pdf_bytes(&rendered).map_err(to_js_error)
    }
}

impl DocumentDraft {
    fn compose(kind: TemplateKind, fields: FieldValues) -> DocumentDraft {
        let document = template::render(kind, &fields);
        DocumentDraft {
            kind,
            fields,
            document,
        }
    }
}

/// Footer stamp from the browser clock
fn today() -> Result<FooterStamp, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .map(FooterStamp::new)
        .ok_or_else(|| JsValue::from_str("Invalid system date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_es_formatter() {
        assert_eq!(EsFormatter::format_rut("123456785"), "12.345.678-5");
        assert_eq!(EsFormatter::format_currency("500000"), "500.000");
        assert_eq!(EsFormatter::format_date("2024-03-15"), "15 de marzo de 2024");
        assert_eq!(EsFormatter::format_date(""), "");
    }

    #[wasm_bindgen_test]
    fn test_draft_from_json() {
        let draft = DocumentDraft::from_json(
            "declaracion-jurada",
            r#"{"tipoDeclaracion": "generica", "textoLibre": "Que no tengo antecedentes."}"#,
        )
        .unwrap();

        assert_eq!(draft.kind(), "declaracion-jurada");
        assert_eq!(draft.title(), "DECLARACIÓN GENÉRICA");
        assert!(draft.body().contains("Que no tengo antecedentes."));
        assert_eq!(draft.preview(), draft.body());
        assert_eq!(draft.file_name(), "declaracion-jurada-documento");
    }

    #[wasm_bindgen_test]
    fn test_draft_to_pdf() {
        let draft = DocumentDraft::from_json("anexo-contrato", "{}").unwrap();
        let bytes = draft.to_pdf(JsValue::UNDEFINED).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[wasm_bindgen_test]
    fn test_draft_unknown_kind() {
        assert!(DocumentDraft::from_json("finiquito", "{}").is_err());
    }
}
