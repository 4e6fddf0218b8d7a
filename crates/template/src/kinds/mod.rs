//! Document composers, one per template kind
//!
//! Each kind implements [`DocumentComposer`]; [`render`] picks the composer
//! from a static table, so adding a kind means adding a table entry.

mod contract_amendment;
mod labor_contract;
mod sworn_declaration;

pub use contract_amendment::ContractAmendmentComposer;
pub use labor_contract::LaborContractComposer;
pub use sworn_declaration::SwornDeclarationComposer;

use crate::schema::{CanonicalDocument, FieldKind, FieldValues, TemplateKind};

/// Rule separating the signature block from the text above
pub const SIGNATURE_RULE: &str = "_________________________";

/// Turns field values into the canonical text of one kind of document
pub trait DocumentComposer: Sync {
    /// Kind this composer produces
    fn kind(&self) -> TemplateKind;

    /// Compose title and body; never fails, missing fields read as `""`
    fn compose(&self, fields: &FieldValues) -> CanonicalDocument;
}

static COMPOSERS: [&dyn DocumentComposer; 3] = [
    &LaborContractComposer,
    &ContractAmendmentComposer,
    &SwornDeclarationComposer,
];

/// Composer registered for `kind`
pub fn composer_for(kind: TemplateKind) -> &'static dyn DocumentComposer {
    // Table order follows the enum declaration
    COMPOSERS[kind as usize]
}

/// Compose the canonical document for `kind` from `fields`
///
/// # Example
/// ```ignore
/// let doc = render(TemplateKind::LaborContract, &fields);
/// println!("{}", doc.preview());
/// ```
pub fn render(kind: TemplateKind, fields: &FieldValues) -> CanonicalDocument {
    let document = composer_for(kind).compose(fields);
    tracing::debug!(
        kind = %kind,
        lines = document.body.lines().count(),
        "composed document"
    );
    document
}

/// Formatted access to field values for a given kind
pub(crate) struct Values<'a> {
    kind: TemplateKind,
    fields: &'a FieldValues,
}

impl<'a> Values<'a> {
    pub(crate) fn new(kind: TemplateKind, fields: &'a FieldValues) -> Self {
        Self { kind, fields }
    }

    /// Raw text
    pub(crate) fn text(&self, name: &str) -> &'a str {
        self.fields.get(name)
    }

    /// RUT in `12.345.678-5` form
    pub(crate) fn rut(&self, name: &str) -> String {
        es_text::format_rut(self.fields.get(name))
    }

    /// `$` followed by the grouped amount
    pub(crate) fn pesos(&self, name: &str) -> String {
        format!("${}", es_text::format_currency(self.fields.get(name)))
    }

    /// Long-form date, `""` when empty or invalid
    pub(crate) fn date(&self, name: &str) -> String {
        es_text::format_iso_date_long(self.fields.get(name))
    }

    /// Selected option of a choice field; unknown or empty picks the first option
    pub(crate) fn choice(&self, name: &str) -> &'static str {
        let Some(spec) = self.kind.field(name) else {
            return "";
        };
        let FieldKind::Choice(options) = spec.kind else {
            return "";
        };

        let selected = self.fields.lookup(spec).trim();
        options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(selected))
            .or_else(|| options.first())
            .copied()
            .unwrap_or("")
    }
}

/// Line-by-line body builder; the finished body is trimmed at both ends
#[derive(Debug, Default)]
pub(crate) struct Body {
    lines: Vec<String>,
}

impl Body {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one line (may itself contain `\n`)
    pub(crate) fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Append an empty line
    pub(crate) fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Append a heading followed by its paragraph and a blank line
    pub(crate) fn section(&mut self, heading: &str, text: impl Into<String>) -> &mut Self {
        self.line(heading).line(text).blank()
    }

    pub(crate) fn finish(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Employer and employee signature columns
pub(crate) fn two_party_signatures(
    body: &mut Body,
    representative: &str,
    employee: &str,
    representative_rut: &str,
    employee_rut: &str,
) {
    body.line(format!("{SIGNATURE_RULE}          {SIGNATURE_RULE}"))
        .line("      EMPLEADOR                         TRABAJADOR")
        .line(format!("{representative}      {employee}"))
        .line(format!("RUT: {representative_rut}      RUT: {employee_rut}"));
}
