//! Template kinds, field schemas and field values

use crate::TemplateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Contract modality options (first is the fallback)
pub const MODALITIES: &[&str] = &["indefinido", "plazo-fijo"];

/// Amendment change types (first is the fallback)
pub const CHANGE_TYPES: &[&str] = &["sueldo", "funciones", "jornada", "lugar", "otras"];

/// Sworn declaration types (first is the fallback)
pub const DECLARATION_TYPES: &[&str] = &["domicilio", "ingresos", "sustento", "generica"];

/// Working-day options offered by the contract form
pub const WORKDAY_TYPES: &[&str] = &["completa", "parcial"];

/// Legal document kinds the composer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Contrato de trabajo
    #[serde(rename = "contrato-laboral")]
    LaborContract,
    /// Anexo de contrato de trabajo
    #[serde(rename = "anexo-contrato")]
    ContractAmendment,
    /// Declaración jurada simple
    #[serde(rename = "declaracion-jurada")]
    SwornDeclaration,
}

impl TemplateKind {
    /// Every kind, in menu order
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::LaborContract,
        TemplateKind::ContractAmendment,
        TemplateKind::SwornDeclaration,
    ];

    /// URL-style identifier (`contrato-laboral`, ...)
    pub fn slug(self) -> &'static str {
        match self {
            TemplateKind::LaborContract => "contrato-laboral",
            TemplateKind::ContractAmendment => "anexo-contrato",
            TemplateKind::SwornDeclaration => "declaracion-jurada",
        }
    }

    /// Field schema in form order
    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            TemplateKind::LaborContract => LABOR_CONTRACT_FIELDS,
            TemplateKind::ContractAmendment => CONTRACT_AMENDMENT_FIELDS,
            TemplateKind::SwornDeclaration => SWORN_DECLARATION_FIELDS,
        }
    }

    /// Look up a field by name or alias
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.schema()
            .iter()
            .find(|spec| spec.name == name || spec.alias == Some(name))
    }

    /// Schema fields that are absent or blank in `fields`
    ///
    /// Advisory only; composition never fails on missing data.
    pub fn missing_fields(self, fields: &FieldValues) -> Vec<&'static str> {
        self.schema()
            .iter()
            .filter(|spec| fields.lookup(spec).trim().is_empty())
            .map(|spec| spec.name)
            .collect()
    }

    /// Download name without extension (e.g. `contrato-laboral-12.345.678-5`)
    pub fn file_name(self, fields: &FieldValues) -> String {
        let key = match self {
            TemplateKind::LaborContract | TemplateKind::ContractAmendment => "rutTrabajador",
            TemplateKind::SwornDeclaration => "rutDeclarante",
        };

        let rut = es_text::format_rut(fields.get(key));
        if rut.is_empty() {
            format!("{}-documento", self.slug())
        } else {
            format!("{}-{rut}", self.slug())
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TemplateKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TemplateError::UnknownTemplateKind(s.to_string()))
    }
}

/// Semantic type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Peso amount, grouped with `.`
    Currency,
    /// ISO date, written out in long form
    Date,
    /// One of a fixed set of options
    Choice(&'static [&'static str]),
    /// RUT
    Identifier,
}

/// A field in a kind's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form field name
    pub name: &'static str,
    /// Alternate name accepted from callers
    pub alias: Option<&'static str>,
    /// Semantic type
    pub kind: FieldKind,
    /// Initial value offered by the form
    pub default: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            default: None,
        }
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Text)
}

const fn currency(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Currency)
}

const fn date(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Date)
}

const fn rut(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Identifier)
}

const fn choice(name: &'static str, options: &'static [&'static str]) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Choice(options))
}

const LABOR_CONTRACT_FIELDS: &[FieldSpec] = &[
    // Empleador
    text("nombreEmpresa"),
    rut("rutEmpresa"),
    text("representanteLegal"),
    rut("rutRepresentante"),
    text("direccionEmpresa"),
    text("comunaEmpresa"),
    // Trabajador
    text("nombreTrabajador"),
    rut("rutTrabajador"),
    text("nacionalidad").with_default("Chilena"),
    text("estadoCivil").with_default("Soltero/a"),
    text("direccionTrabajador"),
    text("comunaTrabajador"),
    // Condiciones
    text("cargo"),
    text("funciones"),
    currency("sueldoBruto"),
    choice("modalidad", MODALITIES)
        .with_alias("modality")
        .with_default("indefinido"),
    choice("jornada", WORKDAY_TYPES).with_default("completa"),
    text("horasSemanales").with_default("45"),
    date("fechaInicio"),
    text("duracionMeses").with_default("3"),
    text("lugarTrabajo"),
];

const CONTRACT_AMENDMENT_FIELDS: &[FieldSpec] = &[
    text("nombreEmpresa"),
    rut("rutEmpresa"),
    text("representanteLegal"),
    rut("rutRepresentante"),
    text("nombreTrabajador"),
    rut("rutTrabajador"),
    date("fechaContratoOriginal"),
    choice("tipoCambio", CHANGE_TYPES)
        .with_alias("changeType")
        .with_default("sueldo"),
    date("fechaVigencia"),
    currency("sueldoAnterior"),
    currency("sueldoNuevo"),
    text("funcionesAnteriores"),
    text("funcionesNuevas"),
    text("jornadaAnterior").with_default("45"),
    text("jornadaNueva").with_default("45"),
    text("lugarAnterior"),
    text("lugarNuevo"),
    text("otraClausulaDescripcion"),
    text("otraClausulaAnterior"),
    text("otraClausulaNueva"),
];

const SWORN_DECLARATION_FIELDS: &[FieldSpec] = &[
    text("nombreDeclarante"),
    rut("rutDeclarante"),
    text("nacionalidad").with_default("Chilena"),
    text("estadoCivil").with_default("Soltero/a"),
    text("profesion"),
    text("domicilio"),
    text("comuna"),
    text("region").with_default("Metropolitana"),
    choice("tipoDeclaracion", DECLARATION_TYPES)
        .with_alias("declarationType")
        .with_default("domicilio"),
    text("ciudad").with_default("Santiago"),
    date("fecha"),
    // Domicilio
    text("direccionDomicilio"),
    text("comunaDomicilio"),
    text("tiempoResidencia").with_default("1 año"),
    // Ingresos
    text("tipoIngreso").with_default("Sueldo mensual"),
    currency("montoIngresos"),
    text("fuenteIngresos"),
    // Sustento
    text("nombreBeneficiario"),
    rut("rutBeneficiario"),
    text("relacionBeneficiario").with_default("Familiar directo"),
    text("tipoApoyo").with_default("Económico y habitacional"),
    // Genérica
    text("textoLibre"),
];

/// Field values entered by the user, keyed by field name
///
/// Read-only for the composer; a missing field reads as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Values pre-filled with the schema defaults of `kind`
    pub fn with_defaults(kind: TemplateKind) -> Self {
        kind.schema()
            .iter()
            .filter_map(|spec| spec.default.map(|value| (spec.name, value)))
            .collect()
    }

    /// Set a field value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Value of a field, `""` when absent
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Value of a schema field, falling back to its alias when the name is blank
    pub fn lookup(&self, spec: &FieldSpec) -> &str {
        let value = self.get(spec.name);
        match spec.alias {
            Some(alias) if value.trim().is_empty() => self.get(alias),
            _ => value,
        }
    }

    /// Whether a field is present (even if blank)
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of these values
    pub fn merge(&mut self, other: &FieldValues) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Composed document before layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    /// Title, rendered bold and centered
    pub title: String,
    /// Body text, one physical line per `\n`
    pub body: String,
}

impl CanonicalDocument {
    /// Create a document from a title and body
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Plain-text preview shown to the user (the body)
    pub fn preview(&self) -> &str {
        &self.body
    }

    /// Body split into physical lines
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.body.lines()
    }
}
