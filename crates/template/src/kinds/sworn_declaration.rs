//! Declaración jurada simple

use super::{Body, DocumentComposer, Values, SIGNATURE_RULE};
use crate::schema::{CanonicalDocument, FieldValues, TemplateKind};

/// Composes sworn declarations (domicile, income, economic support, free text)
#[derive(Debug, Clone, Copy, Default)]
pub struct SwornDeclarationComposer;

impl SwornDeclarationComposer {
    /// Human label of a declaration type
    pub fn label(declaration_type: &str) -> &'static str {
        match declaration_type {
            "ingresos" => "Declaración de Ingresos",
            "sustento" => "Declaración de Sustento Económico",
            "generica" => "Declaración Genérica",
            _ => "Declaración de Domicilio",
        }
    }

    /// Text following `DECLARO BAJO JURAMENTO:`
    pub fn statement(fields: &FieldValues) -> String {
        let v = Values::new(TemplateKind::SwornDeclaration, fields);

        match v.choice("tipoDeclaracion") {
            "ingresos" => format!(
                "Que percibo ingresos mensuales por concepto de {}, provenientes de {}, \
                 por un monto aproximado de {} ({} pesos chilenos) mensuales.\n\n\
                 Declaro que esta información es verídica y que puedo acreditarla mediante \
                 la documentación correspondiente si fuese requerido.",
                v.text("tipoIngreso").to_lowercase(),
                v.text("fuenteIngresos"),
                v.pesos("montoIngresos"),
                v.text("montoIngresos"),
            ),
            "sustento" => format!(
                "Que proporciono sustento económico de manera regular a {}, RUT {}, quien es mi {}.\n\n\
                 El tipo de apoyo que brindo es de carácter {}, de forma permanente y sostenida.\n\n\
                 Declaro que esta información es verídica y asumo la responsabilidad legal \
                 que corresponda en caso de falsedad.",
                v.text("nombreBeneficiario"),
                v.rut("rutBeneficiario"),
                v.text("relacionBeneficiario").to_lowercase(),
                v.text("tipoApoyo").to_lowercase(),
            ),
            "generica" => v.text("textoLibre").to_string(),
            _ => format!(
                "Que mi domicilio actual se encuentra ubicado en {}, comuna de {}, \
                 donde resido de forma permanente desde hace {}.\n\n\
                 Declaro que esta información es verídica y que puedo acreditarla si fuese requerido.",
                v.text("direccionDomicilio"),
                v.text("comunaDomicilio"),
                v.text("tiempoResidencia"),
            ),
        }
    }
}

impl DocumentComposer for SwornDeclarationComposer {
    fn kind(&self) -> TemplateKind {
        TemplateKind::SwornDeclaration
    }

    fn compose(&self, fields: &FieldValues) -> CanonicalDocument {
        let v = Values::new(self.kind(), fields);
        let title = Self::label(v.choice("tipoDeclaracion")).to_uppercase();

        let declarant = v.text("nombreDeclarante");
        let declarant_rut = v.rut("rutDeclarante");

        let mut body = Body::new();
        body.line(title.as_str())
            .blank()
            .line(format!(
                "Yo, {declarant}, RUT {declarant_rut}, de nacionalidad {}, estado civil {}, \
                 de profesión u oficio {}, con domicilio en {}, comuna de {}, Región {},",
                v.text("nacionalidad"),
                v.text("estadoCivil"),
                v.text("profesion"),
                v.text("domicilio"),
                v.text("comuna"),
                v.text("region"),
            ))
            .blank()
            .line("DECLARO BAJO JURAMENTO:")
            .blank()
            .line(Self::statement(fields))
            .blank()
            .line(
                "La presente declaración jurada se extiende para ser presentada ante quien corresponda \
                 y para los fines que el interesado estime convenientes.",
            )
            .blank()
            .line(format!(
                "Para constancia, firmo la presente declaración en {}, a {}.",
                v.text("ciudad"),
                v.date("fecha"),
            ))
            .blank()
            .blank()
            .blank()
            .line(SIGNATURE_RULE)
            .line(declarant)
            .line(format!("RUT: {declarant_rut}"));

        CanonicalDocument::new(title, body.finish())
    }
}
