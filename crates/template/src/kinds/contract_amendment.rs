//! Anexo de contrato de trabajo

use super::{two_party_signatures, Body, DocumentComposer, Values};
use crate::schema::{CanonicalDocument, FieldValues, TemplateKind};

/// Document title
pub const TITLE: &str = "ANEXO DE CONTRATO DE TRABAJO";

/// The amended clause: title, previous and new condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseChange {
    pub title: String,
    pub previous: String,
    pub new: String,
}

/// Composes amendments to an existing employment contract
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractAmendmentComposer;

impl ContractAmendmentComposer {
    /// Clause generated for the selected change type
    pub fn clause_change(fields: &FieldValues) -> ClauseChange {
        let v = Values::new(TemplateKind::ContractAmendment, fields);

        let (title, previous, new) = match v.choice("tipoCambio") {
            "funciones" => (
                "MODIFICACIÓN DE FUNCIONES".to_string(),
                v.text("funcionesAnteriores").to_string(),
                v.text("funcionesNuevas").to_string(),
            ),
            "jornada" => (
                "MODIFICACIÓN DE JORNADA".to_string(),
                format!("{} horas semanales", v.text("jornadaAnterior")),
                format!("{} horas semanales", v.text("jornadaNueva")),
            ),
            "lugar" => (
                "MODIFICACIÓN DE LUGAR DE TRABAJO".to_string(),
                v.text("lugarAnterior").to_string(),
                v.text("lugarNuevo").to_string(),
            ),
            "otras" => (
                format!(
                    "MODIFICACIÓN: {}",
                    v.text("otraClausulaDescripcion").to_uppercase()
                ),
                v.text("otraClausulaAnterior").to_string(),
                v.text("otraClausulaNueva").to_string(),
            ),
            // "sueldo", also the fallback
            _ => (
                "MODIFICACIÓN DE REMUNERACIÓN".to_string(),
                format!("{} mensuales brutos", v.pesos("sueldoAnterior")),
                format!("{} mensuales brutos", v.pesos("sueldoNuevo")),
            ),
        };

        ClauseChange {
            title,
            previous,
            new,
        }
    }
}

impl DocumentComposer for ContractAmendmentComposer {
    fn kind(&self) -> TemplateKind {
        TemplateKind::ContractAmendment
    }

    fn compose(&self, fields: &FieldValues) -> CanonicalDocument {
        let v = Values::new(self.kind(), fields);
        let change = Self::clause_change(fields);

        let effective_date = v.date("fechaVigencia");
        let representative = v.text("representanteLegal");
        let representative_rut = v.rut("rutRepresentante");
        let employee = v.text("nombreTrabajador");
        let employee_rut = v.rut("rutTrabajador");

        let mut body = Body::new();
        body.line(TITLE)
            .blank()
            .line(format!("En Santiago, a {effective_date}, entre:"))
            .blank()
            .section(
                "EMPLEADOR:",
                format!(
                    "{}, RUT {}, representada legalmente por {representative}, RUT {representative_rut}, \
                     en adelante \"el Empleador\".",
                    v.text("nombreEmpresa"),
                    v.rut("rutEmpresa"),
                ),
            )
            .section(
                "TRABAJADOR:",
                format!("{employee}, RUT {employee_rut}, en adelante \"el Trabajador\"."),
            )
            .line(format!(
                "Las partes acuerdan modificar el contrato de trabajo suscrito con fecha {}, \
                 en los términos que a continuación se indican:",
                v.date("fechaContratoOriginal"),
            ))
            .blank()
            .line(change.title)
            .blank()
            .line(
                "Se modifica la cláusula correspondiente del contrato de trabajo en los siguientes términos:",
            )
            .blank()
            .section("CONDICIÓN ANTERIOR:", change.previous)
            .section("NUEVA CONDICIÓN:", change.new)
            .section(
                "VIGENCIA:",
                format!("El presente anexo entrará en vigencia a contar del {effective_date}."),
            )
            .section(
                "CLÁUSULA FINAL:",
                "Las demás estipulaciones del contrato de trabajo se mantienen vigentes sin modificación alguna.",
            )
            .line("Se firma el presente anexo en dos ejemplares, quedando uno en poder de cada parte.")
            .blank()
            .blank();

        two_party_signatures(
            &mut body,
            representative,
            employee,
            &representative_rut,
            &employee_rut,
        );

        CanonicalDocument::new(TITLE, body.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields_for(change: &str) -> FieldValues {
        let mut fields = FieldValues::with_defaults(TemplateKind::ContractAmendment);
        fields
            .set("nombreEmpresa", "Comercial Andes SpA")
            .set("rutEmpresa", "761234567")
            .set("representanteLegal", "María González")
            .set("rutRepresentante", "123456785")
            .set("nombreTrabajador", "Juan Soto")
            .set("rutTrabajador", "987654321")
            .set("fechaContratoOriginal", "2023-01-02")
            .set("fechaVigencia", "2024-07-01")
            .set("tipoCambio", change);
        fields
    }

    #[test]
    fn test_salary_change() {
        let mut fields = fields_for("sueldo");
        fields.set("sueldoAnterior", "500000").set("sueldoNuevo", "600000");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(
            change,
            ClauseChange {
                title: "MODIFICACIÓN DE REMUNERACIÓN".to_string(),
                previous: "$500.000 mensuales brutos".to_string(),
                new: "$600.000 mensuales brutos".to_string(),
            }
        );
    }

    #[test]
    fn test_duties_change() {
        let mut fields = fields_for("funciones");
        fields
            .set("funcionesAnteriores", "Vendedor")
            .set("funcionesNuevas", "Jefe de tienda");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(change.title, "MODIFICACIÓN DE FUNCIONES");
        assert_eq!(change.previous, "Vendedor");
        assert_eq!(change.new, "Jefe de tienda");
    }

    #[test]
    fn test_schedule_change() {
        let mut fields = fields_for("jornada");
        fields.set("jornadaNueva", "40");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(change.title, "MODIFICACIÓN DE JORNADA");
        assert_eq!(change.previous, "45 horas semanales");
        assert_eq!(change.new, "40 horas semanales");
    }

    #[test]
    fn test_workplace_change() {
        let mut fields = fields_for("lugar");
        fields
            .set("lugarAnterior", "Santiago Centro")
            .set("lugarNuevo", "Maipú");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(change.title, "MODIFICACIÓN DE LUGAR DE TRABAJO");
        assert_eq!(change.new, "Maipú");
    }

    #[test]
    fn test_other_change_uppercases_description() {
        let mut fields = fields_for("otras");
        fields
            .set("otraClausulaDescripcion", "bono de colación")
            .set("otraClausulaAnterior", "Sin bono")
            .set("otraClausulaNueva", "$50.000 mensuales");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(change.title, "MODIFICACIÓN: BONO DE COLACIÓN");
        assert_eq!(change.previous, "Sin bono");
    }

    #[test]
    fn test_change_type_alias() {
        let mut fields = fields_for("");
        fields.set("changeType", "lugar");

        let change = ContractAmendmentComposer::clause_change(&fields);
        assert_eq!(change.title, "MODIFICACIÓN DE LUGAR DE TRABAJO");
    }

    #[test]
    fn test_unknown_change_falls_back_to_salary() {
        let change = ContractAmendmentComposer::clause_change(&fields_for("vacaciones"));
        assert_eq!(change.title, "MODIFICACIÓN DE REMUNERACIÓN");
    }

    #[test]
    fn test_compose_body() {
        let mut fields = fields_for("sueldo");
        fields.set("sueldoAnterior", "500000").set("sueldoNuevo", "600000");

        let doc = ContractAmendmentComposer.compose(&fields);
        assert_eq!(doc.title, TITLE);
        assert!(doc.body.starts_with("ANEXO DE CONTRATO DE TRABAJO\n\nEn Santiago, a 1 de julio de 2024, entre:"));
        assert!(doc.body.contains("suscrito con fecha 2 de enero de 2023, en los términos"));
        assert!(doc.body.contains("CONDICIÓN ANTERIOR:\n$500.000 mensuales brutos\n"));
        assert!(doc.body.contains("NUEVA CONDICIÓN:\n$600.000 mensuales brutos\n"));
        assert!(doc.body.contains("VIGENCIA:\nEl presente anexo entrará en vigencia a contar del 1 de julio de 2024."));
        assert!(doc.body.contains("TRABAJADOR:\nJuan Soto, RUT 98.765.432-1, en adelante \"el Trabajador\"."));
        assert!(doc.body.ends_with("RUT: 12.345.678-5      RUT: 98.765.432-1"));
    }
}
