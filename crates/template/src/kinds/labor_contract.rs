//! Contrato de trabajo

use super::{two_party_signatures, Body, DocumentComposer, Values};
use crate::schema::{CanonicalDocument, FieldValues, TemplateKind};

/// Document title
pub const TITLE: &str = "CONTRATO DE TRABAJO";

/// Composes employment contracts, indefinite or fixed-term
#[derive(Debug, Clone, Copy, Default)]
pub struct LaborContractComposer;

impl DocumentComposer for LaborContractComposer {
    fn kind(&self) -> TemplateKind {
        TemplateKind::LaborContract
    }

    fn compose(&self, fields: &FieldValues) -> CanonicalDocument {
        let v = Values::new(self.kind(), fields);

        let indefinite = v.choice("modalidad") == "indefinido";
        let months = v.text("duracionMeses");
        let start_date = v.date("fechaInicio");
        let company_commune = v.text("comunaEmpresa");

        let representative = v.text("representanteLegal");
        let representative_rut = v.rut("rutRepresentante");
        let employee = v.text("nombreTrabajador");
        let employee_rut = v.rut("rutTrabajador");

        let modality_line = if indefinite {
            "(Contrato Indefinido)".to_string()
        } else {
            format!("(Contrato a Plazo Fijo por {months} meses)")
        };

        let duration_clause = if indefinite {
            "El presente contrato tendrá duración indefinida.".to_string()
        } else {
            format!(
                "El presente contrato tendrá una duración de {months} meses, contados desde el {start_date}."
            )
        };

        let mut body = Body::new();
        body.line(TITLE)
            .line(modality_line)
            .blank()
            .line(format!("En {company_commune}, a {start_date}, entre:"))
            .blank()
            .section(
                "EMPLEADOR:",
                format!(
                    "{}, RUT {}, representada legalmente por {representative}, RUT {representative_rut}, \
                     con domicilio en {}, comuna de {company_commune}, en adelante \"el Empleador\".",
                    v.text("nombreEmpresa"),
                    v.rut("rutEmpresa"),
                    v.text("direccionEmpresa"),
                ),
            )
            .section(
                "TRABAJADOR:",
                format!(
                    "{employee}, RUT {employee_rut}, nacionalidad {}, estado civil {}, \
                     con domicilio en {}, comuna de {}, en adelante \"el Trabajador\".",
                    v.text("nacionalidad"),
                    v.text("estadoCivil"),
                    v.text("direccionTrabajador"),
                    v.text("comunaTrabajador"),
                ),
            )
            .line("Se ha convenido el siguiente contrato de trabajo:")
            .blank()
            .section(
                "PRIMERO: NATURALEZA DE LOS SERVICIOS",
                format!(
                    "El trabajador se compromete a desempeñar el cargo de {}, \
                     realizando las siguientes funciones: {}.",
                    v.text("cargo"),
                    v.text("funciones"),
                ),
            )
            .section(
                "SEGUNDO: LUGAR DE TRABAJO",
                format!(
                    "El trabajador prestará sus servicios en {}.",
                    v.text("lugarTrabajo")
                ),
            )
            .section(
                "TERCERO: JORNADA DE TRABAJO",
                format!(
                    "La jornada de trabajo será de {} horas semanales, distribuidas de lunes a viernes, \
                     en horario que el empleador determine según las necesidades del servicio.",
                    v.text("horasSemanales"),
                ),
            )
            .section(
                "CUARTO: REMUNERACIÓN",
                format!(
                    "El empleador pagará al trabajador una remuneración mensual bruta de {} ({} pesos), \
                     que será pagada por períodos vencidos el último día hábil de cada mes.",
                    v.pesos("sueldoBruto"),
                    v.text("sueldoBruto"),
                ),
            )
            .section("QUINTO: DURACIÓN DEL CONTRATO", duration_clause)
            .section(
                "SEXTO: FECHA DE INICIO",
                format!("El trabajador iniciará sus funciones el día {start_date}."),
            )
            .section(
                "SÉPTIMO: OTROS BENEFICIOS",
                "El empleador se obliga a otorgar al trabajador los beneficios legales que correspondan: \
                 gratificación legal, vacaciones, feriado legal, entre otros.",
            )
            .line("Se extiende el presente contrato en dos ejemplares, quedando uno en poder de cada parte.")
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
