//! Pagination and line layout
//!
//! Positions are in millimetres from the top-left corner of the page, with y
//! growing downward. Widths handed to the wrapper are converted to points.

use crate::kinds::SIGNATURE_RULE;
use crate::{CanonicalDocument, Result, TemplateError};
use chrono::NaiveDate;
use pdf_core::{mm_to_pt, Align, FontStyle, FontWeight, MetricWrap, StandardFont, TextWrap};
use serde::{Deserialize, Serialize};

/// Product name stamped in the footer
pub const PRODUCT_NAME: &str = "TramiteZoom";

/// Page size, margins and typographic constants (millimetres and points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    /// Page width (mm)
    pub width: f64,
    /// Page height (mm)
    pub height: f64,
    /// Uniform margin (mm)
    pub margin: f64,
    /// Advance after each body line (mm)
    pub line_height: f64,
    /// Advance per wrapped title line (mm)
    pub title_line_height: f64,
    /// Gap between title and body (mm)
    pub title_gap: f64,
    /// Advance for a blank body line (mm)
    pub blank_line_advance: f64,
    /// Extra space above a signature rule (mm)
    pub signature_gap: f64,
    /// Title font size (pt)
    pub title_font_size: f32,
    /// Body font size (pt)
    pub body_font_size: f32,
    /// Footer font size (pt)
    pub footer_font_size: f32,
    /// Distance from the footer baseline to the page bottom (mm)
    pub footer_offset: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageGeometry {
    /// US Letter portrait with the standard document settings
    pub fn letter() -> Self {
        Self {
            width: 215.9,
            height: 279.4,
            margin: 20.0,
            line_height: 6.0,
            title_line_height: 8.0,
            title_gap: 10.0,
            blank_line_advance: 5.0,
            signature_gap: 15.0,
            title_font_size: 16.0,
            body_font_size: 11.0,
            footer_font_size: 8.0,
            footer_offset: 10.0,
        }
    }

    /// Parse geometry from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let geometry: PageGeometry = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check that the geometry leaves room for text
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("lineHeight", self.line_height),
            ("titleLineHeight", self.title_line_height),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(TemplateError::InvalidGeometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let spacings = [
            ("margin", self.margin),
            ("titleGap", self.title_gap),
            ("blankLineAdvance", self.blank_line_advance),
            ("signatureGap", self.signature_gap),
            ("footerOffset", self.footer_offset),
        ];
        for (name, value) in spacings {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TemplateError::InvalidGeometry(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let font_sizes = [
            ("titleFontSize", self.title_font_size),
            ("bodyFontSize", self.body_font_size),
            ("footerFontSize", self.footer_font_size),
        ];
        for (name, value) in font_sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(TemplateError::InvalidGeometry(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.usable_width() <= 0.0 {
            return Err(TemplateError::InvalidGeometry(format!(
                "margins of {} leave no usable width on a {} wide page",
                self.margin, self.width
            )));
        }
        if self.height - 2.0 * self.margin <= 0.0 {
            return Err(TemplateError::InvalidGeometry(format!(
                "margins of {} leave no usable height on a {} high page",
                self.margin, self.height
            )));
        }

        Ok(())
    }

    /// Width available for text (mm)
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a line may start at before a page break (mm)
    pub fn bottom_bound(&self) -> f64 {
        self.height - self.margin
    }
}

/// Generation date and product name for the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterStamp {
    pub generated_on: NaiveDate,
    pub product: String,
}

impl FooterStamp {
    /// Stamp for a given date
    pub fn new(generated_on: NaiveDate) -> Self {
        Self {
            generated_on,
            product: PRODUCT_NAME.to_string(),
        }
    }

    /// Stamp for today's local date
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Footer line, e.g. `Documento generado el 15 de marzo de 2024 - TramiteZoom`
    pub fn text(&self) -> String {
        format!(
            "Documento generado el {} - {}",
            es_text::format_naive_date_long(self.generated_on),
            self.product
        )
    }
}

/// A run of text placed at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    /// Alignment anchor (mm from the left edge)
    pub x: f64,
    /// Baseline (mm from the top edge)
    pub y: f64,
    pub align: Align,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Font size (pt)
    pub font_size: f32,
}

impl TextFragment {
    /// Standard font face for this fragment
    pub fn font(&self) -> StandardFont {
        StandardFont::from_variant(self.weight, self.style)
    }
}

/// One laid-out page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub fragments: Vec<TextFragment>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Lowest baseline on the page, if anything was placed
    pub fn last_line_y(&self) -> Option<f64> {
        self.fragments.iter().map(|f| f.y).reduce(f64::max)
    }
}

/// Footer repeated on every page
#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub fragment: TextFragment,
}

/// Laid-out document ready for export
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub footer: Footer,
}

impl RenderedDocument {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Whether a body line is rendered as a bold section header
///
/// The trimmed line must be longer than 3 characters, already upper-case,
/// and contain neither `$` nor `RUT:`.
pub fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().count() > 3
        && trimmed == trimmed.to_uppercase()
        && !line.contains('$')
        && !line.contains("RUT:")
}

/// Whether a body line carries a signature rule
pub fn is_signature_line(line: &str) -> bool {
    line.contains(SIGNATURE_RULE)
}

/// Lays out canonical documents on fixed-size pages
pub struct Paginator<'a> {
    geometry: &'a PageGeometry,
    wrapper: &'a dyn TextWrap,
}

impl<'a> Paginator<'a> {
    /// Paginator using the standard font metrics for wrapping
    pub fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            wrapper: &MetricWrap,
        }
    }

    /// Replace the wrapping strategy
    pub fn with_wrapper(mut self, wrapper: &'a dyn TextWrap) -> Self {
        self.wrapper = wrapper;
        self
    }

    /// Lay out `document`, stamping `stamp` in the footer
    pub fn layout(&self, document: &CanonicalDocument, stamp: &FooterStamp) -> RenderedDocument {
        let g = self.geometry;
        let max_width = mm_to_pt(g.usable_width());

        let mut pages = vec![Page::new(1)];

        // Title
        let title_lines = self.wrapper.wrap(
            &document.title,
            max_width,
            StandardFont::HelveticaBold,
            g.title_font_size,
        );
        let mut y = g.margin;
        for line in title_lines {
            self.break_if_past_bound(&mut pages, &mut y);
            if let Some(page) = pages.last_mut() {
                page.fragments.push(TextFragment {
                    text: line,
                    x: g.width / 2.0,
                    y,
                    align: Align::Center,
                    weight: FontWeight::Bold,
                    style: FontStyle::Normal,
                    font_size: g.title_font_size,
                });
            }
            y += g.title_line_height;
        }
        y += g.title_gap;

        // Body
        for line in document.body.split('\n') {
            if line.trim().is_empty() {
                y += g.blank_line_advance;
                continue;
            }

            let weight = if is_section_header(line) {
                FontWeight::Bold
            } else {
                FontWeight::Regular
            };
            if is_signature_line(line) {
                y += g.signature_gap;
            }

            let font = StandardFont::from_variant(weight, FontStyle::Normal);
            for sub_line in self.wrapper.wrap(line, max_width, font, g.body_font_size) {
                self.break_if_past_bound(&mut pages, &mut y);
                if let Some(page) = pages.last_mut() {
                    page.fragments.push(TextFragment {
                        text: sub_line,
                        x: g.margin,
                        y,
                        align: Align::Left,
                        weight,
                        style: FontStyle::Normal,
                        font_size: g.body_font_size,
                    });
                }
                y += g.line_height;
            }
        }

        let footer = Footer {
            fragment: TextFragment {
                text: stamp.text(),
                x: g.width / 2.0,
                y: g.height - g.footer_offset,
                align: Align::Center,
                weight: FontWeight::Regular,
                style: FontStyle::Italic,
                font_size: g.footer_font_size,
            },
        };

        tracing::debug!(
            title = %document.title,
            pages = pages.len(),
            "laid out document"
        );

        RenderedDocument {
            title: document.title.clone(),
            geometry: *g,
            pages,
            footer,
        }
    }

    /// Start a new page when the cursor has passed the bottom bound
    fn break_if_past_bound(&self, pages: &mut Vec<Page>, y: &mut f64) {
        if *y > self.geometry.bottom_bound() {
            let number = pages.len() + 1;
            tracing::debug!(page = number, "page break");
            pages.push(Page::new(number));
            *y = self.geometry.margin;
        }
    }
}

/// Lay out `document` with the standard wrapper
pub fn layout(
    document: &CanonicalDocument,
    geometry: &PageGeometry,
    stamp: &FooterStamp,
) -> RenderedDocument {
    Paginator::new(geometry).layout(document, stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Never wraps
    struct NoWrap;

    impl TextWrap for NoWrap {
        fn wrap(&self, text: &str, _: f64, _: StandardFont, _: f32) -> Vec<String> {
            vec![text.to_string()]
        }
    }

    /// Splits every line in two halves
    struct Halves;

    impl TextWrap for Halves {
        fn wrap(&self, text: &str, _: f64, _: StandardFont, _: f32) -> Vec<String> {
            let chars: Vec<char> = text.chars().collect();
            let (a, b) = chars.split_at(chars.len() / 2);
            vec![a.iter().collect(), b.iter().collect()]
        }
    }

    /// One word per line
    struct Words;

    impl TextWrap for Words {
        fn wrap(&self, text: &str, _: f64, _: StandardFont, _: f32) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    fn stamp() -> FooterStamp {
        FooterStamp::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    fn body_fragments(doc: &RenderedDocument) -> Vec<&TextFragment> {
        doc.pages
            .iter()
            .flat_map(|p| p.fragments.iter())
            .filter(|f| f.align == Align::Left)
            .collect()
    }

    #[test]
    fn test_header_detection() {
        assert!(is_section_header("PRIMERO: NATURALEZA DE LOS SERVICIOS"));
        assert!(is_section_header("  EMPLEADOR:  "));
        assert!(is_section_header("CONDICIÓN ANTERIOR:"));
        assert!(!is_section_header("primero: naturaleza de los servicios"));
        assert!(!is_section_header("ABC"));
        assert!(!is_section_header("    "));
        assert!(!is_section_header("$100 RUT:"));
        assert!(!is_section_header("$100 rut:"));
        assert!(!is_section_header("RUT: 12.345.678-5"));
        assert!(!is_section_header("$500.000 MENSUALES"));
        assert!(!is_section_header("(Contrato Indefinido)"));
    }

    #[test]
    fn test_header_counts_characters() {
        // Four characters, eight bytes
        assert!(is_section_header("ÑÑÑÑ"));
        assert!(!is_section_header("ÑÑÑ"));
    }

    #[test]
    fn test_signature_detection() {
        assert!(is_signature_line("_________________________"));
        assert!(is_signature_line(
            "_________________________          _________________________"
        ));
        assert!(!is_signature_line("____"));
    }

    #[test]
    fn test_title_centered_and_bold() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("CONTRATO DE TRABAJO", "Texto");
        let rendered = layout(&doc, &geometry, &stamp());

        let title = &rendered.pages[0].fragments[0];
        assert_eq!(title.text, "CONTRATO DE TRABAJO");
        assert_eq!(title.align, Align::Center);
        assert_eq!(title.weight, FontWeight::Bold);
        assert_eq!(title.x, 215.9 / 2.0);
        assert_eq!(title.y, 20.0);
        assert_eq!(title.font_size, 16.0);

        // 20 + 1 * 8 + 10
        let body = &rendered.pages[0].fragments[1];
        assert_eq!(body.y, 38.0);
        assert_eq!(body.x, 20.0);
        assert_eq!(body.weight, FontWeight::Regular);
    }

    #[test]
    fn test_wrapped_title_advances_cursor() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("TITULO LARGO", "x");
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&Halves)
            .layout(&doc, &stamp());

        let fragments = &rendered.pages[0].fragments;
        assert_eq!(fragments[0].y, 20.0);
        assert_eq!(fragments[1].y, 28.0);
        // 20 + 2 * 8 + 10
        assert_eq!(fragments[2].y, 46.0);
    }

    #[test]
    fn test_empty_title_still_takes_a_line() {
        let geometry = PageGeometry::default();
        let rendered = layout(&CanonicalDocument::new("", "uno"), &geometry, &stamp());
        assert_eq!(rendered.pages[0].fragments[0].text, "");
        assert_eq!(rendered.pages[0].fragments[1].y, 38.0);
    }

    #[test]
    fn test_blank_lines_and_headers() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("T", "EMPLEADOR:\nAna Pérez, RUT 1-9\n\nTRABAJADOR:");
        let rendered = layout(&doc, &geometry, &stamp());
        let body = body_fragments(&rendered);

        assert_eq!(body.len(), 3);
        assert_eq!(body[0].weight, FontWeight::Bold);
        assert_eq!(body[0].y, 38.0);
        assert_eq!(body[1].weight, FontWeight::Regular);
        assert_eq!(body[1].y, 44.0);
        // blank line adds 5
        assert_eq!(body[2].y, 55.0);
        assert_eq!(body[2].weight, FontWeight::Bold);
    }

    #[test]
    fn test_signature_gap() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("T", "Firma:\n_________________________\nAna");
        let rendered = layout(&doc, &geometry, &stamp());
        let body = body_fragments(&rendered);

        assert_eq!(body[0].y, 38.0);
        // 44 + 15
        assert_eq!(body[1].y, 59.0);
        assert_eq!(body[1].weight, FontWeight::Bold);
        assert_eq!(body[2].y, 65.0);
    }

    #[test]
    fn test_wrapped_body_lines_each_advance() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("T", "abcdef");
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&Halves)
            .layout(&doc, &stamp());
        let body = body_fragments(&rendered);

        // Title also halves: 20 + 2 * 8 + 10 = 46
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].text, "abc");
        assert_eq!(body[0].y, 46.0);
        assert_eq!(body[1].text, "def");
        assert_eq!(body[1].y, 52.0);
    }

    #[test]
    fn test_page_break() {
        let geometry = PageGeometry::default();
        let body = (1..=60).map(|i| format!("linea {i}")).collect::<Vec<_>>().join("\n");
        let doc = CanonicalDocument::new("T", body);
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&NoWrap)
            .layout(&doc, &stamp());

        assert_eq!(rendered.page_count(), 2);
        for page in &rendered.pages {
            assert!(page.last_line_y().unwrap() <= geometry.bottom_bound());
        }

        // Continuation page starts at the top margin
        let second = &rendered.pages[1];
        assert_eq!(second.number, 2);
        assert_eq!(second.fragments[0].y, 20.0);

        // Order preserved across pages
        let texts: Vec<_> = body_fragments(&rendered).iter().map(|f| f.text.clone()).collect();
        assert_eq!(texts.len(), 60);
        assert_eq!(texts[0], "linea 1");
        assert_eq!(texts[59], "linea 60");
    }

    #[test]
    fn test_long_title_breaks_pages() {
        let mut geometry = PageGeometry::letter();
        geometry.height = 60.0;
        geometry.validate().unwrap();

        let doc = CanonicalDocument::new("UNO DOS TRES CUATRO CINCO SEIS", "x");
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&Words)
            .layout(&doc, &stamp());

        let texts = |page: &Page| -> Vec<(String, f64)> {
            page.fragments.iter().map(|f| (f.text.clone(), f.y)).collect()
        };
        assert_eq!(rendered.page_count(), 3);
        assert_eq!(
            texts(&rendered.pages[0]),
            vec![
                ("UNO".to_string(), 20.0),
                ("DOS".to_string(), 28.0),
                ("TRES".to_string(), 36.0),
            ]
        );
        assert_eq!(
            texts(&rendered.pages[1]),
            vec![
                ("CUATRO".to_string(), 20.0),
                ("CINCO".to_string(), 28.0),
                ("SEIS".to_string(), 36.0),
            ]
        );
        // 36 + 8 + 10 passes the bound, so the body opens page 3
        assert_eq!(texts(&rendered.pages[2]), vec![("x".to_string(), 20.0)]);
        assert!(rendered.pages[1].fragments.iter().all(|f| f.weight == FontWeight::Bold));
    }

    #[test]
    fn test_very_long_title_stays_on_pages() {
        let geometry = PageGeometry::default();
        let title = vec!["PALABRA"; 400].join(" ");
        let rendered = layout(&CanonicalDocument::new(title, "fin"), &geometry, &stamp());

        assert!(rendered.page_count() > 1);
        for page in &rendered.pages {
            assert!(page.last_line_y().unwrap() <= geometry.bottom_bound());
        }
    }

    #[test]
    fn test_mixed_content_stays_within_bound() {
        let geometry = PageGeometry::default();
        let mut lines = Vec::new();
        for i in 0..12 {
            lines.push(format!("CLÁUSULA {i}"));
            lines.push(format!("Texto de la cláusula número {i} que ocupa dos líneas"));
            lines.push(String::new());
            lines.push(SIGNATURE_RULE.to_string());
            lines.push("Firma".to_string());
        }
        let doc = CanonicalDocument::new("TITULO EN DOS LINEAS", lines.join("\n"));
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&Halves)
            .layout(&doc, &stamp());

        assert!(rendered.page_count() >= 2);
        assert_eq!(rendered.pages[0].fragments[1].y, 28.0);
        for fragment in rendered.pages.iter().flat_map(|p| p.fragments.iter()) {
            assert!(fragment.y <= geometry.bottom_bound());
        }
        let rules = rendered
            .pages
            .iter()
            .flat_map(|p| p.fragments.iter())
            .filter(|f| f.text.contains("____"))
            .count();
        // each rule is halved by the wrapper
        assert_eq!(rules, 24);
    }

    #[test]
    fn test_layout_is_pure() {
        let geometry = PageGeometry::default();
        let body = (1..=150).map(|i| format!("linea {i}")).collect::<Vec<_>>().join("\n");
        let doc = CanonicalDocument::new("DOCUMENTO", body);

        let first = layout(&doc, &geometry, &stamp());
        let second = layout(&doc, &geometry, &stamp());
        assert!(first.page_count() > 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_body_splits_on_newline_only() {
        let geometry = PageGeometry::default();
        let doc = CanonicalDocument::new("T", "uno\r\ndos");
        let rendered = Paginator::new(&geometry)
            .with_wrapper(&NoWrap)
            .layout(&doc, &stamp());
        let body = body_fragments(&rendered);

        assert_eq!(body.len(), 2);
        assert_eq!(body[0].text, "uno\r");
        assert_eq!(body[1].text, "dos");
    }

    #[test]
    fn test_footer() {
        let geometry = PageGeometry::default();
        let rendered = layout(&CanonicalDocument::new("T", "x"), &geometry, &stamp());
        let footer = &rendered.footer.fragment;

        assert_eq!(footer.text, "Documento generado el 15 de marzo de 2024 - TramiteZoom");
        assert_eq!(footer.style, FontStyle::Italic);
        assert_eq!(footer.align, Align::Center);
        assert_eq!(footer.font_size, 8.0);
        assert!((footer.y - 269.4).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_defaults_from_json() {
        let geometry = PageGeometry::from_json("{}").unwrap();
        assert_eq!(geometry, PageGeometry::letter());

        let geometry =
            PageGeometry::from_json(r#"{"width": 210, "height": 297, "lineHeight": 5}"#).unwrap();
        assert_eq!(geometry.width, 210.0);
        assert_eq!(geometry.height, 297.0);
        assert_eq!(geometry.line_height, 5.0);
        assert_eq!(geometry.margin, 20.0);
    }

    #[test]
    fn test_geometry_validation() {
        let mut geometry = PageGeometry::letter();
        geometry.margin = 120.0;
        assert!(matches!(geometry.validate(), Err(TemplateError::InvalidGeometry(_))));

        let mut geometry = PageGeometry::letter();
        geometry.line_height = 0.0;
        assert!(matches!(geometry.validate(), Err(TemplateError::InvalidGeometry(_))));

        let mut geometry = PageGeometry::letter();
        geometry.body_font_size = -1.0;
        assert!(matches!(geometry.validate(), Err(TemplateError::InvalidGeometry(_))));

        assert!(matches!(
            PageGeometry::from_json(r#"{"margin": -5}"#),
            Err(TemplateError::InvalidGeometry(_))
        ));
        assert!(matches!(
            PageGeometry::from_json(r#""letter""#),
            Err(TemplateError::JsonError(_))
        ));
    }
}
