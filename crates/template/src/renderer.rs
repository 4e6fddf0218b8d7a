//! Document rendering and PDF export

use crate::kinds::render;
use crate::layout::{
    FooterStamp, PageGeometry, Paginator, RenderedDocument, TextFragment, PRODUCT_NAME,
};
use crate::schema::{CanonicalDocument, FieldValues, TemplateKind};
use crate::Result;
use pdf_core::{mm_to_pt, PdfDocument};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Serialize a laid-out document to PDF bytes
///
/// One PDF page per layout page; the footer is drawn on every page.
pub fn to_pdf_bytes(rendered: &RenderedDocument) -> Result<Vec<u8>> {
    let g = &rendered.geometry;
    let mut doc = PdfDocument::new(mm_to_pt(g.width), mm_to_pt(g.height));
    doc.set_info(&rendered.title, PRODUCT_NAME);

    for page in &rendered.pages {
        let page_number = doc.add_blank_page()?;
        for fragment in &page.fragments {
            draw_fragment(&mut doc, page_number, fragment)?;
        }
        draw_fragment(&mut doc, page_number, &rendered.footer.fragment)?;
    }

    Ok(doc.to_bytes()?)
}

/// Write `dir/{file_name}.pdf` and return its path
///
/// The extension is appended, so dots inside `file_name` (as in a RUT) survive.
pub fn export_to_file(
    rendered: &RenderedDocument,
    dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<PathBuf> {
    let bytes = to_pdf_bytes(rendered)?;

    let mut name = OsString::from(file_name);
    name.push(".pdf");
    let path = dir.as_ref().join(name);

    std::fs::write(&path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        pages = rendered.page_count(),
        bytes = bytes.len(),
        "exported document"
    );

    Ok(path)
}

fn draw_fragment(doc: &mut PdfDocument, page: usize, fragment: &TextFragment) -> Result<()> {
    doc.set_font(fragment.font(), fragment.font_size);
    doc.insert_text(
        &fragment.text,
        page,
        mm_to_pt(fragment.x),
        mm_to_pt(fragment.y),
        fragment.align,
    )?;
    Ok(())
}

/// Compose, lay out and export one document
///
/// # Example
/// ```ignore
/// let renderer = TemplateRenderer::new(TemplateKind::LaborContract, &fields);
/// println!("{}", renderer.preview());
/// let path = renderer.export("out", &FooterStamp::today())?;
/// ```
pub struct TemplateRenderer<'a> {
    kind: TemplateKind,
    fields: &'a FieldValues,
    geometry: PageGeometry,
    document: CanonicalDocument,
}

impl<'a> TemplateRenderer<'a> {
    /// Compose `kind` from `fields` on the default page geometry
    pub fn new(kind: TemplateKind, fields: &'a FieldValues) -> Self {
        Self {
            kind,
            fields,
            geometry: PageGeometry::default(),
            document: render(kind, fields),
        }
    }

    /// Use a different page geometry
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Template kind
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Composed title and body
    pub fn document(&self) -> &CanonicalDocument {
        &self.document
    }

    /// Plain-text preview
    pub fn preview(&self) -> &str {
        self.document.preview()
    }

    /// Suggested download name, without extension
    pub fn file_name(&self) -> String {
        self.kind.file_name(self.fields)
    }

    /// Lay out the composed document
    pub fn layout(&self, stamp: &FooterStamp) -> RenderedDocument {
        Paginator::new(&self.geometry).layout(&self.document, stamp)
    }

    /// Render to PDF bytes
    pub fn to_pdf(&self, stamp: &FooterStamp) -> Result<Vec<u8>> {
        to_pdf_bytes(&self.layout(stamp))
    }

    /// Render to `dir/{file_name}.pdf`
    pub fn export(&self, dir: impl AsRef<Path>, stamp: &FooterStamp) -> Result<PathBuf> {
        export_to_file(&self.layout(stamp), dir, &self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> FooterStamp {
        FooterStamp::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_to_pdf_bytes_header() {
        let fields = FieldValues::with_defaults(TemplateKind::SwornDeclaration);
        let bytes = TemplateRenderer::new(TemplateKind::SwornDeclaration, &fields)
            .to_pdf(&stamp())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_renderer_preview_matches_render() {
        let fields: FieldValues = [("tipoDeclaracion", "generica"), ("textoLibre", "Hola")]
            .into_iter()
            .collect();
        let renderer = TemplateRenderer::new(TemplateKind::SwornDeclaration, &fields);

        assert_eq!(renderer.kind(), TemplateKind::SwornDeclaration);
        assert_eq!(
            renderer.document(),
            &render(TemplateKind::SwornDeclaration, &fields)
        );
        assert!(renderer.preview().contains("Hola"));
        assert_eq!(renderer.file_name(), "declaracion-jurada-documento");
    }

    #[test]
    fn test_with_geometry() {
        let fields = FieldValues::new();
        let mut geometry = PageGeometry::letter();
        geometry.width = 210.0;
        geometry.height = 297.0;

        let rendered = TemplateRenderer::new(TemplateKind::LaborContract, &fields)
            .with_geometry(geometry)
            .layout(&stamp());
        assert_eq!(rendered.geometry.width, 210.0);
        assert_eq!(rendered.pages[0].fragments[0].x, 105.0);
    }
}
