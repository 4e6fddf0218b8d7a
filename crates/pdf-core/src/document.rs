//! PDF Document wrapper

use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result, StandardFont};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::{BTreeMap, HashMap};

/// PDF Document wrapper providing high-level operations
///
/// Coordinates passed to [`PdfDocument::insert_text`] are in points with the
/// origin at the top-left corner of the page.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Page objects in page order
    page_ids: Vec<ObjectId>,
    /// Info dictionary, once written
    info_id: Option<ObjectId>,
    /// Page width in points (for new pages)
    page_width: f64,
    /// Page height in points (for new pages)
    page_height: f64,
    /// Current font face
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Font dictionaries already added to the document
    embedded_fonts: HashMap<StandardFont, ObjectId>,
    /// Page font resources (page number -> font -> resource name)
    page_font_resources: HashMap<usize, HashMap<StandardFont, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: BTreeMap<usize, Vec<u8>>,
    /// Document title for the Info dictionary
    title: Option<String>,
    /// Producer for the Info dictionary
    producer: Option<String>,
}

impl PdfDocument {
    /// Create an empty document whose pages measure `page_width` x `page_height` points
    ///
    /// The document starts without pages; call [`PdfDocument::add_blank_page`].
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new(612.0, 792.0); // US Letter portrait
    /// let page = doc.add_blank_page()?;
    /// assert_eq!(page, 1);
    /// ```
    pub fn new(page_width: f64, page_height: f64) -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            info_id: None,
            page_width,
            page_height,
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: BTreeMap::new(),
            title: None,
            producer: None,
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Set the Title and Producer written to the document Info dictionary
    pub fn set_info(&mut self, title: &str, producer: &str) {
        self.title = Some(title.to_string());
        self.producer = Some(producer.to_string());
    }

    /// Set the current font face and size
    ///
    /// # Arguments
    /// * `font` - Standard font face
    /// * `size` - Font size in points
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points (alignment anchor)
    /// * `y` - Y coordinate in points (baseline, from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Nothing to draw
        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font;
        let font_resource_name = self.get_or_create_font_ref(font, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width: self.get_text_width(text),
        };

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let pdf_y = self.page_height - y;

        let operators = generate_text_operators(&font.encode_text_hex(text), x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Add a blank page at the end of the document
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> Result<usize> {
        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (self.page_width as f32).into(),
                (self.page_height as f32).into(),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        };
        let new_page_id = self.inner.add_object(page_dict);

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;

        let kids = pages_dict
            .get_mut(b"Kids")
            .map_err(|_| PdfError::ParseError("Pages object missing Kids array".to_string()))?
            .as_array_mut()
            .map_err(|_| PdfError::ParseError("Kids is not an array".to_string()))?;
        kids.push(Object::Reference(new_page_id));
        let count = kids.len();

        pages_dict.set("Count", count as i64);
        self.page_ids.push(new_page_id);

        Ok(count)
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        // 1. Flush buffered content streams to pages
        self.flush_content_buffers()?;

        // 2. Add font dictionaries and page font resources
        self.embed_fonts()?;

        // 3. Document metadata
        self.write_info();

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        tracing::debug!(
            pages = self.page_count(),
            bytes = buffer.len(),
            "serialized PDF document"
        );

        Ok(buffer)
    }

    /// Get or create a font reference for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams
    fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(&font) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;

        // Added to the page Resources at save time
        page_resources.insert(font, resource_name.clone());

        resource_name
    }

    /// Add a font dictionary for every face used on any page
    fn embed_fonts(&mut self) -> Result<()> {
        let mut used: Vec<StandardFont> = self
            .page_font_resources
            .values()
            .flat_map(|fonts| fonts.keys().copied())
            .collect();
        used.sort_by_key(|font| font.base_font());
        used.dedup();

        for font in used {
            if !self.embedded_fonts.contains_key(&font) {
                let font_id = self.inner.add_object(font.to_pdf_dictionary());
                self.embedded_fonts.insert(font, font_id);
            }
        }

        self.finalize_page_font_resources()
    }

    /// Add font references to page resources after all fonts are known
    fn finalize_page_font_resources(&mut self) -> Result<()> {
        let page_resources: Vec<(usize, Vec<(StandardFont, String)>)> = self
            .page_font_resources
            .iter()
            .map(|(&page, fonts)| {
                let font_list: Vec<_> = fonts
                    .iter()
                    .map(|(font, resource_name)| (*font, resource_name.clone()))
                    .collect();
                (page, font_list)
            })
            .collect();

        for (page, fonts) in page_resources {
            if !fonts.is_empty() {
                self.add_fonts_to_page_resources(page, &fonts)?;
            }
        }

        Ok(())
    }

    /// Add multiple fonts to a page's Resources dictionary in a single operation
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &[(StandardFont, String)],
    ) -> Result<()> {
        let page_id = self.page_id(page)?;

        let mut new_font_dict = Dictionary::new();
        for (font, resource_name) in fonts {
            let font_ref = self.embedded_fonts.get(font).ok_or_else(|| {
                PdfError::SaveError(format!("Font {} was not added", font.base_font()))
            })?;
            new_font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
        }

        let page_dict = self
            .inner
            .get_object_mut(page_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => resources.as_dict().cloned().unwrap_or_default(),
            Err(_) => Dictionary::new(),
        };
        resources_dict.set("Font", Object::Dictionary(new_font_dict));
        page_dict.set("Resources", Object::Dictionary(resources_dict));

        Ok(())
    }

    /// Write or refresh the Info dictionary
    fn write_info(&mut self) {
        if self.title.is_none() && self.producer.is_none() {
            return;
        }

        let mut info = Dictionary::new();
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        if let Some(producer) = &self.producer {
            info.set("Producer", text_string(producer));
        }

        match self.info_id {
            Some(id) => {
                self.inner.objects.insert(id, Object::Dictionary(info));
            }
            None => {
                let id = self.inner.add_object(info);
                self.inner.trailer.set("Info", id);
                self.info_id = Some(id);
            }
        }
    }

    /// Object id of a page (1-indexed)
    fn page_id(&self, page: usize) -> Result<ObjectId> {
        page.checked_sub(1)
            .and_then(|index| self.page_ids.get(index))
            .copied()
            .ok_or(PdfError::InvalidPage(page, self.page_ids.len()))
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content to page streams
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers = std::mem::take(&mut self.page_content_buffer);

        for (page, content) in buffers {
            if !content.is_empty() {
                self.append_to_content_stream(page, &content)?;
            }
        }

        Ok(())
    }

    /// Append content to a page's content stream
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let page_id = self.page_id(page)?;

        let contents_id = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?
            .get(b"Contents")
            .and_then(Object::as_reference)
            .map_err(|_| PdfError::ParseError("Page has no content stream".to_string()))?;

        let stream = self
            .inner
            .get_object_mut(contents_id)?
            .as_stream_mut()
            .map_err(|_| PdfError::ParseError("Contents is not a stream".to_string()))?;

        let mut new_content = stream.content.clone();
        new_content.extend_from_slice(content);
        stream.set_content(new_content);

        Ok(())
    }
}

/// Encode a PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
