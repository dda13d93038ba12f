//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, PdfType, Result};
use crate::error::ExtractError;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Concatenated text of all pages.
    pub text: String,
    /// Pages with their content.
    pub pages: Vec<PdfPage>,
    /// Number of image objects in the document.
    pub images: usize,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract all pages without rejecting empty output.
    pub fn extract_all(&self) -> Result<PdfContent> {
        if self.document.is_none() {
            return Err(ExtractError::Extraction("no document loaded".to_string()));
        }

        let page_texts = self.extract_pages()?;
        let images = self.image_count();

        let mut text = String::new();
        let mut pages = Vec::with_capacity(page_texts.len());
        for (index, page_text) in page_texts.into_iter().enumerate() {
            trace!("Page {}: {} chars", index + 1, page_text.len());
            text.push_str(&page_text);
            pages.push(PdfPage {
                number: index as u32 + 1,
                text: page_text,
            });
        }

        let has_text = !text.trim().is_empty();
        let pdf_type = match (has_text, images > 0) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!(
            "PDF analysis: {} pages, {} chars text, {} images -> {:?}",
            pages.len(),
            text.len(),
            images,
            pdf_type
        );

        Ok(PdfContent {
            pdf_type,
            text,
            pages,
            images,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an object is an image XObject stream.
fn is_image_object(object: &Object) -> bool {
    match object {
        Object::Stream(stream) => stream
            .dict
            .get(b"Subtype")
            .and_then(|subtype| subtype.as_name())
            .map(|name| name == b"Image")
            .unwrap_or(false),
        _ => false,
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| ExtractError::Extraction(format!("failed to parse PDF: {}", e)))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ExtractError::Extraction("PDF is encrypted".to_string()));
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads from bytes, so keep the decrypted form
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                ExtractError::Extraction(format!("failed to save decrypted PDF: {}", e))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(ExtractError::Extraction("PDF has no pages".to_string()));
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs
        let data = &self.raw_data;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        match result {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractError::Extraction(e.to_string())),
            Err(_) => Err(ExtractError::Extraction(
                "text extraction panicked (malformed PDF)".to_string(),
            )),
        }
    }

    fn extract_text(&self) -> Result<String> {
        let content = self.extract_all()?;
        if content.text.trim().is_empty() {
            return Err(ExtractError::EmptyContent {
                pages: self.page_count(),
                images: content.images,
            });
        }
        Ok(content.text)
    }

    fn image_count(&self) -> usize {
        self.document
            .as_ref()
            .map(|doc| doc.objects.values().filter(|o| is_image_object(o)).count())
            .unwrap_or(0)
    }
}
