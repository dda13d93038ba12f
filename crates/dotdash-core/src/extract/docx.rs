//! Word-processor (DOCX) paragraph extraction using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::trace;
use zip::ZipArchive;

use crate::error::ExtractError;

/// Main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extract body paragraphs in document order, joined with line breaks.
pub fn extract_docx(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractError::Parse(format!("not a document package: {}", e)))?;

    let mut entry = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::Parse(format!("package has no {}", DOCUMENT_PART)))?;

    let mut xml = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut xml)
        .map_err(|e| ExtractError::Parse(format!("failed to read {}: {}", DOCUMENT_PART, e)))?;

    let paragraphs = parse_paragraphs(&xml)?;
    trace!("Read {} paragraphs from {}", paragraphs.len(), DOCUMENT_PART);
    Ok(paragraphs.join("\n"))
}

/// Collect the text of each top-level body paragraph.
///
/// Paragraphs inside tables and nested text boxes are not body paragraphs.
fn parse_paragraphs(xml: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    let mut in_body = false;
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        buf.clear();
        let collecting = in_body && table_depth == 0 && paragraph_depth == 1;

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"body" => in_body = true,
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" if in_body && table_depth == 0 && paragraph_depth == 0 => {
                    paragraphs.push(String::new());
                }
                b"tab" if collecting && run_depth > 0 => current.push('\t'),
                b"br" | b"cr" if collecting && run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text && collecting => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::Parse(format!("bad text content: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"body" => in_body = false,
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 && in_body && table_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Parse(format!(
                    "malformed {} at byte {}: {}",
                    DOCUMENT_PART,
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}
