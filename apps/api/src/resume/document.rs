//! Raw text extraction from uploaded resume documents (PDF and DOCX).

use std::io::{Cursor, Read};

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Picks the parser from the file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            DocumentKind::Pdf => {
                "No text extracted from PDF. The file might be image-based or corrupted."
            }
            DocumentKind::Docx => {
                "No text extracted from DOCX. The file might be empty or corrupted."
            }
        }
    }
}

/// Extracts plain text from an uploaded resume.
///
/// Parsing is CPU-bound and `pdf-extract` can panic on malformed input, so it
/// runs on the blocking pool and a panic is reported as an extraction error.
pub async fn extract_document_text(filename: &str, content: Bytes) -> Result<String, AppError> {
    let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
        AppError::Validation(
            "Unsupported file format. Only PDF and DOCX files are supported.".to_string(),
        )
    })?;

    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf_text(&content),
        DocumentKind::Docx => docx_text(&content),
    })
    .await
    .map_err(|e| AppError::Extraction(format!("Document parser crashed: {e}")))?
    .map_err(|e| AppError::Extraction(format!("Could not read {filename}: {e:#}")))?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(kind.empty_message().to_string()));
    }

    Ok(text)
}

fn pdf_text(content: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(content).map_err(|e| anyhow!("invalid PDF: {e}"))
}

/// Reads the main body part of a DOCX package. Each `w:p` paragraph becomes a
/// line; `w:tab` and `w:br` are kept as whitespace.
pub fn docx_text(content: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(content)).context("not a DOCX (zip) package")?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .with_context(|| format!("missing {DOCX_BODY_PART}"))?
        .read_to_string(&mut xml)
        .context("document body is not valid UTF-8")?;

    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event().context("malformed document XML")? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                out.push_str(&t.unescape().context("bad XML escape")?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
