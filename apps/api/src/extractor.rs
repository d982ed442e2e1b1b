//! Plain-text extraction from uploaded résumé files.

use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("could not extract text: {0}")]
    ExtractionFailed(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(_) => AppError::Validation(err.to_string()),
            ExtractError::ExtractionFailed(msg) => AppError::Extraction(msg),
        }
    }
}

/// Extracts plain text from a résumé blob, dispatching on the file extension.
///
/// PDF, Word (.docx) and plain-text uploads are supported. Legacy binary
/// .doc files are reported as unsupported rather than silently mangled.
pub fn extract_text(filename: &str, data: &[u8]) -> Result<String, ExtractError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| ExtractError::UnsupportedFormat("file has no extension".to_string()))?;

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractError::ExtractionFailed(e.to_string())),
        "docx" => extract_docx_text(data),
        "txt" => String::from_utf8(data.to_vec())
            .map_err(|_| ExtractError::ExtractionFailed("file is not valid UTF-8".to_string())),
        other => Err(ExtractError::UnsupportedFormat(other.to_string())),
    }
}

/// One line of output per document paragraph; tables and headers are skipped.
fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let docx =
        docx_rs::read_docx(data).map_err(|e| ExtractError::ExtractionFailed(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            text.push_str(&paragraph.raw_text());
            text.push('\n');
        }
    }
    Ok(text)
}
