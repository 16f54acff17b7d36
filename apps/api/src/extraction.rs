//! Uploaded document → raw text. Runs before the matcher ever sees a query.

use crate::errors::AppError;

/// Only PDF uploads are accepted, judged by file name.
pub fn ensure_pdf_file_name(file_name: &str) -> Result<(), AppError> {
    if file_name.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(
            "Unsupported file type. Please upload a PDF file.".to_string(),
        ))
    }
}

/// Extracts all page text from a PDF. Parsing is CPU-bound, so it runs on the
/// blocking pool. Empty extracted text is rejected.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                // The parser panics on some malformed documents.
                AppError::Extraction("the document could not be parsed".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    ensure_text_extracted(text)
}

fn ensure_text_extracted(text: String) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from the PDF.".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_names_accepted_case_insensitively() {
        assert!(ensure_pdf_file_name("resume.pdf").is_ok());
        assert!(ensure_pdf_file_name("Resume.PDF").is_ok());
    }

    #[test]
    fn test_other_extensions_rejected() {
        for name in ["resume.docx", "resume.pdf.txt", "resume", ""] {
            assert!(matches!(
                ensure_pdf_file_name(name),
                Err(AppError::UnsupportedMediaType(_))
            ));
        }
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(matches!(
            ensure_text_extracted(" \n\t".to_string()),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            ensure_text_extracted("Python developer".to_string()).unwrap(),
            "Python developer"
        );
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_extraction() {
        let result = extract_pdf_text(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
