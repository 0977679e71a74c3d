//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Pattern compilation error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl From<aho_corasick::BuildError> for ScreenerError {
    fn from(err: aho_corasick::BuildError) -> Self {
        ScreenerError::Processing(format!("Failed to build phrase matcher: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_context_wraps_screener_error() {
        let result: Result<()> = Err(ScreenerError::InvalidInput("File has no extension".to_string()));
        let err = result.context("Resume file").unwrap_err();

        assert_eq!(format!("{:#}", err), "Resume file: Invalid input: File has no extension");
        assert!(matches!(
            err.downcast_ref::<ScreenerError>(),
            Some(ScreenerError::InvalidInput(_))
        ));
    }
}
