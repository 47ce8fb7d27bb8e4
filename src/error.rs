use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid page range token '{token}': {reason}")]
    Parse { token: String, reason: String },

    #[error("PDF file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Failed to open PDF {}: {reason}", path.display())]
    DocumentOpen { path: PathBuf, reason: String },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Page {page}: {reason}")]
    PageRender { page: u32, reason: String },

    #[error("Failed to load Pdfium library: {0}")]
    Library(String),
}

impl ExtractError {
    pub(crate) fn parse(token: &str, reason: impl Into<String>) -> Self {
        ExtractError::Parse {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn page(page: u32, reason: impl ToString) -> Self {
        ExtractError::PageRender {
            page,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
