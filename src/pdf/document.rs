use crate::error::{ExtractError, Result};
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can hand out rendered pages by 1-based page number.
pub trait PageSource {
    fn page_count(&self) -> u32;

    /// Render `page` with `scale` applied to both axes.
    fn render_page(&self, page: u32, scale: f32) -> Result<RgbImage>;
}

/// A bound Pdfium library. Documents borrow from it.
pub struct Renderer {
    pdfium: Pdfium,
}

impl Renderer {
    /// Bind Pdfium from `library` (a file or a directory holding the platform
    /// library) if given, otherwise from the working directory or the system.
    pub fn new(library: Option<&Path>) -> Result<Self> {
        let bindings = match library {
            Some(path) => bind_at(path),
            None => Pdfium::bind_to_library(
                PathBuf::from(".").join(Pdfium::pdfium_platform_library_name()),
            )
            .or_else(|e| {
                debug!("No Pdfium in working directory ({}), trying system library", e);
                Pdfium::bind_to_system_library()
            }),
        }
        .map_err(|e| ExtractError::Library(e.to_string()))?;

        Ok(Renderer {
            pdfium: Pdfium::new(bindings),
        })
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<PdfDocument<'_>> {
        let path = path.as_ref();
        ensure_exists(path)?;

        let doc = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ExtractError::DocumentOpen {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(PdfDocument { doc })
    }
}

/// Fail with `DocumentNotFound` unless `path` exists. Cheap enough to run
/// before binding Pdfium.
pub fn ensure_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExtractError::DocumentNotFound(path.to_path_buf()));
    }
    Ok(())
}

fn bind_at(
    path: &Path,
) -> std::result::Result<Box<dyn PdfiumLibraryBindings>, PdfiumError> {
    let path = if path.is_dir() {
        path.join(Pdfium::pdfium_platform_library_name())
    } else {
        path.to_path_buf()
    };
    debug!("Binding Pdfium from {}", path.display());
    Pdfium::bind_to_library(path)
}

/// An open document. The underlying handle is closed when this is dropped.
pub struct PdfDocument<'a> {
    doc: pdfium_render::prelude::PdfDocument<'a>,
}

impl PageSource for PdfDocument<'_> {
    fn page_count(&self) -> u32 {
        self.doc.pages().len() as u32
    }

    fn render_page(&self, page: u32, scale: f32) -> Result<RgbImage> {
        if page == 0 || page > self.page_count() {
            return Err(ExtractError::page(
                page,
                format!("out of range (1-{})", self.page_count()),
            ));
        }

        let pdf_page = self
            .doc
            .pages()
            .get((page - 1) as PdfPageIndex)
            .map_err(|e| ExtractError::page(page, e))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = pdf_page
            .render_with_config(&config)
            .map_err(|e| ExtractError::page(page, e))?;

        Ok(bitmap.as_image().into_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.pdf");

        match ensure_exists(&missing).unwrap_err() {
            ExtractError::DocumentNotFound(path) => assert_eq!(path, missing),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_existing_document_passes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_exists(file.path()).is_ok());
    }
}
