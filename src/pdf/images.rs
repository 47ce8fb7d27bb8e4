use crate::error::{ExtractError, Result};
use crate::page_range::PageSet;
use crate::pdf::document::{PageSource, Renderer};
use crate::pdf::jpeg::{page_file_name, write_jpeg};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// PDF user space is defined at 72 points per inch.
const PDF_POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub dpi: u32,
    pub quality: u8,
}

impl ExtractOptions {
    pub const DEFAULT_DPI: u32 = 200;
    pub const DEFAULT_QUALITY: u8 = 95;

    pub fn scale(&self) -> f32 {
        self.dpi as f32 / PDF_POINTS_PER_INCH
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            dpi: Self::DEFAULT_DPI,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenPage {
    pub page: u32,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    Written(WrittenPage),
    Failed { page: u32, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractReport {
    pub source: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub total_pages: u32,
    /// Requested pages outside the document
    pub skipped: PageSet,
    pub outcomes: Vec<PageOutcome>,
}

impl ExtractReport {
    pub fn written_paths(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PageOutcome::Written(w) => Some(w.path.as_path()),
                PageOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn written_count(&self) -> usize {
        self.written_paths().len()
    }

    pub fn failed(&self) -> impl Iterator<Item = (u32, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            PageOutcome::Failed { page, reason } => Some((*page, reason.as_str())),
            PageOutcome::Written(_) => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }
}

/// Open `pdf_path` and write the requested pages (all when `pages` is `None`)
/// as JPEG files under `output_dir`.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    renderer: &Renderer,
    pdf_path: P,
    output_dir: Q,
    pages: Option<&PageSet>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let pdf_path = pdf_path.as_ref();
    info!("Opening PDF: {}", pdf_path.display());
    let doc = renderer.open(pdf_path)?;

    let mut report = extract_from_source(&doc, output_dir, pages, options)?;
    report.source = Some(pdf_path.to_path_buf());
    Ok(report)
}

pub fn extract_from_source<S: PageSource, Q: AsRef<Path>>(
    source: &S,
    output_dir: Q,
    pages: Option<&PageSet>,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    let output_dir = output_dir.as_ref();
    let total_pages = source.page_count();
    info!("Total pages in PDF: {}", total_pages);

    let (page_list, skipped) = match pages {
        None => {
            info!("Extracting all pages (1-{})", total_pages);
            ((1..=total_pages).collect::<Vec<_>>(), PageSet::default())
        }
        Some(requested) => {
            let resolved = requested.resolve(total_pages);
            if !resolved.skipped.is_empty() {
                warn!(
                    "Skipping pages outside 1-{}: {}",
                    total_pages, resolved.skipped
                );
            }
            info!(
                "Extracting {} page(s): {}",
                resolved.pages.len(),
                PageSet::from_pages(resolved.pages.iter().copied())
            );
            (resolved.pages, resolved.skipped)
        }
    };

    std::fs::create_dir_all(output_dir).map_err(|e| ExtractError::OutputDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    info!("Output directory: {}", output_dir.display());

    let scale = options.scale();
    let mut outcomes = Vec::with_capacity(page_list.len());

    for page in page_list {
        match extract_page(source, page, scale, output_dir, options.quality) {
            Ok(written) => {
                info!(
                    "Page {}/{}: {}x{}px, {:.1}KB",
                    page,
                    total_pages,
                    written.width,
                    written.height,
                    written.bytes as f64 / 1024.0
                );
                outcomes.push(PageOutcome::Written(written));
            }
            Err(e) => {
                error!("Page {}/{} failed: {}", page, total_pages, e);
                outcomes.push(PageOutcome::Failed {
                    page,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ExtractReport {
        source: None,
        output_dir: output_dir.to_path_buf(),
        total_pages,
        skipped,
        outcomes,
    })
}

fn extract_page<S: PageSource>(
    source: &S,
    page: u32,
    scale: f32,
    output_dir: &Path,
    quality: u8,
) -> Result<WrittenPage> {
    let image = source.render_page(page, scale)?;
    let path = output_dir.join(page_file_name(page));
    let bytes = write_jpeg(&image, &path, quality, page)?;

    Ok(WrittenPage {
        page,
        path,
        width: image.width(),
        height: image.height(),
        bytes,
    })
}
