use crate::pdf::images::ExtractOptions;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfpages")]
#[command(about = "Render PDF pages to JPEG images for OCR and reading")]
#[command(version)]
pub struct Cli {
    /// PDF file to render
    pub path: PathBuf,

    /// Pages to extract (e.g., "1-5", "1,3,5", "1-3,7,10-12"). Default: all pages
    #[arg(short, long)]
    pub pages: Option<String>,

    /// Output directory for images
    #[arg(short, long, default_value = "./pdf_images")]
    pub output: PathBuf,

    /// Resolution in DPI. Higher is sharper but larger
    #[arg(long, default_value_t = ExtractOptions::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: u32,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = ExtractOptions::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Pdfium shared library, or a directory containing it
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pub pdfium_lib: Option<PathBuf>,

    /// Print the extraction report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            dpi: self.dpi,
            quality: self.quality,
        }
    }
}
