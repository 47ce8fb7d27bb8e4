use crate::page_range::parse_page_set;
use crate::pdf::images::{extract, ExtractOptions, ExtractReport};
use crate::pdf::document::ensure_exists;
use crate::pdf::Renderer;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: Option<&str>,
    output_dir: Q,
    options: &ExtractOptions,
    pdfium_lib: Option<&Path>,
    json: bool,
) -> Result<()> {
    let page_set = pages
        .map(parse_page_set)
        .transpose()
        .with_context(|| format!("Invalid page range: {}", pages.unwrap_or_default()))?;

    ensure_exists(&input)?;
    let renderer = Renderer::new(pdfium_lib)?;
    let report = extract(&renderer, &input, &output_dir, page_set.as_ref(), options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &ExtractReport) {
    println!(
        "Extracted {} page(s) to {}",
        report.written_count(),
        report.output_dir.display()
    );

    if report.failed_count() > 0 {
        println!("{} page(s) failed:", report.failed_count());
        for (page, reason) in report.failed() {
            println!("  page {}: {}", page, reason);
        }
    }

    if !report.skipped.is_empty() {
        println!(
            "Skipped {} page(s) outside 1-{}: {}",
            report.skipped.len(),
            report.total_pages,
            report.skipped
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn test_missing_pdf_reported_before_loading_pdfium() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        let bogus_lib = dir.path().join("no-such-libpdfium.so");

        let err = run(
            &missing,
            None,
            dir.path().join("out"),
            &ExtractOptions::default(),
            Some(bogus_lib.as_path()),
            false,
        )
        .unwrap_err();

        match err.downcast_ref::<ExtractError>() {
            Some(ExtractError::DocumentNotFound(path)) => assert_eq!(path, &missing),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_bad_page_range_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            dir.path().join("book.pdf"),
            Some("1-x"),
            dir.path().join("out"),
            &ExtractOptions::default(),
            None,
            false,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::Parse { .. })
        ));
    }
}
