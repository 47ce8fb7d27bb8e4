use crate::error::{ExtractError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output file name for a 1-based page number, e.g. `page_0153.jpg`
pub fn page_file_name(page: u32) -> String {
    format!("page_{:04}.jpg", page)
}

/// Encode `image` as JPEG at `quality` (1-100) into `path`.
/// Returns the number of bytes written.
pub fn write_jpeg<P: AsRef<Path>>(
    image: &RgbImage,
    path: P,
    quality: u8,
    page: u32,
) -> Result<u64> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        ExtractError::page(page, format!("cannot create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
        .encode_image(image)
        .map_err(|e| ExtractError::page(page, format!("JPEG encoding failed: {}", e)))?;

    writer.flush().map_err(|e| {
        ExtractError::page(page, format!("cannot write {}: {}", path.display(), e))
    })?;
    drop(writer);

    let bytes = std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| ExtractError::page(page, e))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_file_name_padding() {
        assert_eq!(page_file_name(1), "page_0001.jpg");
        assert_eq!(page_file_name(153), "page_0153.jpg");
        assert_eq!(page_file_name(12345), "page_12345.jpg");
    }

    #[test]
    fn test_write_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(page_file_name(3));
        let img = RgbImage::from_pixel(40, 30, Rgb([200, 10, 10]));

        let bytes = write_jpeg(&img, &path, 90, 3).unwrap();
        assert_eq!(bytes, std::fs::metadata(&path).unwrap().len());

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_fn(128, 128, |x, y| {
            Rgb([(x * 2) as u8, (y * 2) as u8, ((x ^ y) * 2) as u8])
        });

        let high = write_jpeg(&img, dir.path().join("high.jpg"), 100, 1).unwrap();
        let low = write_jpeg(&img, dir.path().join("low.jpg"), 5, 1).unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_unwritable_path_is_page_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("page_0001.jpg");
        let img = RgbImage::new(4, 4);

        match write_jpeg(&img, &path, 95, 1).unwrap_err() {
            ExtractError::PageRender { page, .. } => assert_eq!(page, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
