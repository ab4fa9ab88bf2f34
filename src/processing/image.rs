use crate::models::DocumentKind;
use crate::utils::ExtractError;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{adaptive_threshold, otsu_level, threshold};
use imageproc::filter::median_filter;
use std::io::Cursor;
use std::path::Path;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Open an image file and preprocess it for OCR, returning PNG bytes.
    pub fn load_and_preprocess(
        image_path: &Path,
        kind: DocumentKind,
    ) -> Result<Vec<u8>, ExtractError> {
        let img = image::open(image_path).map_err(|e| {
            ExtractError::ImageLoadError(format!(
                "Failed to open image {}: {}",
                image_path.display(),
                e
            ))
        })?;
        Self::preprocess(&img, kind)
    }

    /// Same as [`load_and_preprocess`](Self::load_and_preprocess) but for an
    /// in-memory image buffer.
    pub fn preprocess_bytes(data: &[u8], kind: DocumentKind) -> Result<Vec<u8>, ExtractError> {
        let img = image::load_from_memory(data)
            .map_err(|e| ExtractError::ImageLoadError(format!("Failed to decode image: {}", e)))?;
        Self::preprocess(&img, kind)
    }

    fn preprocess(img: &DynamicImage, kind: DocumentKind) -> Result<Vec<u8>, ExtractError> {
        let gray = img.to_luma8();

        let processed = match kind {
            // Grayscale plus a mild contrast stretch is enough for the
            // high-contrast print on identity cards
            DocumentKind::IdentityCard => Self::enhance_contrast(&gray),
            // Tax cards have a busy background; global Otsu binarization
            // separates the print cleanly
            DocumentKind::TaxCard => {
                let level = otsu_level(&gray);
                threshold(&gray, level)
            }
            // Licences carry small fonts over holograms: denoise, adaptive
            // threshold, then upscale so the OCR engine sees larger glyphs
            DocumentKind::Licence => Self::prepare_licence(&gray),
        };

        Self::encode_png(&processed)
    }

    fn enhance_contrast(img: &GrayImage) -> GrayImage {
        let mut enhanced = img.clone();
        for pixel in enhanced.pixels_mut() {
            let value = pixel[0];
            pixel[0] = if value < 128 {
                value.saturating_sub(20)
            } else {
                value.saturating_add(20)
            };
        }
        enhanced
    }

    fn prepare_licence(img: &GrayImage) -> GrayImage {
        let blurred = median_filter(img, 1, 1);
        let binarized = adaptive_threshold(&blurred, 10);
        let (w, h) = binarized.dimensions();
        image::imageops::resize(&binarized, w * 2, h * 2, FilterType::CatmullRom)
    }

    fn encode_png(img: &GrayImage) -> Result<Vec<u8>, ExtractError> {
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img.clone())
            .write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .map_err(|e| ExtractError::ImageLoadError(format!("Failed to encode image: {}", e)))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> DynamicImage {
        let mut img = GrayImage::new(32, 32);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            pixel[0] = if x % 2 == 0 { 40 } else { 220 };
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_preprocess_produces_png_for_each_kind() {
        let img = sample_image();
        for kind in [
            DocumentKind::IdentityCard,
            DocumentKind::TaxCard,
            DocumentKind::Licence,
        ] {
            let bytes = ImageProcessor::preprocess(&img, kind).unwrap();
            // PNG magic
            assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
        }
    }

    #[test]
    fn test_unreadable_bytes_are_a_load_failure() {
        let err = ImageProcessor::preprocess_bytes(b"not an image", DocumentKind::IdentityCard)
            .unwrap_err();
        assert!(matches!(err, ExtractError::ImageLoadError(_)));
    }
}
