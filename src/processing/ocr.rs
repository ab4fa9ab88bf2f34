use std::io::Write;

use tempfile::NamedTempFile;
use tesseract::{PageSegMode, Tesseract};

use crate::utils::ExtractError;

/// OCR engine configuration, passed explicitly instead of living in
/// process-wide state.
pub struct OcrConfig {
    pub language: String,
    /// Directory holding the trained data files; `None` uses the engine's
    /// compiled-in default.
    pub tessdata_dir: Option<String>,
    /// Raw page segmentation mode number (the engine's `--psm` value).
    /// When `None` the scanner picks a mode suited to the document kind.
    pub page_seg_mode: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tessdata_dir: None,
            page_seg_mode: None,
        }
    }
}

fn page_seg_mode_from_number(psm: u8) -> Option<PageSegMode> {
    match psm {
        0 => Some(PageSegMode::PsmOsdOnly),
        1 => Some(PageSegMode::PsmAutoOsd),
        2 => Some(PageSegMode::PsmAutoOnly),
        3 => Some(PageSegMode::PsmAuto),
        4 => Some(PageSegMode::PsmSingleColumn),
        5 => Some(PageSegMode::PsmSingleBlockVertText),
        6 => Some(PageSegMode::PsmSingleBlock),
        7 => Some(PageSegMode::PsmSingleLine),
        8 => Some(PageSegMode::PsmSingleWord),
        9 => Some(PageSegMode::PsmCircleWord),
        10 => Some(PageSegMode::PsmSingleChar),
        11 => Some(PageSegMode::PsmSparseText),
        12 => Some(PageSegMode::PsmSparseTextOsd),
        13 => Some(PageSegMode::PsmRawLine),
        _ => None,
    }
}

/// Turns a preprocessed document image into best-effort plain text.
pub struct TextSource {
    pub config: OcrConfig,
}

impl TextSource {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Run OCR over image bytes and return the recognized text.
    pub fn read_text(
        &self,
        image_data: &[u8],
        default_mode: PageSegMode,
    ) -> Result<String, ExtractError> {
        // Tesseract wants a file on disk
        let mut temp_file = NamedTempFile::new()
            .map_err(|e| ExtractError::OcrError(format!("Failed to create temp file: {}", e)))?;

        temp_file
            .write_all(image_data)
            .map_err(|e| ExtractError::OcrError(format!("Failed to write to temp file: {}", e)))?;

        let image_path_str = temp_file
            .path()
            .to_str()
            .ok_or_else(|| ExtractError::OcrError("Failed to convert path to string".to_string()))?;

        let mut tess = Tesseract::new(
            self.config.tessdata_dir.as_deref(),
            Some(&self.config.language),
        )
        .map_err(|e| ExtractError::OcrError(format!("Tesseract init error: {}", e)))?;

        let mode = self
            .config
            .page_seg_mode
            .and_then(page_seg_mode_from_number)
            .unwrap_or(default_mode);
        tess.set_page_seg_mode(mode);

        let text = tess
            .set_image(image_path_str)
            .map_err(|e| ExtractError::OcrError(format!("Tesseract set image error: {}", e)))?
            .get_text()
            .map_err(|e| ExtractError::OcrError(format!("Tesseract error: {}", e)))?;

        log::debug!("OCR output:\n{}", text);
        Ok(text)
    }
}
