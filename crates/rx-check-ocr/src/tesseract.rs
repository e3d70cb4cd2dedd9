//! Tesseract engine via leptess.
//! Only available when compiled with the `tesseract` feature flag.

use image::GrayImage;
use leptess::LepTess;

use crate::engine::{OcrConfig, TextRecognizer};
use crate::preprocess::encode_png;
use crate::{OcrError, OcrResult};

/// Binarized PNGs carry no DPI; Tesseract assumes this instead of warning.
const SOURCE_RESOLUTION: i32 = 300;

/// Tesseract-backed recognizer. A fresh engine is initialized per call.
pub struct TesseractRecognizer {
    config: OcrConfig,
}

impl TesseractRecognizer {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> OcrResult<String> {
        let datapath = match &self.config.tessdata_dir {
            Some(dir) => Some(
                dir.to_str()
                    .ok_or_else(|| OcrError::EngineInit("Invalid tessdata path".into()))?,
            ),
            None => None,
        };

        let mut tess = LepTess::new(datapath, &self.config.language)
            .map_err(|e| OcrError::EngineInit(format!("{e:?}")))?;

        let png = encode_png(image)?;
        tess.set_image_from_mem(&png)
            .map_err(|e| OcrError::Recognition(format!("{e:?}")))?;
        tess.set_source_resolution(SOURCE_RESOLUTION);

        let text = tess
            .get_utf8_text()
            .map_err(|e| OcrError::Recognition(format!("{e:?}")))?;

        tracing::debug!(
            language = %self.config.language,
            chars = text.len(),
            "Tesseract recognition finished"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
