//! Text recognition engines.

use std::path::PathBuf;

use image::GrayImage;

use crate::{OcrError, OcrResult};

/// Recognizes text in an already-binarized image.
///
/// Implementations return the engine's raw output; callers get it unmodified.
pub trait TextRecognizer: Send + Sync {
    /// Run recognition on a black/white image.
    fn recognize(&self, image: &GrayImage) -> OcrResult<String>;

    /// Short engine name for logs.
    fn name(&self) -> &str;
}

impl<T: TextRecognizer + ?Sized> TextRecognizer for Box<T> {
    fn recognize(&self, image: &GrayImage) -> OcrResult<String> {
        (**self).recognize(image)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrConfig {
    /// Directory holding `*.traineddata`; engine default when `None`
    pub tessdata_dir: Option<PathBuf>,
    /// Recognition language(s), e.g. "eng" or "eng+fra"
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tessdata_dir: None,
            language: "eng".to_string(),
        }
    }
}

/// Build the engine this crate was compiled with.
pub fn default_recognizer(config: &OcrConfig) -> OcrResult<Box<dyn TextRecognizer>> {
    #[cfg(feature = "tesseract")]
    {
        Ok(Box::new(crate::tesseract::TesseractRecognizer::new(config.clone())))
    }

    #[cfg(not(feature = "tesseract"))]
    {
        let _ = config;
        Err(OcrError::EngineUnavailable(
            "built without the `tesseract` feature".into(),
        ))
    }
}

/// Mock recognizer for testing without Tesseract.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    text: String,
}

impl MockRecognizer {
    /// Always answer with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, image: &GrayImage) -> OcrResult<String> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::Recognition("empty image".into()));
        }
        Ok(self.text.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
