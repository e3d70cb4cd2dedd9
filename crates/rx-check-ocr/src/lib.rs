//! Prescription image to text.
//!
//! Pipeline: decode → grayscale → Otsu binarize (inverted) → recognize.
//!
//! The recognition engine sits behind [`TextRecognizer`]; Tesseract is
//! available with the `tesseract` feature. The recognized text is returned
//! untouched: nothing here tries to pull a medication, dosage or frequency
//! out of it.

pub mod engine;
pub mod extractor;
pub mod preprocess;
#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use engine::*;
pub use extractor::*;
pub use preprocess::*;

use thiserror::Error;

/// OCR errors.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR engine initialization failed: {0}")]
    EngineInit(String),

    #[error("OCR recognition failed: {0}")]
    Recognition(String),

    #[error("No OCR engine available: {0}")]
    EngineUnavailable(String),
}

pub type OcrResult<T> = Result<T, OcrError>;
