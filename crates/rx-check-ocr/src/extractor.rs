//! Image-to-text adapter: decode → binarize → recognize.

use std::path::Path;

use image::DynamicImage;

use crate::engine::TextRecognizer;
use crate::preprocess::preprocess;
use crate::OcrResult;

/// Runs the fixed preprocessing step and hands the result to a recognizer.
pub struct TextExtractor<R> {
    recognizer: R,
}

impl<R: TextRecognizer> TextExtractor<R> {
    /// Create a new extractor around an engine.
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Extract text from a decoded image. Engine output is returned as-is.
    pub fn extract_text(&self, image: &DynamicImage) -> OcrResult<String> {
        extract_text(image, &self.recognizer)
    }

    /// Decode JPEG/PNG bytes and extract text.
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> OcrResult<String> {
        let image = image::load_from_memory(bytes)?;
        self.extract_text(&image)
    }

    /// Read an image file and extract text.
    pub fn extract_from_path<P: AsRef<Path>>(&self, path: P) -> OcrResult<String> {
        let bytes = std::fs::read(path)?;
        self.extract_from_bytes(&bytes)
    }

    /// Get the recognizer for direct access.
    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }
}

/// Binarize `image` and run `recognizer` on it.
pub fn extract_text<R: TextRecognizer + ?Sized>(
    image: &DynamicImage,
    recognizer: &R,
) -> OcrResult<String> {
    let binary = preprocess(image);
    let text = recognizer.recognize(&binary)?;
    tracing::debug!(engine = recognizer.name(), chars = text.len(), "Extracted text");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockRecognizer;
    use crate::OcrError;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    /// Recognizer that reports what it was handed.
    struct PixelReporter;

    impl TextRecognizer for PixelReporter {
        fn recognize(&self, image: &GrayImage) -> OcrResult<String> {
            let white = image.pixels().filter(|Luma([p])| *p == 255).count();
            let black = image.pixels().filter(|Luma([p])| *p == 0).count();
            Ok(format!("white={} black={}", white, black))
        }

        fn name(&self) -> &str {
            "reporter"
        }
    }

    fn prescription_image() -> DynamicImage {
        // 10x10 page, one dark row of "ink"
        DynamicImage::ImageRgb8(RgbImage::from_fn(10, 10, |_, y| {
            if y == 4 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        }))
    }

    #[test]
    fn test_recognizer_receives_inverted_binary() {
        let extractor = TextExtractor::new(PixelReporter);
        let text = extractor.extract_text(&prescription_image()).unwrap();
        assert_eq!(text, "white=10 black=90");
    }

    #[test]
    fn test_output_returned_unmodified() {
        let raw = "  Atorvastatin 20mg\n\tdaily  \n\x0c";
        let extractor = TextExtractor::new(MockRecognizer::new(raw));
        assert_eq!(extractor.extract_text(&prescription_image()).unwrap(), raw);
    }

    #[test]
    fn test_extract_from_bytes() {
        let image = prescription_image();
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let extractor = TextExtractor::new(MockRecognizer::new("aspirin 81mg daily"));
        assert_eq!(extractor.extract_from_bytes(&bytes).unwrap(), "aspirin 81mg daily");
    }

    #[test]
    fn test_corrupt_bytes_propagate() {
        let extractor = TextExtractor::new(MockRecognizer::new("unused"));
        let err = extractor.extract_from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, OcrError::Image(_)));
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = TextExtractor::new(MockRecognizer::new("unused"));
        let err = extractor
            .extract_from_path(dir.path().join("missing.png"))
            .unwrap_err();
        assert!(matches!(err, OcrError::Io(_)));
    }

    #[test]
    fn test_dyn_recognizer() {
        let engine: Box<dyn TextRecognizer> = Box::new(MockRecognizer::new("metformin"));
        let text = extract_text(&prescription_image(), engine.as_ref()).unwrap();
        assert_eq!(text, "metformin");
    }
}
