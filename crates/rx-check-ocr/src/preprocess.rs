//! Image preprocessing ahead of recognition.
//!
//! BT.601 grayscale conversion followed by Otsu binarization with inverted polarity:
//! pixels at or below the Otsu level become white (255), the rest black (0),
//! so dark ink on a light prescription ends up as the high-intensity class.
//! Pure Rust, no `imageproc` dependency.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb};
use tracing::debug;

use crate::OcrResult;

/// BT.601 luma weights in 14-bit fixed point (0.299, 0.587, 0.114).
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Grayscale + inverted Otsu threshold in one step.
pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let gray = to_grayscale(image);
    let level = otsu_level(&gray);
    debug!(
        width = gray.width(),
        height = gray.height(),
        level,
        "Binarizing prescription image"
    );
    binarize_inverted(&gray, level)
}

/// BT.601 grayscale, rounded half-up from 14-bit fixed point.
///
/// `DynamicImage::to_luma8` uses Rec.709 weights, which shifts coloured ink
/// (green especially) to a different grey and can move the Otsu split.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        Luma([luma(r, g, b)])
    })
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Otsu's threshold: the level maximizing between-class variance, where the
/// lower class is every intensity `<= level`.
///
/// Returns 0 for empty or single-intensity images.
pub fn otsu_level(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for Luma([p]) in image.pixels() {
        histogram[*p as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }

    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;
    let mut lower_count = 0u64;
    let mut lower_sum = 0.0f64;

    for (level, &count) in histogram.iter().enumerate() {
        lower_count += count;
        if lower_count == 0 {
            continue;
        }
        let upper_count = total - lower_count;
        if upper_count == 0 {
            break;
        }

        lower_sum += level as f64 * count as f64;
        let lower_mean = lower_sum / lower_count as f64;
        let upper_mean = (weighted_total - lower_sum) / upper_count as f64;
        let diff = lower_mean - upper_mean;
        let variance = lower_count as f64 * upper_count as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

/// Pixels `> level` become 0, the rest 255.
pub fn binarize_inverted(image: &GrayImage, level: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([p]) = *image.get_pixel(x, y);
        if p > level {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Encode a grayscale image as PNG bytes for engines that take encoded input.
pub fn encode_png(image: &GrayImage) -> OcrResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
