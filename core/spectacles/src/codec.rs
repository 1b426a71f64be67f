use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GrayImage, ImageEncoder, RgbImage, RgbaImage};

use crate::error::SpectaclesError;

/// Output image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,

    /// JPEG encoding.
    Jpeg,
}

impl OutputFormat {
    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// Decode input bytes into a `DynamicImage`.
///
/// Animated formats yield their first frame.
pub fn decode_image(input: &[u8]) -> Result<DynamicImage, SpectaclesError> {
    image::load_from_memory(input).map_err(|e| SpectaclesError::DecodeError(e.to_string()))
}

/// Decode input bytes into a single static 8-bit RGB frame.
pub fn decode_rgb(input: &[u8]) -> Result<RgbImage, SpectaclesError> {
    let decoded = decode_image(input)?;
    normalize(&decoded)
}

/// Normalize any decoded image (palette, 16-bit, alpha, gray) to 8-bit RGB.
pub fn normalize(image: &DynamicImage) -> Result<RgbImage, SpectaclesError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(SpectaclesError::ZeroDimensions);
    }
    if image.color().has_alpha() {
        Ok(flatten_alpha(image))
    } else {
        Ok(image.to_rgb8())
    }
}

/// Flatten alpha channel by compositing onto a white background.
pub(crate) fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    let rgba: RgbaImage = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let out_r = (r as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        let out_g = (g as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        let out_b = (b as f32 * alpha + 255.0 * inv_alpha).round() as u8;
        rgb.put_pixel(x, y, image::Rgb([out_r, out_g, out_b]));
    }

    rgb
}

/// Luma conversion handed to the detectors.
pub(crate) fn to_gray(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Encode an RGB image. `quality` (0.0–1.0) only applies to JPEG.
pub fn encode_image(
    image: &RgbImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, SpectaclesError> {
    let mut buffer = Vec::new();

    match format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut buffer);
            encoder
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| SpectaclesError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Jpeg => {
            let quality_percent = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_percent);
            encoder
                .write_image(
                    image.as_raw(),
                    image.width(),
                    image.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| SpectaclesError::EncodeError(e.to_string()))?;
        }
    }

    Ok(buffer)
}
