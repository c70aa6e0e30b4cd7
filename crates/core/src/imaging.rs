//! Upload image conversion: decode JPEG/PNG/WebP and re-encode as WebP,
//! downscaling oversized images.
//!
//! | Step     | Crate / function |
//! |----------|------------------|
//! | Sniff    | `image::guess_format` (magic bytes, not the file name) |
//! | Decode   | `image::ImageReader` with `Limits` on source size and allocation |
//! | Resize   | `DynamicImage::resize` with `Lanczos3`, aspect preserved |
//! | Encode   | `DynamicImage::write_to(.., ImageFormat::WebP)` (lossless) |

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, ImageReader, Limits};

/// Formats accepted for upload.
const ACCEPTED_FORMATS: &[(ImageFormat, &str)] = &[
    (ImageFormat::Jpeg, "jpeg"),
    (ImageFormat::Png, "png"),
    (ImageFormat::WebP, "webp"),
];

/// Default per-file upload limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default longest edge after conversion.
pub const DEFAULT_MAX_DIMENSION: u32 = 2560;

/// Default longest edge a source image may declare before decoding.
pub const DEFAULT_MAX_SOURCE_DIMENSION: u32 = 10_000;

/// Upper bound on decoder allocations for one file (256 MiB).
const MAX_DECODE_ALLOC: u64 = 256 * 1024 * 1024;

/// Extension of every stored upload.
pub const OUTPUT_EXTENSION: &str = "webp";

#[derive(Debug, thiserror::Error)]
pub enum ImageConversionError {
    #[error("{0} is empty")]
    Empty(String),

    #[error("{name} is {size} bytes; the limit is {max} bytes")]
    TooLarge { name: String, size: usize, max: usize },

    #[error("{name} is not a supported image (accepted: JPEG, PNG, WebP)")]
    UnsupportedFormat { name: String },

    #[error("{name} is larger than {max}x{max} pixels")]
    DimensionsTooLarge { name: String, max: u32 },

    #[error("Failed to decode {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Failed to encode {name} as WebP: {reason}")]
    Encode { name: String, reason: String },
}

#[derive(Debug, Clone, Copy)]
pub struct ConversionOptions {
    pub max_bytes: usize,
    pub max_dimension: u32,
    /// Source images declaring a larger width or height are rejected
    /// before any pixel buffer is allocated.
    pub max_source_dimension: u32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_source_dimension: DEFAULT_MAX_SOURCE_DIMENSION,
        }
    }
}

/// A converted upload, ready to be written to storage.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub original_format: &'static str,
    pub original_size: usize,
}

impl ConvertedImage {
    pub fn converted_size(&self) -> usize {
        self.bytes.len()
    }
}

/// Convert one uploaded file. `name` is only used in error messages.
pub fn convert_to_webp(
    name: &str,
    data: &[u8],
    options: &ConversionOptions,
) -> Result<ConvertedImage, ImageConversionError> {
    if data.is_empty() {
        return Err(ImageConversionError::Empty(name.to_string()));
    }
    if data.len() > options.max_bytes {
        return Err(ImageConversionError::TooLarge {
            name: name.to_string(),
            size: data.len(),
            max: options.max_bytes,
        });
    }

    let unsupported = || ImageConversionError::UnsupportedFormat {
        name: name.to_string(),
    };
    let format = image::guess_format(data).map_err(|_| unsupported())?;
    let format_name = ACCEPTED_FORMATS
        .iter()
        .find(|(f, _)| *f == format)
        .map(|(_, n)| *n)
        .ok_or_else(unsupported)?;

    let decoded = decode_limited(data, format, options.max_source_dimension).map_err(|e| match e {
        ImageError::Limits(_) => ImageConversionError::DimensionsTooLarge {
            name: name.to_string(),
            max: options.max_source_dimension,
        },
        other => ImageConversionError::Decode {
            name: name.to_string(),
            reason: other.to_string(),
        },
    })?;

    let resized = fit_within(decoded, options.max_dimension);
    let (width, height) = resized.dimensions();

    // The WebP encoder only takes 8-bit RGB(A).
    let encodable = if resized.color().has_alpha() {
        DynamicImage::ImageRgba8(resized.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    };

    let mut out = Cursor::new(Vec::new());
    encodable
        .write_to(&mut out, ImageFormat::WebP)
        .map_err(|e| ImageConversionError::Encode {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

    Ok(ConvertedImage {
        bytes: out.into_inner(),
        width,
        height,
        original_format: format_name,
        original_size: data.len(),
    })
}

fn decode_limited(
    data: &[u8],
    format: ImageFormat,
    max_source_dimension: u32,
) -> Result<DynamicImage, ImageError> {
    let mut limits = Limits::default();
    limits.max_image_width = Some(max_source_dimension);
    limits.max_image_height = Some(max_source_dimension);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);

    let mut reader = ImageReader::with_format(Cursor::new(data), format);
    reader.limits(limits);
    reader.decode()
}

/// Downscale so the longest edge is at most `max_dimension`. Smaller images
/// are returned unchanged.
fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if max_dimension == 0 || (w <= max_dimension && h <= max_dimension) {
        return img;
    }
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use image::{ImageBuffer, Rgb, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 120, 40]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .expect("png encode");
        out.into_inner()
    }

    fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    #[test]
    fn png_becomes_webp() {
        let converted = convert_to_webp("site.png", &png_bytes(8, 6), &ConversionOptions::default())
            .expect("conversion succeeds");
        assert!(is_webp(&converted.bytes));
        assert_eq!((converted.width, converted.height), (8, 6));
        assert_eq!(converted.original_format, "png");
    }

    #[test]
    fn transparent_png_keeps_alpha_channel() {
        let img = ImageBuffer::from_pixel(4, 4, Rgba([0u8, 0, 0, 0]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        let converted =
            convert_to_webp("logo.png", &buf.into_inner(), &ConversionOptions::default()).unwrap();
        assert!(is_webp(&converted.bytes));
    }

    #[test]
    fn oversized_image_is_downscaled_preserving_aspect() {
        let options = ConversionOptions {
            max_dimension: 10,
            ..ConversionOptions::default()
        };
        let converted = convert_to_webp("wide.png", &png_bytes(40, 20), &options).unwrap();
        assert_eq!((converted.width, converted.height), (10, 5));
    }

    #[test]
    fn garbage_is_rejected() {
        let result = convert_to_webp("notes.txt", b"definitely not an image", &ConversionOptions::default());
        assert_matches!(result, Err(ImageConversionError::UnsupportedFormat { .. }));
    }

    #[test]
    fn empty_and_too_large_are_rejected() {
        assert_matches!(
            convert_to_webp("empty.jpg", &[], &ConversionOptions::default()),
            Err(ImageConversionError::Empty(_))
        );
        let options = ConversionOptions {
            max_bytes: 16,
            ..ConversionOptions::default()
        };
        assert_matches!(
            convert_to_webp("big.png", &png_bytes(8, 8), &options),
            Err(ImageConversionError::TooLarge { .. })
        );
    }

    #[test]
    fn source_larger_than_limit_is_rejected_before_decoding() {
        let options = ConversionOptions {
            max_source_dimension: 16,
            ..ConversionOptions::default()
        };
        assert_matches!(
            convert_to_webp("huge.png", &png_bytes(32, 8), &options),
            Err(ImageConversionError::DimensionsTooLarge { max: 16, .. })
        );
        assert!(convert_to_webp("ok.png", &png_bytes(16, 16), &options).is_ok());
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let mut bytes = png_bytes(16, 16);
        bytes.truncate(40);
        assert_matches!(
            convert_to_webp("broken.png", &bytes, &ConversionOptions::default()),
            Err(ImageConversionError::Decode { .. })
        );
    }
}
