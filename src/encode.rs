use crate::error::{Result, TaggerError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};

/// Largest width or height a baseline JPEG frame header can carry.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// Encode an image as JPEG at the given quality (1-100).
///
/// Alpha is dropped; JPEG has no transparency.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(TaggerError::Encoding(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }
    if width > MAX_JPEG_DIMENSION || height > MAX_JPEG_DIMENSION {
        return Err(TaggerError::Encoding(format!(
            "{}x{} exceeds the JPEG limit of {} pixels per side",
            width, height, MAX_JPEG_DIMENSION
        )));
    }

    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode(
        rgb.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

/// Decode an image from encoded bytes in any format the `image` crate reads.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| TaggerError::Encoding(format!("Cannot decode image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_produces_jpeg_markers() {
        let jpeg = encode_jpeg(&gradient(32, 24), 50).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_roundtrip_dimensions() {
        let jpeg = encode_jpeg(&gradient(40, 10), 50).unwrap();
        let back = decode(&jpeg).unwrap();
        assert_eq!((back.width(), back.height()), (40, 10));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([200, 10, 10, 0])));
        assert!(encode_jpeg(&rgba, 50).is_ok());
    }

    #[test]
    fn test_empty_image_fails() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            encode_jpeg(&empty, 50),
            Err(TaggerError::Encoding(_))
        ));
    }

    #[test]
    fn test_oversized_image_fails() {
        let wide = DynamicImage::ImageRgb8(RgbImage::new(MAX_JPEG_DIMENSION + 1, 1));
        assert!(matches!(encode_jpeg(&wide, 50), Err(TaggerError::Encoding(_))));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(TaggerError::Encoding(_))
        ));
    }
}
