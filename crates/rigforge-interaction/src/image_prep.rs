//! Compresses captured frames before they are sent for identification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::GenericImageView;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

use rigforge_core::gateway::EncodedImage;

/// Frames wider than this are scaled down, keeping the aspect ratio.
pub const MAX_WIDTH: u32 = 640;
pub const JPEG_QUALITY: u8 = 70;

#[derive(Error, Debug)]
pub enum ImagePrepError {
    #[error("could not decode captured image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode image as JPEG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decodes `bytes`, downscales to [`MAX_WIDTH`] and re-encodes as JPEG.
pub fn prepare_frame(bytes: &[u8]) -> Result<EncodedImage, ImagePrepError> {
    let decoded = image::load_from_memory(bytes).map_err(ImagePrepError::Decode)?;
    let (width, height) = decoded.dimensions();

    let resized = if width > MAX_WIDTH {
        let scaled_height = ((u64::from(height) * u64::from(MAX_WIDTH)) / u64::from(width)).max(1);
        decoded.resize_exact(MAX_WIDTH, scaled_height as u32, FilterType::Triangle)
    } else {
        decoded
    };

    let rgb = resized.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(ImagePrepError::Encode)?;

    Ok(EncodedImage {
        mime_type: "image/jpeg".to_string(),
        data: BASE64_STANDARD.encode(&jpeg),
        width: rgb.width(),
        height: rgb.height(),
    })
}
