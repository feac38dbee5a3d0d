//! Company logo decoding.
//!
//! Logos are stored as `data:image/...;base64,...` URLs or bare base64.
//! Every logo is normalised to JPEG so renderers embed a single kind of
//! image: grayscale and RGB JPEGs pass through untouched, anything else
//! (PNG, GIF, BMP, CMYK JPEG) is decoded, flattened onto white and
//! re-encoded.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::{JpegDecoder, JpegEncoder};
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const REENCODE_QUALITY: u8 = 90;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogoError {
    #[error("logo payload is empty")]
    Empty,
    #[error("unsupported logo media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },
    #[error("logo is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("logo is not a recognised image format")]
    UnknownFormat,
    #[error("logo could not be decoded: {reason}")]
    Decode { reason: String },
    #[error("logo could not be converted to JPEG: {reason}")]
    Encode { reason: String },
}

/// A logo as JPEG bytes, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JpegImage {
    #[serde(skip)]
    pub data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    /// 1 = gray, 3 = RGB.
    pub components: u8,
}

impl JpegImage {
    /// Largest size with the image's aspect ratio that fits the box.
    pub fn fit(&self, box_width: f64, box_height: f64) -> (f64, f64) {
        if self.width_px == 0 || self.height_px == 0 {
            return (box_width, box_height);
        }
        let scale = (box_width / f64::from(self.width_px)).min(box_height / f64::from(self.height_px));
        (f64::from(self.width_px) * scale, f64::from(self.height_px) * scale)
    }
}

pub fn decode_logo(payload: &str) -> Result<JpegImage, LogoError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(LogoError::Empty);
    }
    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, body) = rest.split_once(',').ok_or(LogoError::UnknownFormat)?;
            let media_type = header.split(';').next().unwrap_or_default().to_ascii_lowercase();
            if !media_type.starts_with("image/") {
                return Err(LogoError::UnsupportedMediaType { media_type });
            }
            body
        }
        None => payload,
    };
    let compact: String = encoded.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
    let data = STANDARD.decode(compact)?;
    let format = image::guess_format(&data).map_err(|_| LogoError::UnknownFormat)?;

    if format == ImageFormat::Jpeg
        && let Some(image) = pass_through(&data)?
    {
        return Ok(image);
    }
    let decoded = image::load_from_memory_with_format(&data, format).map_err(decode_error)?;
    debug!(?format, width = decoded.width(), height = decoded.height(), "re-encoding logo as JPEG");
    reencode(&decoded)
}

/// Keeps a JPEG as-is when a PDF reader can use its colour space directly.
fn pass_through(data: &[u8]) -> Result<Option<JpegImage>, LogoError> {
    let decoder = JpegDecoder::new(Cursor::new(data)).map_err(decode_error)?;
    let (width_px, height_px) = decoder.dimensions();
    let components = match decoder.original_color_type() {
        ExtendedColorType::L8 => 1,
        ExtendedColorType::Rgb8 => 3,
        _ => return Ok(None),
    };
    Ok(Some(JpegImage {
        data: data.to_vec(),
        width_px,
        height_px,
        components,
    }))
}

fn reencode(decoded: &DynamicImage) -> Result<JpegImage, LogoError> {
    let rgba = decoded.to_rgba8();
    let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u16::from(a);
        let over_white = |channel: u8| ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    });
    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, REENCODE_QUALITY)
        .encode_image(&flattened)
        .map_err(|error| LogoError::Encode {
            reason: error.to_string(),
        })?;
    Ok(JpegImage {
        data,
        width_px: flattened.width(),
        height_px: flattened.height(),
        components: 3,
    })
}

fn decode_error(error: image::ImageError) -> LogoError {
    LogoError::Decode {
        reason: error.to_string(),
    }
}
