// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decodes captured photos, caps their size, and converts
// between the `image` crate and the scanner's raw RGBA buffers.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use reportscan_core::error::ReportscanError;
use reportscan_core::{PixelBuffer, RectifiedImage};
use tracing::{debug, info, instrument};

use super::data_url::{decode_data_url, encode_data_url};

/// Image adapter wrapping a single in-memory photo.
///
/// Each transforming method consumes `self` and returns a new
/// `ImageProcessor`, enabling method chaining.
///
/// ```ignore
/// let buffer = ImageProcessor::from_data_url(url)?
///     .downscale_to_max_edge(900)
///     .to_pixel_buffer();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    ///
    /// An EXIF orientation tag is applied, so portrait phone photos come out
    /// upright.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReportscanError> {
        let decode_err = |err: image::ImageError| {
            ReportscanError::ImageError(format!("failed to decode image: {}", err))
        };

        let mut decoder = ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .into_decoder()
            .map_err(decode_err)?;
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let mut img = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
        img.apply_orientation(orientation);

        debug!(
            width = img.width(),
            height = img.height(),
            ?orientation,
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Decode a base64 `data:` URL holding an encoded image.
    #[instrument(skip(url), fields(url_len = url.len()))]
    pub fn from_data_url(url: &str) -> Result<Self, ReportscanError> {
        let parsed = decode_data_url(url)?;
        debug!(mime = %parsed.mime, bytes = parsed.bytes.len(), "Data URL decoded");
        Self::from_bytes(&parsed.bytes)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Wrap a rectifier result.
    pub fn from_rectified(rectified: RectifiedImage) -> Result<Self, ReportscanError> {
        let (width, height, len) = (rectified.width, rectified.height, rectified.data.len());
        let rgba = RgbaImage::from_raw(width, height, rectified.data)
            .ok_or(ReportscanError::InvalidBuffer { width, height, len })?;
        Ok(Self {
            image: DynamicImage::ImageRgba8(rgba),
        })
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Shrink the image so its longer edge is at most `max_edge`, preserving
    /// aspect ratio. Images already within the cap are returned unchanged;
    /// this never upscales. Uses Lanczos3 filtering.
    #[instrument(skip(self))]
    pub fn downscale_to_max_edge(self, max_edge: u32) -> Self {
        match shrink_within(&self.image, max_edge) {
            Some(image) => Self { image },
            None => self,
        }
    }

    /// Borrowing variant of [`downscale_to_max_edge`](Self::downscale_to_max_edge),
    /// for when the full-size image is still needed afterwards.
    #[instrument(skip(self))]
    pub fn downscaled(&self, max_edge: u32) -> Self {
        let image = shrink_within(&self.image, max_edge).unwrap_or_else(|| self.image.clone());
        Self { image }
    }

    // -- Output ---------------------------------------------------------------

    /// Copy the image out as a raw RGBA buffer for the scanner.
    pub fn to_pixel_buffer(&self) -> PixelBuffer {
        let rgba = self.image.to_rgba8();
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw())
    }

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ReportscanError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as a `data:image/png;base64,...` URL.
    pub fn to_png_data_url(&self) -> Result<String, ReportscanError> {
        let png = self.to_png_bytes()?;
        Ok(encode_data_url("image/png", &png))
    }
}

/// Resized copy with the longer edge at `max_edge`, or `None` if already within it.
fn shrink_within(img: &DynamicImage, max_edge: u32) -> Option<DynamicImage> {
    let (w, h) = (img.width(), img.height());
    if max_edge == 0 || w.max(h) <= max_edge {
        return None;
    }
    info!(from_w = w, from_h = h, max_edge, "Downscaling capture");
    let resized = img.resize(max_edge, max_edge, image::imageops::FilterType::Lanczos3);
    debug!(
        new_w = resized.width(),
        new_h = resized.height(),
        "Downscale complete"
    );
    Some(resized)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(
    image: &DynamicImage,
    format: ImageFormat,
) -> Result<Vec<u8>, ReportscanError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(|err| {
        ReportscanError::ImageError(format!("image encoding failed: {}", err))
    })?;
    Ok(buffer)
}
