//! JPEG thumbnail helpers.
//!
//! Item images are stored as opaque JPEG blobs. This module converts between
//! decoded images and those blobs, scales picked images down to thumbnail
//! size, and provides the [`Placeholder`] written when an item has no image.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};

use crate::error::Result;

/// JPEG quality used for every stored image.
pub const JPEG_QUALITY: u8 = 100;

/// Default longest edge, in pixels, of stored thumbnails.
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 96;

/// Encodes `image` as a JPEG blob. Any alpha channel is dropped.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
    }
    Ok(out)
}

/// Decodes a stored blob back into an image.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Reads an image file, scales it down to fit within `max_edge` on both
/// sides (preserving aspect ratio), and returns it JPEG-encoded. Images that
/// already fit are not enlarged.
pub fn load_thumbnail(path: impl AsRef<Path>, max_edge: u32) -> Result<Vec<u8>> {
    let image = image::open(path)?;
    let edge = max_edge.max(1);
    if image.width() <= edge && image.height() <= edge {
        return encode_jpeg(&image);
    }
    encode_jpeg(&image.thumbnail(edge, edge))
}

/// Fixed image bytes substituted when a write carries no image.
///
/// # Examples
///
/// ```
/// use inventory_core::Placeholder;
///
/// let a = Placeholder::builtin(64).unwrap();
/// let b = Placeholder::builtin(64).unwrap();
/// assert_eq!(a.bytes(), b.bytes());
/// assert!(!a.bytes().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    bytes: Vec<u8>,
}

impl Placeholder {
    /// Renders the built-in placeholder: a light grey square with a darker
    /// frame and diagonal, `edge` pixels on a side.
    pub fn builtin(edge: u32) -> Result<Self> {
        let edge = edge.max(8);
        let frame = edge / 8;
        let image = RgbImage::from_fn(edge, edge, |x, y| {
            let on_frame = x < frame || y < frame || x >= edge - frame || y >= edge - frame;
            let on_diagonal = x.abs_diff(y) <= frame / 2;
            if on_frame || on_diagonal {
                Rgb([158, 158, 158])
            } else {
                Rgb([224, 224, 224])
            }
        });
        let bytes = encode_jpeg(&DynamicImage::ImageRgb8(image))?;
        Ok(Self { bytes })
    }

    /// Uses the image at `path`, scaled to `edge`, as the placeholder.
    pub fn from_file(path: impl AsRef<Path>, edge: u32) -> Result<Self> {
        Ok(Self {
            bytes: load_thumbnail(path, edge)?,
        })
    }

    /// Wraps already-encoded bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The placeholder blob.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
