//! Cover-fit cropping of decoded bitmaps to the viewport.
//!
//! The longer source axis (relative to the viewport aspect) is cropped
//! symmetrically, so the output always fills the target exactly without
//! stretching visible content.

use image::imageops;
use image::RgbaImage;

use crate::error::{RefractError, Result};

/// Decoded RGBA image with non-zero extents. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    /// Wraps already-decoded pixels. Returns `None` for an empty image.
    pub fn new(pixels: RgbaImage) -> Option<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return None;
        }
        Some(Self { pixels })
    }

    /// Decodes an encoded image (JPEG or PNG) fetched from `uri`.
    pub fn decode(uri: &str, bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|source| RefractError::Decode {
            uri: uri.to_string(),
            source,
        })?;
        Self::new(decoded.into_rgba8()).ok_or_else(|| RefractError::EmptyBitmap {
            uri: uri.to_string(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Drawing surface extents, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RefractError::EmptyViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Source rectangle selected by the cover fit, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Snaps the region to whole pixels inside a `source_w` x `source_h` image.
    fn to_pixels(self, source_w: u32, source_h: u32) -> (u32, u32, u32, u32) {
        let width = (self.width.round() as u32).clamp(1, source_w);
        let height = (self.height.round() as u32).clamp(1, source_h);
        let x = (self.x.round().max(0.0) as u32).min(source_w - width);
        let y = (self.y.round().max(0.0) as u32).min(source_h - height);
        (x, y, width, height)
    }
}

/// Computes the centered source region that covers `target` without
/// distortion.
pub fn cover_region(source_w: u32, source_h: u32, target: Viewport) -> CropRegion {
    let (sw, sh) = (f64::from(source_w), f64::from(source_h));
    let (tw, th) = (f64::from(target.width), f64::from(target.height));

    // source_w / source_h > tw / th, compared without division.
    let wider = u64::from(source_w) * u64::from(target.height)
        > u64::from(source_h) * u64::from(target.width);
    if wider {
        let width = sh * tw / th;
        CropRegion {
            x: (sw - width) / 2.0,
            y: 0.0,
            width,
            height: sh,
        }
    } else {
        let height = sw * th / tw;
        CropRegion {
            x: 0.0,
            y: (sh - height) / 2.0,
            width: sw,
            height,
        }
    }
}

/// RGBA pixels of exactly the requested viewport size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedFrame {
    pixels: RgbaImage,
}

impl CroppedFrame {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Row-major RGBA8 bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Cover-crops `bitmap` to `target`, optionally pre-blurring the source.
///
/// `blur_radius` is the Gaussian standard deviation in source pixels; values
/// that are not strictly positive (including NaN) disable the blur. The blur
/// runs before resampling over the crop region grown by three deviations, so
/// pixels just outside the crop bleed across its edge the same way a
/// whole-bitmap blur would. It is a box-filter approximation whose cost does
/// not grow with the radius. Each call allocates fresh buffers.
pub fn crop(bitmap: &Bitmap, target: Viewport, blur_radius: f32) -> CroppedFrame {
    let source = bitmap.pixels();
    let region = cover_region(source.width(), source.height(), target);
    let (x, y, w, h) = region.to_pixels(source.width(), source.height());

    let pixels = if blur_radius > 0.0 {
        // Past half the shorter side every box spans the whole image anyway.
        let limit = source.width().min(source.height()) as f32 / 2.0;
        let sigma = blur_radius.min(limit);
        let margin = (3.0 * sigma).ceil() as u32;
        let x0 = x.saturating_sub(margin);
        let y0 = y.saturating_sub(margin);
        let x1 = (x + w).saturating_add(margin).min(source.width());
        let y1 = (y + h).saturating_add(margin).min(source.height());

        let padded = imageops::crop_imm(source, x0, y0, x1 - x0, y1 - y0).to_image();
        let sigma = sigma.min(padded.width().min(padded.height()) as f32 / 2.0);
        let blurred = imageops::fast_blur(&padded, sigma);
        sample_nearest(&blurred, (x - x0, y - y0, w, h), target)
    } else {
        sample_nearest(source, (x, y, w, h), target)
    };
    CroppedFrame { pixels }
}

/// Nearest-neighbour resample of the `(x, y, w, h)` rectangle of `source`
/// onto a buffer of the target size, sampling at output pixel centers.
fn sample_nearest(source: &RgbaImage, rect: (u32, u32, u32, u32), target: Viewport) -> RgbaImage {
    let (x, y, w, h) = rect;
    let index_map = |origin: u32, span: u32, out: u32| -> Vec<u32> {
        (0..out)
            .map(|i| origin + ((2 * u64::from(i) + 1) * u64::from(span) / (2 * u64::from(out))) as u32)
            .collect()
    };
    let columns = index_map(x, w, target.width);
    let rows = index_map(y, h, target.height);

    let mut out = RgbaImage::new(target.width, target.height);
    for (dst_row, &sy) in out.rows_mut().zip(&rows) {
        for (pixel, &sx) in dst_row.zip(&columns) {
            *pixel = *source.get_pixel(sx, sy);
        }
    }
    out
}
