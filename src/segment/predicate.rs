use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PhotoboothError, PhotoboothResult};

/// Chroma-key test for slot pixels: strong green with weak red and blue.
///
/// A pixel matches when `g > green_min && r < red_max && b < blue_max`. Alpha is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotColorPredicate {
    /// Green must be strictly greater than this.
    pub green_min: u8,
    /// Red must be strictly less than this.
    pub red_max: u8,
    /// Blue must be strictly less than this.
    pub blue_max: u8,
}

impl Default for SlotColorPredicate {
    fn default() -> Self {
        Self {
            green_min: 200,
            red_max: 100,
            blue_max: 100,
        }
    }
}

impl SlotColorPredicate {
    /// Test a single RGBA pixel.
    #[inline]
    pub fn matches(&self, px: &image::Rgba<u8>) -> bool {
        let [r, g, b, _] = px.0;
        g > self.green_min && r < self.red_max && b < self.blue_max
    }

    /// Reject thresholds that can never match.
    pub fn validate(&self) -> PhotoboothResult<()> {
        if self.green_min == u8::MAX || self.red_max == 0 || self.blue_max == 0 {
            return Err(PhotoboothError::validation(
                "slot color predicate can never match (green_min=255 or red_max/blue_max=0)",
            ));
        }
        Ok(())
    }
}

/// Row-major boolean mask of pixels matching a [`SlotColorPredicate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl KeyMask {
    /// Classify every pixel of `img`.
    ///
    /// Rows are classified in parallel; the result does not depend on scheduling.
    pub fn build(img: &image::RgbaImage, predicate: &SlotColorPredicate) -> Self {
        let (width, height) = img.dimensions();
        let w = width as usize;
        let mut bits = vec![false; w * height as usize];
        if w > 0 {
            bits.par_chunks_mut(w)
                .zip(img.as_raw().par_chunks(w * 4))
                .for_each(|(row_bits, row_px)| {
                    for (bit, px) in row_bits.iter_mut().zip(row_px.chunks_exact(4)) {
                        *bit = predicate.matches(&image::Rgba([px[0], px[1], px[2], px[3]]));
                    }
                });
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is a key pixel. Out-of-range coordinates are not.
    #[inline]
    pub fn is_key(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    /// Number of key pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn bit(&self, idx: usize) -> bool {
        self.bits[idx]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/predicate.rs"]
mod tests;
