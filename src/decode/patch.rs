use image::{Rgba, RgbaImage};

use crate::foundation::{
    core::{Canvas, Disposal, PatchRect},
    error::{FlipbookError, FlipbookResult},
};

/// One decoded frame as produced by a decoder: a straight-alpha RGBA8 patch
/// placed somewhere inside the logical canvas, plus its timing and disposal.
///
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPatch {
    left: u32,
    top: u32,
    pixels: RgbaImage,
    disposal: Disposal,
    delay_ms: u32,
}

impl RawPatch {
    /// Build a patch from a raw RGBA8 buffer, checking its length against `rect`.
    pub fn new(
        rect: PatchRect,
        rgba8: Vec<u8>,
        disposal: Disposal,
        delay_ms: u32,
    ) -> FlipbookResult<Self> {
        if rect.checked_extent().is_none() {
            return Err(FlipbookError::invalid_patch(format!(
                "patch at ({}, {}) sized {}x{} overflows canvas coordinates",
                rect.left, rect.top, rect.width, rect.height
            )));
        }
        let expected = rect.num_pixels() * 4;
        if rgba8.len() != expected {
            return Err(FlipbookError::invalid_patch(format!(
                "{}x{} patch needs {expected} bytes, got {}",
                rect.width,
                rect.height,
                rgba8.len()
            )));
        }
        let pixels = RgbaImage::from_raw(rect.width, rect.height, rgba8)
            .ok_or_else(|| FlipbookError::invalid_patch("pixel buffer does not fit rect"))?;
        Ok(Self::from_image(rect.left, rect.top, pixels, disposal, delay_ms))
    }

    pub fn from_image(
        left: u32,
        top: u32,
        pixels: RgbaImage,
        disposal: Disposal,
        delay_ms: u32,
    ) -> Self {
        Self {
            left,
            top,
            pixels,
            disposal,
            delay_ms,
        }
    }

    /// A patch filled with a single straight-alpha color.
    pub fn filled(rect: PatchRect, rgba: [u8; 4], disposal: Disposal, delay_ms: u32) -> Self {
        let pixels = RgbaImage::from_pixel(rect.width, rect.height, Rgba(rgba));
        Self::from_image(rect.left, rect.top, pixels, disposal, delay_ms)
    }

    pub fn rect(&self) -> PatchRect {
        PatchRect {
            left: self.left,
            top: self.top,
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    /// Canvas extent this patch reaches into.
    pub fn extent(&self) -> Canvas {
        self.rect().extent()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn disposal(&self) -> Disposal {
        self.disposal
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/patch.rs"]
mod tests;
