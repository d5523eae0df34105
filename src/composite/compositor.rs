use image::{Rgba, RgbaImage, imageops};

use crate::{
    decode::patch::RawPatch,
    foundation::{
        core::{BlendMode, Canvas, Disposal},
        error::{FlipbookError, FlipbookResult},
    },
};

/// Options for [`composite_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeOptions {
    /// How patch pixels combine with the accumulator.
    pub blend: BlendMode,
    /// Minimum canvas size, e.g. a decoder's declared logical screen.
    /// Never shrinks the canvas below the patches' max extent.
    pub canvas_floor: Option<Canvas>,
}

/// A fully composited, full-canvas frame with no dependency on earlier frames.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedFrame {
    index: usize,
    image: RgbaImage,
    disposal: Disposal,
    delay_ms: u32,
    start_ms: u64,
}

impl ResolvedFrame {
    /// Position in the animation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Straight-alpha RGBA8 pixels, canvas sized.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.image.width(), self.image.height())
    }

    /// Disposal carried over from the originating patch.
    pub fn disposal(&self) -> Disposal {
        self.disposal
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Sum of the delays of every earlier frame.
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// `start_ms + delay_ms`.
    pub fn end_ms(&self) -> u64 {
        self.start_ms + u64::from(self.delay_ms)
    }
}

/// Total running time of a resolved sequence: end of its last frame.
pub fn sequence_duration_ms(frames: &[ResolvedFrame]) -> u64 {
    frames.last().map_or(0, ResolvedFrame::end_ms)
}

/// Check that `frames` is a whole composited sequence: indices `0..len` in
/// order, each start time the sum of the earlier delays.
pub(crate) fn check_sequence(frames: &[ResolvedFrame]) -> FlipbookResult<()> {
    let mut start_ms = 0u64;
    for (i, frame) in frames.iter().enumerate() {
        if frame.index != i {
            return Err(FlipbookError::invalid_sequence(format!(
                "frame at position {i} has index {}",
                frame.index
            )));
        }
        if frame.start_ms != start_ms {
            return Err(FlipbookError::invalid_sequence(format!(
                "frame {i} starts at {}ms, expected {start_ms}ms",
                frame.start_ms
            )));
        }
        start_ms += u64::from(frame.delay_ms);
    }
    Ok(())
}

/// Logical canvas for a patch stream: the max extent over every patch.
pub fn canvas_for(patches: &[RawPatch]) -> Canvas {
    patches
        .iter()
        .fold(Canvas::default(), |canvas, p| canvas.union(p.extent()))
}

/// Resolve a raw patch stream with default options.
pub fn composite(patches: &[RawPatch]) -> FlipbookResult<Vec<ResolvedFrame>> {
    composite_with(patches, &CompositeOptions::default())
}

/// Resolve a raw patch stream into independently displayable frames.
///
/// A single accumulator persists across the stream. Each patch's disposal is
/// applied just before the *next* patch is drawn, then the whole accumulator
/// is snapshotted as that patch's frame.
#[tracing::instrument(skip(patches), fields(count = patches.len()))]
pub fn composite_with(
    patches: &[RawPatch],
    opts: &CompositeOptions,
) -> FlipbookResult<Vec<ResolvedFrame>> {
    if patches.is_empty() {
        return Err(FlipbookError::EmptySequence);
    }
    for (index, patch) in patches.iter().enumerate() {
        let rect = patch.rect();
        if rect.checked_extent().is_none() {
            return Err(FlipbookError::invalid_patch(format!(
                "patch {index} at ({}, {}) sized {}x{} overflows canvas coordinates",
                rect.left, rect.top, rect.width, rect.height
            )));
        }
    }

    let canvas = opts
        .canvas_floor
        .map_or_else(|| canvas_for(patches), |floor| floor.union(canvas_for(patches)));
    let mut acc = RgbaImage::new(canvas.width, canvas.height);
    let mut saved: Option<RgbaImage> = None;
    let mut pending = Disposal::Unspecified;
    let mut start_ms = 0u64;
    let mut frames = Vec::with_capacity(patches.len());

    for (index, patch) in patches.iter().enumerate() {
        if pending.clears_canvas() {
            clear(&mut acc);
        } else if pending == Disposal::Previous
            && let Some(prev) = saved.take()
        {
            acc = prev;
        }
        if patch.disposal() == Disposal::Previous {
            saved = Some(acc.clone());
        }

        draw_patch(&mut acc, patch, opts.blend);

        frames.push(ResolvedFrame {
            index,
            image: acc.clone(),
            disposal: patch.disposal(),
            delay_ms: patch.delay_ms(),
            start_ms,
        });
        start_ms += u64::from(patch.delay_ms());
        pending = patch.disposal();
    }

    tracing::debug!(
        frames = frames.len(),
        width = canvas.width,
        height = canvas.height,
        duration_ms = start_ms,
        "composited"
    );
    Ok(frames)
}

fn clear(acc: &mut RgbaImage) {
    for px in acc.pixels_mut() {
        *px = Rgba([0, 0, 0, 0]);
    }
}

fn draw_patch(acc: &mut RgbaImage, patch: &RawPatch, blend: BlendMode) {
    let rect = patch.rect();
    match blend {
        BlendMode::Replace => {
            imageops::replace(acc, patch.pixels(), i64::from(rect.left), i64::from(rect.top));
        }
        BlendMode::Over => {
            for (x, y, src) in patch.pixels().enumerate_pixels() {
                let dst = acc.get_pixel_mut(rect.left + x, rect.top + y);
                dst.0 = over_straight(dst.0, src.0);
            }
        }
    }
}

/// Straight (non-premultiplied) alpha source-over.
pub(crate) fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u32::from(dst[3]);
    // Both alphas scaled by 255 to stay in integers.
    let dst_weight = da * (255 - sa);
    let out_a255 = sa * 255 + dst_weight;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * dst_weight;
        out[i] = ((num + out_a255 / 2) / out_a255) as u8;
    }
    out[3] = ((out_a255 + 127) / 255) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
