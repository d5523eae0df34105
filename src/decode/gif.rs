use std::io::Cursor;

use anyhow::Context;

use crate::{
    decode::patch::RawPatch,
    foundation::{
        core::{Canvas, Disposal, PatchRect},
        error::{FlipbookError, FlipbookResult},
    },
};

/// Output of [`decode_gif`]: the raw patch stream plus the declared logical screen.
#[derive(Clone, Debug)]
pub struct DecodedGif {
    /// Logical screen size from the GIF header.
    pub screen: Canvas,
    /// One patch per image block, in file order.
    pub patches: Vec<RawPatch>,
}

/// Decode GIF bytes into uncomposited RGBA8 patches.
///
/// Delays are converted from hundredths of a second to milliseconds.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_gif(bytes: &[u8]) -> FlipbookResult<DecodedGif> {
    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::RGBA);
    let mut decoder = opts
        .read_info(Cursor::new(bytes))
        .context("read gif header")?;

    let screen = Canvas::new(u32::from(decoder.width()), u32::from(decoder.height()));
    let mut patches = Vec::new();
    while let Some(frame) = decoder.read_next_frame().context("read gif frame")? {
        let rect = PatchRect::new(
            u32::from(frame.left),
            u32::from(frame.top),
            u32::from(frame.width),
            u32::from(frame.height),
        );
        let patch = RawPatch::new(
            rect,
            frame.buffer.to_vec(),
            Disposal::from_code(frame.dispose as u8),
            u32::from(frame.delay) * 10,
        )
        .map_err(|e| FlipbookError::decode(format!("frame {}: {e}", patches.len())))?;
        patches.push(patch);
    }

    tracing::debug!(frames = patches.len(), ?screen, "decoded gif");
    Ok(DecodedGif { screen, patches })
}

#[cfg(test)]
#[path = "../../tests/unit/decode/gif.rs"]
mod tests;
