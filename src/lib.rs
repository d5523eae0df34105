//! Flipbook is an animated-image playback engine.
//!
//! It turns a decoder's stream of partial frame patches into independently
//! displayable frames, then plays them back at their original cadence.
//!
//! # Pipeline overview
//!
//! 1. **Decode** (optional adapter): `GIF bytes -> Vec<RawPatch>` via [`decode_gif`]
//! 2. **Composite**: `Vec<RawPatch> -> Vec<ResolvedFrame>` ([`composite`]), once at load time
//! 3. **Play**: [`Player`] walks the resolved frames, pushing each one to a [`PlayerSink`]
//!    and arming drift-corrected timers on a [`FrameClock`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Resolve once**: every frame is a full-canvas snapshot, so seeking is O(1).
//! - **Single timeline**: a player owns at most one pending timer or repaint.
//! - **One-way dependencies**: the player never holds references back into its host;
//!   hosts deliver fired [`ClockEvent`]s through [`Player::handle`].
//!
//! # Getting started
//!
//! ```no_run
//! use flipbook::{Player, PlayerConfig, RecordingSink, SystemClock, decode_gif};
//!
//! # fn main() -> flipbook::FlipbookResult<()> {
//! let bytes = std::fs::read("anim.gif").map_err(|e| flipbook::FlipbookError::Other(e.into()))?;
//! let decoded = decode_gif(&bytes)?;
//! let mut player = Player::with_patches(
//!     SystemClock::new(),
//!     RecordingSink::new(),
//!     PlayerConfig::default(),
//!     &decoded.patches,
//! )?;
//! player.run(None)?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod composite;
mod decode;
mod foundation;
mod playback;

pub use composite::compositor::{
    CompositeOptions, ResolvedFrame, canvas_for, composite, composite_with, sequence_duration_ms,
};
pub use composite::summary::{AnimationSummary, FrameSummary};
pub use decode::gif::{DecodedGif, decode_gif};
pub use decode::patch::RawPatch;
pub use foundation::core::{BlendMode, Canvas, Disposal, PatchRect};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use foundation::time::{format_hms, time_label};
pub use playback::clock::{ClockEvent, FrameClock, RepaintHandle, TimerHandle};
pub use playback::config::PlayerConfig;
pub use playback::player::Player;
pub use playback::sink::{PlayerSink, RecordingSink, ScrubPosition, SinkEvent};
pub use playback::system_clock::{DEFAULT_REFRESH_INTERVAL, SystemClock};
pub use playback::virtual_clock::{MAX_EVENTS_PER_ADVANCE, VirtualClock};
