use std::time::Duration;

use crate::{
    composite::{
        compositor::{
            CompositeOptions, ResolvedFrame, check_sequence, composite_with,
            sequence_duration_ms,
        },
        summary::AnimationSummary,
    },
    decode::patch::RawPatch,
    foundation::{
        error::{FlipbookError, FlipbookResult},
        time::time_label,
    },
    playback::{
        clock::{ClockEvent, FrameClock, RepaintHandle, TimerHandle},
        config::PlayerConfig,
        sink::{PlayerSink, ScrubPosition},
    },
};

/// The single outstanding scheduling request of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Idle,
    /// Waiting out the current frame's delay.
    Timer(TimerHandle),
    /// Delay elapsed, waiting for the next repaint to advance.
    Repaint(RepaintHandle),
}

#[derive(Debug)]
struct Animation {
    frames: Vec<ResolvedFrame>,
    duration_ms: u64,
}

/// Playback scheduler over a resolved frame sequence.
///
/// States are paused and playing. Every render pushes the current frame to
/// the sink and, while playing, arms one timeout for
/// `max(delay - render_cost, min_frame_delay)`. When that timeout fires the
/// player requests a repaint, and the repaint advances to the next frame.
/// At most one timeout or repaint is outstanding at any time; every
/// state-changing operation cancels it before arming a new one.
///
/// The player never calls back into the host on its own. Hosts deliver
/// fired [`ClockEvent`]s through [`Player::handle`].
#[derive(Debug)]
pub struct Player<C: FrameClock, S: PlayerSink> {
    clock: C,
    sink: S,
    config: PlayerConfig,
    animation: Option<Animation>,
    frame_index: usize,
    playing: bool,
    looping: bool,
    pending: Pending,
}

impl<C: FrameClock, S: PlayerSink> Player<C, S> {
    /// Create an empty player. Playback operations fail with
    /// [`FlipbookError::NotLoaded`] until a load succeeds.
    pub fn new(clock: C, sink: S, config: PlayerConfig) -> Self {
        Self {
            clock,
            sink,
            looping: config.looping,
            config,
            animation: None,
            frame_index: 0,
            playing: false,
            pending: Pending::Idle,
        }
    }

    /// Create a player and load `patches` in one go.
    pub fn with_patches(
        clock: C,
        sink: S,
        config: PlayerConfig,
        patches: &[RawPatch],
    ) -> FlipbookResult<Self> {
        let mut player = Self::new(clock, sink, config);
        player.load(patches)?;
        Ok(player)
    }

    /// Composite `patches` and load the result.
    pub fn load(&mut self, patches: &[RawPatch]) -> FlipbookResult<()> {
        self.load_with(patches, &CompositeOptions::default())
    }

    pub fn load_with(&mut self, patches: &[RawPatch], opts: &CompositeOptions) -> FlipbookResult<()> {
        match composite_with(patches, opts) {
            Ok(frames) => self.load_frames(frames),
            Err(err) => {
                self.unload()?;
                Err(err)
            }
        }
    }

    /// Replace the animation wholesale with already resolved frames.
    ///
    /// `frames` must be a whole sequence as returned by [`composite_with`]:
    /// slices or reorderings are rejected with
    /// [`FlipbookError::InvalidSequence`]. Cancels anything pending, rewinds to
    /// frame 0, announces the initial play state, and renders frame 0. The
    /// loop flag is kept.
    #[tracing::instrument(skip_all, fields(count = frames.len()))]
    pub fn load_frames(&mut self, frames: Vec<ResolvedFrame>) -> FlipbookResult<()> {
        let checked = if frames.is_empty() {
            Err(FlipbookError::EmptySequence)
        } else {
            check_sequence(&frames)
        };
        if let Err(err) = checked {
            self.unload()?;
            return Err(err);
        }

        self.cancel_pending();
        let duration_ms = sequence_duration_ms(&frames);
        self.animation = Some(Animation {
            frames,
            duration_ms,
        });
        self.frame_index = 0;
        self.playing = self.config.autoplay;
        self.sink.play_state(self.playing)?;
        tracing::debug!(duration_ms, playing = self.playing, "loaded");
        self.render()
    }

    /// Start (or restart) playback from the current frame.
    ///
    /// Rewinds to frame 0 when sitting on the last frame.
    pub fn play(&mut self) -> FlipbookResult<()> {
        let len = self.loaded()?.frames.len();
        if self.frame_index + 1 >= len {
            self.frame_index = 0;
        }
        self.set_playing(true)?;
        self.cancel_pending();
        self.render()
    }

    /// Stop advancing; the current frame stays on the surface.
    pub fn pause(&mut self) -> FlipbookResult<()> {
        self.loaded()?;
        self.set_playing(false)?;
        self.cancel_pending();
        Ok(())
    }

    /// `pause` when playing, `play` otherwise.
    pub fn toggle(&mut self) -> FlipbookResult<()> {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Jump to `index` and render it. Seeking always leaves the player paused.
    pub fn seek(&mut self, index: usize) -> FlipbookResult<()> {
        let len = self.loaded()?.frames.len();
        if index >= len {
            return Err(FlipbookError::SeekOutOfRange { index, len });
        }
        self.set_playing(false)?;
        self.cancel_pending();
        self.frame_index = index;
        tracing::debug!(index, "seek");
        self.render()
    }

    /// Deliver a fired scheduling primitive.
    ///
    /// Events that do not match the outstanding handle are stale and ignored.
    pub fn handle(&mut self, event: ClockEvent) -> FlipbookResult<()> {
        match (event, self.pending) {
            (ClockEvent::Timer(fired), Pending::Timer(armed)) if fired == armed => {
                self.pending = Pending::Repaint(self.clock.request_repaint());
                Ok(())
            }
            (ClockEvent::Repaint(fired), Pending::Repaint(armed)) if fired == armed => {
                self.pending = Pending::Idle;
                self.tick()
            }
            _ => {
                tracing::trace!(?event, pending = ?self.pending, "ignoring stale clock event");
                Ok(())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Takes effect at the next end-of-sequence; an armed timer is untouched.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    /// Loaded frames; empty before the first successful load.
    pub fn frames(&self) -> &[ResolvedFrame] {
        self.animation
            .as_ref()
            .map(|a| a.frames.as_slice())
            .unwrap_or_default()
    }

    pub fn current_frame(&self) -> Option<&ResolvedFrame> {
        self.frames().get(self.frame_index)
    }

    pub fn duration_ms(&self) -> u64 {
        self.animation.as_ref().map_or(0, |a| a.duration_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms())
    }

    pub fn summary(&self) -> Option<AnimationSummary> {
        self.animation
            .as_ref()
            .map(|a| AnimationSummary::from_frames(&a.frames))
    }

    /// Whether a timeout or repaint is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending != Pending::Idle
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (C, S) {
        (self.clock, self.sink)
    }

    fn loaded(&self) -> FlipbookResult<&Animation> {
        self.animation.as_ref().ok_or(FlipbookError::NotLoaded)
    }

    fn unload(&mut self) -> FlipbookResult<()> {
        self.cancel_pending();
        self.animation = None;
        self.frame_index = 0;
        self.set_playing(false)
    }

    fn set_playing(&mut self, playing: bool) -> FlipbookResult<()> {
        if self.playing == playing {
            return Ok(());
        }
        self.playing = playing;
        tracing::debug!(playing, index = self.frame_index, "play state");
        self.sink.play_state(playing)
    }

    fn cancel_pending(&mut self) {
        match std::mem::replace(&mut self.pending, Pending::Idle) {
            Pending::Idle => {}
            Pending::Timer(h) => self.clock.cancel_timer(h),
            Pending::Repaint(h) => self.clock.cancel_repaint(h),
        }
    }

    fn tick(&mut self) -> FlipbookResult<()> {
        if !self.playing {
            return Ok(());
        }
        let len = self.loaded()?.frames.len();
        if self.frame_index + 1 >= len {
            if !self.looping {
                tracing::debug!(index = self.frame_index, "end of sequence");
                return self.set_playing(false);
            }
            tracing::debug!("loop wrap");
            self.frame_index = 0;
        } else {
            self.frame_index += 1;
        }
        self.render()
    }

    fn render(&mut self) -> FlipbookResult<()> {
        let Some(animation) = self.animation.as_ref() else {
            return Err(FlipbookError::NotLoaded);
        };
        let frame = &animation.frames[self.frame_index];
        let delay = Duration::from_millis(u64::from(frame.delay_ms()));

        self.sink
            .scrub(ScrubPosition::new(self.frame_index, animation.frames.len()))?;
        self.sink
            .time_label(&time_label(frame.start_ms(), animation.duration_ms))?;

        let started = self.clock.now();
        self.sink.present(frame)?;
        let cost = self.clock.now().saturating_sub(started);

        if self.playing {
            let wait = delay.saturating_sub(cost).max(self.config.min_frame_delay());
            self.cancel_pending();
            self.pending = Pending::Timer(self.clock.schedule_after(wait));
            tracing::trace!(index = self.frame_index, ?delay, ?cost, ?wait, "armed");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
