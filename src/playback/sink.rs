use image::RgbaImage;

use crate::{composite::compositor::ResolvedFrame, foundation::error::FlipbookResult};

/// Normalized scrubber position for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrubPosition {
    pub index: usize,
    pub count: usize,
    /// `index / (count - 1)`, `0.0` for single-frame animations.
    pub fraction: f64,
}

impl ScrubPosition {
    pub fn new(index: usize, count: usize) -> Self {
        let fraction = if count > 1 {
            index as f64 / (count - 1) as f64
        } else {
            0.0
        };
        Self {
            index,
            count,
            fraction,
        }
    }
}

/// Outbound side of the player: display surface plus UI indicators.
///
/// `present` is called once per render with a canvas-sized frame; `scrub`
/// and `time_label` once per render before it; `play_state` on every
/// change of the playing flag. Errors propagate to whoever triggered the
/// render and may leave the indicators partially updated, so sinks should
/// not fail in normal operation.
pub trait PlayerSink {
    fn present(&mut self, frame: &ResolvedFrame) -> FlipbookResult<()>;

    fn scrub(&mut self, _position: ScrubPosition) -> FlipbookResult<()> {
        Ok(())
    }

    fn time_label(&mut self, _label: &str) -> FlipbookResult<()> {
        Ok(())
    }

    fn play_state(&mut self, _playing: bool) -> FlipbookResult<()> {
        Ok(())
    }
}

/// One call observed by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Present { index: usize },
    Scrub(ScrubPosition),
    TimeLabel(String),
    PlayState(bool),
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    last_image: Option<RgbaImage>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in arrival order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Indices of presented frames, in order.
    pub fn presented(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Present { index } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn play_states(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::PlayState(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn last_label(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::TimeLabel(l) => Some(l.as_str()),
            _ => None,
        })
    }

    pub fn last_scrub(&self) -> Option<ScrubPosition> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::Scrub(p) => Some(*p),
            _ => None,
        })
    }

    /// Pixels of the most recently presented frame.
    pub fn last_image(&self) -> Option<&RgbaImage> {
        self.last_image.as_ref()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PlayerSink for RecordingSink {
    fn present(&mut self, frame: &ResolvedFrame) -> FlipbookResult<()> {
        self.events.push(SinkEvent::Present {
            index: frame.index(),
        });
        self.last_image = Some(frame.image().clone());
        Ok(())
    }

    fn scrub(&mut self, position: ScrubPosition) -> FlipbookResult<()> {
        self.events.push(SinkEvent::Scrub(position));
        Ok(())
    }

    fn time_label(&mut self, label: &str) -> FlipbookResult<()> {
        self.events.push(SinkEvent::TimeLabel(label.to_owned()));
        Ok(())
    }

    fn play_state(&mut self, playing: bool) -> FlipbookResult<()> {
        self.events.push(SinkEvent::PlayState(playing));
        Ok(())
    }
}
