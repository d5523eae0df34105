use crate::{
    composite::compositor::{ResolvedFrame, sequence_duration_ms},
    foundation::core::{Canvas, Disposal},
};

/// Timing metadata for one resolved frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSummary {
    pub index: usize,
    pub start_ms: u64,
    pub delay_ms: u32,
    pub disposal: Disposal,
}

/// Serializable description of a resolved animation, without pixels.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSummary {
    pub canvas: Canvas,
    pub frame_count: usize,
    pub duration_ms: u64,
    pub frames: Vec<FrameSummary>,
}

impl AnimationSummary {
    pub fn from_frames(frames: &[ResolvedFrame]) -> Self {
        Self {
            canvas: frames.first().map(ResolvedFrame::canvas).unwrap_or_default(),
            frame_count: frames.len(),
            duration_ms: sequence_duration_ms(frames),
            frames: frames
                .iter()
                .map(|f| FrameSummary {
                    index: f.index(),
                    start_ms: f.start_ms(),
                    delay_ms: f.delay_ms(),
                    disposal: f.disposal(),
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/summary.rs"]
mod tests;
