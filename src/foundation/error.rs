/// Convenience result type used across flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant except [`FlipbookError::Other`] is a synchronous, local
/// programmer-error class failure. Nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// `composite` or `load` was given zero patches/frames.
    #[error("empty sequence: an animation needs at least one frame")]
    EmptySequence,

    /// `seek` target outside `[0, len)`.
    #[error("seek out of range: frame {index} of {len}")]
    SeekOutOfRange {
        /// Requested frame index.
        index: usize,
        /// Number of frames in the loaded animation.
        len: usize,
    },

    /// A playback operation was called before any successful load.
    #[error("no animation loaded")]
    NotLoaded,

    /// A raw patch whose pixel buffer does not match its rectangle, or whose
    /// rectangle does not fit in `u32` canvas coordinates.
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    /// Resolved frames that are not a contiguous, in-order composited sequence.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// Failure while turning encoded bytes into raw patches.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid configuration values or configuration documents.
    #[error("config error: {0}")]
    Config(String),

    /// A virtual clock advance delivered more events than its budget allows.
    #[error("playback stalled: {0}")]
    Stalled(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::InvalidPatch`] value.
    pub fn invalid_patch(msg: impl Into<String>) -> Self {
        Self::InvalidPatch(msg.into())
    }

    /// Build a [`FlipbookError::InvalidSequence`] value.
    pub fn invalid_sequence(msg: impl Into<String>) -> Self {
        Self::InvalidSequence(msg.into())
    }

    /// Build a [`FlipbookError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FlipbookError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FlipbookError::Stalled`] value.
    pub fn stalled(msg: impl Into<String>) -> Self {
        Self::Stalled(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
