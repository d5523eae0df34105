/// Logical canvas size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum of two canvases.
    pub fn union(self, other: Canvas) -> Canvas {
        Canvas {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Placement of a patch inside the logical canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PatchRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PatchRect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Smallest canvas that fully contains this rect.
    pub fn extent(self) -> Canvas {
        Canvas {
            width: self.left.saturating_add(self.width),
            height: self.top.saturating_add(self.height),
        }
    }

    /// Like [`PatchRect::extent`], but `None` when the far edge overflows `u32`.
    pub fn checked_extent(self) -> Option<Canvas> {
        Some(Canvas {
            width: self.left.checked_add(self.width)?,
            height: self.top.checked_add(self.height)?,
        })
    }

    pub fn num_pixels(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// What happens to the canvas before the *next* frame is drawn.
///
/// Numbering follows the GIF graphics control extension (bits 2..4 of the
/// packed field). Codes 4..=7 are reserved by the format and behave like
/// [`Disposal::Keep`], but the raw code is preserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposal {
    /// Code 0: no disposal specified, canvas is left as-is.
    #[default]
    Unspecified,
    /// Code 1: do not dispose.
    Keep,
    /// Code 2: restore to background (clear the canvas).
    Background,
    /// Code 3: restore to the canvas state before this frame was drawn.
    Previous,
    /// Codes 4..=7.
    Reserved(u8),
}

impl Disposal {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Unspecified,
            1 => Self::Keep,
            2 => Self::Background,
            3 => Self::Previous,
            other => Self::Reserved(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Keep => 1,
            Self::Background => 2,
            Self::Previous => 3,
            Self::Reserved(code) => code,
        }
    }

    pub fn clears_canvas(self) -> bool {
        matches!(self, Self::Background)
    }
}

/// How a patch's pixels combine with the accumulator underneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Straight-alpha source-over: transparent patch pixels keep what is below.
    #[default]
    Over,
    /// Copy the patch rectangle verbatim, alpha included.
    Replace,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
