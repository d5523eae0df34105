use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::foundation::error::{FlipbookError, FlipbookResult};

/// Player behavior knobs, loadable from JSON.
///
/// ```json
/// { "autoplay": true, "looping": false, "min_frame_delay_ms": 0 }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Start playing as soon as an animation is loaded.
    pub autoplay: bool,
    /// Initial loop flag for a new player.
    pub looping: bool,
    /// Floor for the drift-corrected wait between frames.
    pub min_frame_delay_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: false,
            min_frame_delay_ms: 0,
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(json: &str) -> FlipbookResult<Self> {
        serde_json::from_str(json).map_err(|e| FlipbookError::config(e.to_string()))
    }

    pub fn from_path(path: &Path) -> FlipbookResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read player config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn min_frame_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_frame_delay_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;
