//! Human-readable playback clock strings.

/// Format milliseconds as `H:MM:SS`, dropping the hours field when it is zero.
///
/// Minutes are zero-padded only when an hours field precedes them; seconds
/// are always two digits. Sub-second remainders are truncated.
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// `elapsed / total` label shown next to the scrubber.
pub fn time_label(elapsed_ms: u64, total_ms: u64) -> String {
    format!("{} / {}", format_hms(elapsed_ms), format_hms(total_ms))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
