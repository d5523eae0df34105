use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlipbookError::invalid_patch("x")
            .to_string()
            .contains("invalid patch:")
    );
    assert!(
        FlipbookError::invalid_sequence("x")
            .to_string()
            .contains("invalid sequence:")
    );
    assert!(FlipbookError::decode("x").to_string().contains("decode error:"));
    assert!(FlipbookError::config("x").to_string().contains("config error:"));
    assert!(
        FlipbookError::stalled("x")
            .to_string()
            .contains("playback stalled:")
    );
}

#[test]
fn seek_out_of_range_names_index_and_len() {
    let err = FlipbookError::SeekOutOfRange { index: 7, len: 3 };
    let msg = err.to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains('3'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlipbookError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
