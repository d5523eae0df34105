use super::*;

#[test]
fn new_rejects_mismatched_buffer() {
    let err = RawPatch::new(PatchRect::new(0, 0, 2, 2), vec![0; 15], Disposal::Keep, 10)
        .unwrap_err();
    assert!(matches!(err, FlipbookError::InvalidPatch(_)));
    assert!(err.to_string().contains("16 bytes"));
}

#[test]
fn new_keeps_rect_and_metadata() {
    let rect = PatchRect::new(5, 7, 1, 2);
    let p = RawPatch::new(rect, vec![1, 2, 3, 4, 5, 6, 7, 8], Disposal::Background, 40).unwrap();
    assert_eq!(p.rect(), rect);
    assert_eq!(p.extent(), Canvas::new(6, 9));
    assert_eq!(p.disposal(), Disposal::Background);
    assert_eq!(p.delay_ms(), 40);
    assert_eq!(p.pixels().get_pixel(0, 1).0, [5, 6, 7, 8]);
}

#[test]
fn new_rejects_rect_past_u32_edge() {
    let err = RawPatch::new(
        PatchRect::new(u32::MAX, 0, 1, 1),
        vec![0; 4],
        Disposal::Keep,
        10,
    )
    .unwrap_err();
    assert!(matches!(err, FlipbookError::InvalidPatch(_)));
}

#[test]
fn filled_patch_is_uniform() {
    let p = RawPatch::filled(PatchRect::new(0, 0, 3, 1), [9, 8, 7, 255], Disposal::Keep, 0);
    assert!(p.pixels().pixels().all(|px| px.0 == [9, 8, 7, 255]));
}

#[test]
fn zero_sized_patch_is_allowed() {
    let p = RawPatch::new(PatchRect::new(4, 4, 0, 0), Vec::new(), Disposal::Keep, 10).unwrap();
    assert_eq!(p.extent(), Canvas::new(4, 4));
}
