use super::*;

#[test]
fn disposal_codes_roundtrip_including_reserved() {
    for code in 0u8..8 {
        assert_eq!(Disposal::from_code(code).code(), code);
    }
    assert_eq!(Disposal::from_code(2), Disposal::Background);
    assert_eq!(Disposal::from_code(6), Disposal::Reserved(6));
}

#[test]
fn only_background_clears() {
    assert!(Disposal::Background.clears_canvas());
    assert!(!Disposal::Unspecified.clears_canvas());
    assert!(!Disposal::Keep.clears_canvas());
    assert!(!Disposal::Previous.clears_canvas());
    assert!(!Disposal::Reserved(5).clears_canvas());
}

#[test]
fn rect_extent_adds_offset() {
    let r = PatchRect::new(3, 4, 10, 2);
    assert_eq!(r.extent(), Canvas::new(13, 6));
    assert_eq!(r.num_pixels(), 20);
    assert_eq!(r.checked_extent(), Some(Canvas::new(13, 6)));
}

#[test]
fn checked_extent_rejects_overflowing_edges() {
    assert_eq!(PatchRect::new(u32::MAX, 0, 1, 1).checked_extent(), None);
    assert_eq!(PatchRect::new(0, u32::MAX - 1, 1, 2).checked_extent(), None);
    assert_eq!(
        PatchRect::new(u32::MAX - 1, 0, 1, 0).checked_extent(),
        Some(Canvas::new(u32::MAX, 0))
    );
}

#[test]
fn canvas_union_is_componentwise_max() {
    let a = Canvas::new(10, 2);
    let b = Canvas::new(4, 8);
    assert_eq!(a.union(b), Canvas::new(10, 8));
}

#[test]
fn disposal_serializes_snake_case() {
    let json = serde_json::to_string(&Disposal::Background).unwrap();
    assert_eq!(json, "\"background\"");
}
