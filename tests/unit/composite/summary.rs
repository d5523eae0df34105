use super::*;
use crate::{
    composite::compositor::composite, decode::patch::RawPatch, foundation::core::PatchRect,
};

#[test]
fn summary_mirrors_frame_timing() {
    let patches = vec![
        RawPatch::filled(PatchRect::new(0, 0, 3, 2), [1, 2, 3, 255], Disposal::Keep, 40),
        RawPatch::filled(PatchRect::new(0, 0, 1, 1), [1, 2, 3, 255], Disposal::Background, 60),
    ];
    let frames = composite(&patches).unwrap();
    let summary = AnimationSummary::from_frames(&frames);

    assert_eq!(summary.canvas, Canvas::new(3, 2));
    assert_eq!(summary.frame_count, 2);
    assert_eq!(summary.duration_ms, 100);
    assert_eq!(
        summary.frames[1],
        FrameSummary {
            index: 1,
            start_ms: 40,
            delay_ms: 60,
            disposal: Disposal::Background,
        }
    );
}

#[test]
fn summary_json_names_fields() {
    let frames = composite(&[RawPatch::filled(
        PatchRect::new(0, 0, 1, 1),
        [0, 0, 0, 255],
        Disposal::Unspecified,
        20,
    )])
    .unwrap();
    let json = AnimationSummary::from_frames(&frames).to_json_pretty().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["duration_ms"], 20);
    assert_eq!(v["frames"][0]["disposal"], "unspecified");
    assert_eq!(v["canvas"]["width"], 1);
}
