use super::*;
use std::borrow::Cow;

struct Block {
    rect: (u16, u16, u16, u16),
    rgb: [u8; 3],
    dispose: ::gif::DisposalMethod,
    delay: u16,
}

fn encode(width: u16, height: u16, blocks: &[Block]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = ::gif::Encoder::new(&mut out, width, height, &[]).unwrap();
        for b in blocks {
            let (left, top, w, h) = b.rect;
            let frame = ::gif::Frame {
                left,
                top,
                width: w,
                height: h,
                delay: b.delay,
                dispose: b.dispose,
                palette: Some(vec![b.rgb[0], b.rgb[1], b.rgb[2], 0, 0, 0]),
                buffer: Cow::Owned(vec![0; usize::from(w) * usize::from(h)]),
                ..::gif::Frame::default()
            };
            enc.write_frame(&frame).unwrap();
        }
    }
    out
}

#[test]
fn decodes_rects_disposal_and_delay() {
    let bytes = encode(
        4,
        3,
        &[
            Block {
                rect: (0, 0, 4, 3),
                rgb: [255, 0, 0],
                dispose: ::gif::DisposalMethod::Background,
                delay: 5,
            },
            Block {
                rect: (1, 1, 2, 1),
                rgb: [0, 255, 0],
                dispose: ::gif::DisposalMethod::Keep,
                delay: 12,
            },
        ],
    );

    let decoded = decode_gif(&bytes).unwrap();
    assert_eq!(decoded.screen, Canvas::new(4, 3));
    assert_eq!(decoded.patches.len(), 2);

    let first = &decoded.patches[0];
    assert_eq!(first.rect(), PatchRect::new(0, 0, 4, 3));
    assert_eq!(first.disposal(), Disposal::Background);
    assert_eq!(first.delay_ms(), 50);
    assert_eq!(first.pixels().get_pixel(3, 2).0, [255, 0, 0, 255]);

    let second = &decoded.patches[1];
    assert_eq!(second.rect(), PatchRect::new(1, 1, 2, 1));
    assert_eq!(second.disposal(), Disposal::Keep);
    assert_eq!(second.delay_ms(), 120);
    assert_eq!(second.pixels().get_pixel(1, 0).0, [0, 255, 0, 255]);
}

#[test]
fn garbage_bytes_fail_as_other() {
    let err = decode_gif(b"definitely not a gif").unwrap_err();
    assert!(matches!(err, FlipbookError::Other(_)));
    assert!(err.to_string().contains("gif header"));
}
