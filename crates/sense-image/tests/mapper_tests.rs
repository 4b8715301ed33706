use sense_base::Vec2;
use sense_image::{FrameMapper, FrameSamples, ImageError, PixelFormat, Rgb888, SensorFrame};

fn depth_frame(size: Vec2<usize>, origin: Vec2<usize>, stride: usize, samples: &[u16]) -> SensorFrame<'_> {
    SensorFrame {
        size,
        crop_origin: origin,
        stride,
        samples: FrameSamples::Depth(samples),
    }
}

#[test]
fn test_color_frame_is_bgra() {
    let samples = [Rgb888::new(1, 2, 3), Rgb888::new(200, 100, 50)];
    let frame = SensorFrame::packed(Vec2::new(2, 1), FrameSamples::Rgb(&samples));
    let mut mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(2, 1), 512);

    mapper.map(&frame).unwrap();

    assert_eq!(mapper.display().data, &[3, 2, 1, 0xFF, 50, 100, 200, 0xFF]);
    assert_eq!(mapper.tile().cell(1, 0), Some(Rgb888::new(200, 100, 50)));
}

#[test]
fn test_tile_size_rounds_each_axis() {
    let mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(640, 480), 512);
    assert_eq!(mapper.tile().size(), Vec2::new(1024, 512));
    assert_eq!(mapper.tile().cells().len(), 1024 * 512);
}

#[test]
fn test_crop_writes_only_inside_rectangle() {
    let (cx, cy, w, h) = (3usize, 2usize, 4usize, 3usize);
    let samples: Vec<u16> = (1..=(w * h) as u16).collect();
    let frame = depth_frame(Vec2::new(w, h), Vec2::new(cx, cy), w, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(8, 6), 8);

    mapper.map(&frame).unwrap();

    let tile = mapper.tile();
    for y in 0..tile.size().y {
        for x in 0..tile.size().x {
            let cell = tile.cell(x, y).unwrap();
            let inside = (cy..cy + h).contains(&y) && (cx..cx + w).contains(&x);
            if inside {
                let d = samples[(y - cy) * w + (x - cx)];
                assert_eq!(cell, Rgb888::new((d % 256) as u8, (d / 256) as u8, 0));
            } else {
                assert_eq!(cell, Rgb888::default(), "cell ({x}, {y}) should be untouched");
            }
        }
    }
}

#[test]
fn test_stride_padding_is_skipped() {
    // 2x2 frame in rows of 4 samples; the padding holds values that must not appear
    let samples = [10u16, 20, 999, 999, 30, 40, 999, 999];
    let frame = depth_frame(Vec2::new(2, 2), Vec2::zero(), 4, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(2, 2), 4);

    mapper.map(&frame).unwrap();

    assert_eq!(
        mapper.display().data,
        &[10, 0, 0, 0xFF, 20, 0, 0, 0xFF, 30, 0, 0, 0xFF, 40, 0, 0, 0xFF]
    );
}

#[test]
fn test_last_row_needs_no_padding() {
    // the final row may end right after its last valid sample
    let samples = [1u16, 2, 0, 3, 4];
    let frame = depth_frame(Vec2::new(2, 2), Vec2::zero(), 3, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(2, 2), 2);
    mapper.map(&frame).unwrap();
    assert_eq!(mapper.display().data.len(), 2 * 2 * 4);
}

#[test]
fn test_display_length_ignores_crop_and_stride() {
    let samples = vec![Rgb888::new(9, 9, 9); 7 * 5];
    let frame = SensorFrame {
        size: Vec2::new(5, 5),
        crop_origin: Vec2::new(6, 1),
        stride: 7,
        samples: FrameSamples::Rgb(&samples),
    };
    let mut mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(5, 5), 16);

    mapper.map(&frame).unwrap();

    let display = mapper.display();
    assert_eq!(display.data.len(), 5 * 5 * 4);
    assert_eq!(display.size, Vec2::new(5, 5));
}

#[test]
fn test_smaller_frame_keeps_native_display_length() {
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(3, 2), 4);

    let full = [900u16; 6];
    mapper
        .map(&depth_frame(Vec2::new(3, 2), Vec2::zero(), 3, &full))
        .unwrap();
    let samples = [1u16, 2];
    mapper
        .map(&depth_frame(Vec2::new(2, 1), Vec2::new(1, 1), 2, &samples))
        .unwrap();

    let display = mapper.display();
    assert_eq!(display.size, Vec2::new(3, 2));
    assert_eq!(display.data.len(), 3 * 2 * 4);
    assert_eq!(&display.data[..8], &[1, 0, 0, 0xFF, 2, 0, 0, 0xFF]);
    // nothing left over from the first frame
    assert!(display.data[8..].chunks_exact(4).all(|q| q == [0, 0, 0, 0xFF]));
}

#[test]
fn test_frame_larger_than_native_is_rejected() {
    let samples = [5u16; 16];
    let frame = depth_frame(Vec2::new(4, 4), Vec2::zero(), 4, &samples);
    // fits the 4x4 tile, but not the 4x3 native resolution
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(4, 3), 4);

    match mapper.map(&frame) {
        Err(ImageError::Oversized { size, native }) => {
            assert_eq!(size, Vec2::new(4, 4));
            assert_eq!(native, Vec2::new(4, 3));
        }
        other => panic!("Expected ImageError::Oversized, got {other:?}"),
    }
    let display = mapper.display();
    assert_eq!(display.data.len(), 4 * 3 * 4);
    assert!(display.data.chunks_exact(4).all(|q| q == [0, 0, 0, 0xFF]));
}

#[test]
fn test_overflowing_crop_is_rejected() {
    let samples = [1u16];
    let frame = depth_frame(Vec2::new(1, 1), Vec2::new(usize::MAX, 0), 1, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(1, 1), 2);

    assert!(matches!(mapper.map(&frame), Err(ImageError::OutOfTile { .. })));
}

#[test]
fn test_check_does_not_write() {
    let samples = [300u16];
    let frame = depth_frame(Vec2::new(1, 1), Vec2::zero(), 1, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(1, 1), 1);

    let checked = mapper.check(&frame).unwrap();
    assert_eq!(mapper.display().data, &[0, 0, 0, 0xFF]);

    mapper.write(checked);
    assert_eq!(mapper.display().data, &[0x2C, 0x01, 0x00, 0xFF]);
}

#[test]
fn test_tile_is_zeroed_between_maps() {
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(2, 2), 4);

    let first = [500u16; 4];
    mapper
        .map(&depth_frame(Vec2::new(2, 2), Vec2::zero(), 2, &first))
        .unwrap();

    let second = [7u16];
    mapper
        .map(&depth_frame(Vec2::new(1, 1), Vec2::new(1, 1), 1, &second))
        .unwrap();

    assert_eq!(mapper.tile().cell(0, 0), Some(Rgb888::default()));
    assert_eq!(mapper.tile().cell(1, 1), Some(Rgb888::new(7, 0, 0)));
}

#[test]
fn test_wrong_format_is_rejected() {
    let samples = [1u16];
    let frame = SensorFrame::packed(Vec2::new(1, 1), FrameSamples::Depth(&samples));
    let mut mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(1, 1), 1);

    match mapper.map(&frame) {
        Err(ImageError::Format { expected, actual }) => {
            assert_eq!(expected, PixelFormat::Rgb888);
            assert_eq!(actual, PixelFormat::Depth1Mm);
        }
        other => panic!("Expected ImageError::Format, got {other:?}"),
    }
}

#[test]
fn test_truncated_frame_is_rejected() {
    let samples = [1u16, 2, 3];
    let frame = depth_frame(Vec2::new(2, 2), Vec2::zero(), 2, &samples);
    let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(2, 2), 2);

    assert!(matches!(
        mapper.map(&frame),
        Err(ImageError::Truncated { needed: 4, available: 3 })
    ));
}

#[test]
fn test_initial_display_is_opaque_black() {
    let mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(3, 2), 4);
    let display = mapper.display();
    assert_eq!(display.data.len(), 3 * 2 * 4);
    assert!(display.data.chunks_exact(4).all(|q| q == [0, 0, 0, 0xFF]));
}
