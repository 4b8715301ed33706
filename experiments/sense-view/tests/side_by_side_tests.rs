use sense_base::Vec2;
use sense_image::DisplayFrame;
use sense_stream::{DisplaySink, StreamKind};
use sense_view::SideBySide;

fn frame(size: Vec2<usize>, data: &[u8]) -> DisplayFrame<'_> {
    DisplayFrame { size, data }
}

#[test]
fn test_window_is_twice_as_wide() {
    let view = SideBySide::new(Vec2::new(4, 3));
    assert_eq!(view.size(), Vec2::new(8, 3));
    assert_eq!(view.buffer().len(), 24);
}

#[test]
fn test_color_left_depth_right() {
    let mut view = SideBySide::new(Vec2::new(1, 1));

    // B, G, R, A quads
    view.publish(StreamKind::Color, frame(Vec2::new(1, 1), &[0x00, 0x00, 0xFF, 0xFF]));
    view.publish(StreamKind::Depth, frame(Vec2::new(1, 1), &[0x2C, 0x01, 0x00, 0xFF]));

    assert_eq!(view.buffer(), &[0xFFFF0000, 0xFF00012C]);
}

#[test]
fn test_rows_land_at_window_stride() {
    let mut view = SideBySide::new(Vec2::new(1, 2));
    view.publish(
        StreamKind::Depth,
        frame(Vec2::new(1, 2), &[1, 0, 0, 0xFF, 2, 0, 0, 0xFF]),
    );

    assert_eq!(view.buffer(), &[0, 0xFF000001, 0, 0xFF000002]);
}

#[test]
fn test_oversized_frame_is_dropped() {
    let mut view = SideBySide::new(Vec2::new(1, 1));
    view.publish(StreamKind::Depth, frame(Vec2::new(2, 1), &[9; 8]));
    assert_eq!(view.buffer(), &[0, 0]);
}

mod snapshots {
    use sense_base::Vec2;
    use sense_image::{OwnedFrame, PixelFormat, Rgb888};
    use sense_stream::{SensorConfig, Session, VideoMode, scripted::scripted};
    use sense_view::{SideBySide, SnapshotError, take_snapshot};
    use std::{fs, path::PathBuf};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sense-view-{}-{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn modes(size: Vec2<usize>) -> (VideoMode, VideoMode) {
        (
            VideoMode { size, fps: 30, format: PixelFormat::Rgb888 },
            VideoMode { size, fps: 30, format: PixelFormat::Depth1Mm },
        )
    }

    #[test]
    fn test_failed_tick_saves_nothing() {
        let dir = scratch_dir("failed");
        let size = Vec2::new(2, 1);
        let (color_mode, depth_mode) = modes(size);
        let (script, device, color, depth) = scripted(color_mode, depth_mode);
        let mut session = Session::new(device, color, depth, &SensorConfig::default()).unwrap();
        let mut view = SideBySide::new(size);

        script.push_pair(
            OwnedFrame::rgb(size, vec![Rgb888::new(1, 2, 3); 2]),
            OwnedFrame::depth(size, vec![0, 300]),
        );
        script.fail_waits(1);

        match take_snapshot(&mut session, &mut view, &dir) {
            Err(SnapshotError::Tick(err)) => assert!(err.is_acquisition()),
            other => panic!("Expected tick failure, got {other:?}"),
        }
        assert!(!dir.join("color.png").exists());
        assert!(!dir.join("depth.png").exists());
        assert_eq!(view.buffer(), &[0, 0, 0, 0]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_successful_tick_saves_both_views() {
        let dir = scratch_dir("saved");
        let size = Vec2::new(2, 1);
        let (color_mode, depth_mode) = modes(size);
        let (script, device, color, depth) = scripted(color_mode, depth_mode);
        let mut session = Session::new(device, color, depth, &SensorConfig::default()).unwrap();
        let mut view = SideBySide::new(size);

        script.push_pair(
            OwnedFrame::rgb(size, vec![Rgb888::new(1, 2, 3); 2]),
            OwnedFrame::depth(size, vec![0, 300]),
        );

        let report = take_snapshot(&mut session, &mut view, &dir).unwrap();
        assert_eq!(report.tick, 1);
        assert!(dir.join("color.png").exists());
        assert!(dir.join("depth.png").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
