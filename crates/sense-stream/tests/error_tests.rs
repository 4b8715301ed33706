use sense_base::Vec2;
use sense_image::{ImageError, PixelFormat};
use sense_stream::{AcquisitionError, DeviceError, SetupError, StreamKind, TickError};
use std::error::Error;
use std::time::Duration;

#[test]
fn test_acquisition_error_display() {
    let err = AcquisitionError::Read {
        stream: StreamKind::Color,
        source: DeviceError::NoFrame,
    };
    assert!(err.to_string().contains("unable to get color data"));
    assert!(err.source().is_some());

    let err = AcquisitionError::Timeout {
        stream: StreamKind::Depth,
        after: Duration::from_millis(100),
    };
    assert!(err.to_string().contains("depth"));
    assert_eq!(err.stream(), StreamKind::Depth);
}

#[test]
fn test_tick_error_from_acquisition() {
    let err: TickError = AcquisitionError::Wait {
        stream: StreamKind::Depth,
        source: DeviceError::Disconnected,
    }
    .into();
    assert!(err.is_acquisition());
    assert!(err.to_string().contains("device disconnected"));
}

#[test]
fn test_map_error_is_not_acquisition() {
    let err = TickError::Map {
        stream: StreamKind::Depth,
        source: ImageError::Truncated { needed: 4, available: 2 },
    };
    assert!(!err.is_acquisition());
    assert!(err.source().is_some());
}

#[test]
fn test_setup_error_display() {
    let err = SetupError::GeometryMismatch {
        color: Vec2::new(640, 480),
        depth: Vec2::new(320, 240),
    };
    let msg = err.to_string();
    assert!(msg.contains("640x480"));
    assert!(msg.contains("320x240"));

    let err = SetupError::PixelFormat {
        stream: StreamKind::Depth,
        expected: PixelFormat::Depth1Mm,
        actual: PixelFormat::Rgb888,
    };
    assert!(err.to_string().contains("depth stream delivers RGB888"));
}
