use crate::DeviceError;
use sense_base::Vec2;
use sense_image::{DisplayFrame, PixelFormat, SensorFrame};
use std::{fmt, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Color,
    Depth,
}

impl StreamKind {
    /// Native encoding a stream of this kind must deliver.
    pub fn expected_format(&self) -> PixelFormat {
        match self {
            StreamKind::Color => PixelFormat::Rgb888,
            StreamKind::Depth => PixelFormat::Depth1Mm,
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Color => write!(f, "color"),
            StreamKind::Depth => write!(f, "depth"),
        }
    }
}

/// Resolution, rate and encoding a stream was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    pub size: Vec2<usize>,
    pub fps: u32,
    pub format: PixelFormat,
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}fps, {}", self.size, self.fps, self.format)
    }
}

/// One live channel of frames.
pub trait SensorStream {
    fn kind(&self) -> StreamKind;

    fn video_mode(&self) -> VideoMode;

    /// Latch the next frame without blocking.
    ///
    /// Fails with `DeviceError::NoFrame` if nothing arrived since the last
    /// read. A successful read invalidates the previously latched frame.
    fn read_frame(&mut self) -> Result<(), DeviceError>;

    /// The latched frame, valid until the next `read_frame`.
    fn frame(&self) -> Option<SensorFrame<'_>>;
}

/// The driver side of a sensor: blocks on a set of its streams.
pub trait SensorDevice {
    type Stream: SensorStream;

    fn name(&self) -> &str;

    /// Block until at least one of `streams` has a frame ready and return its
    /// index in `streams`.
    ///
    /// The block happens inside this call; callers never poll. `None` waits
    /// forever.
    fn wait_for_any(
        &self,
        streams: &[&Self::Stream],
        timeout: Option<Duration>,
    ) -> Result<usize, DeviceError>;

    /// Stop the streams and release the driver. Called once at teardown.
    fn shutdown(&mut self) {}
}

/// Rendering surface fed once per stream per successful tick.
///
/// `frame` is overwritten by the next tick, so a sink copies or fully
/// consumes it before returning.
pub trait DisplaySink {
    fn publish(&mut self, stream: StreamKind, frame: DisplayFrame<'_>);
}
