use crate::StreamKind;
use sense_base::Vec2;
use sense_image::{ImageError, PixelFormat};
use std::{fmt, time::Duration};

/// Failure reported by a device layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// A bounded wait expired with no stream ready.
    Timeout(Duration),
    /// `read_frame` found nothing new since the last read.
    NoFrame,
    /// The device was shut down or unplugged.
    Disconnected,
    Driver(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Timeout(after) => write!(f, "no stream ready after {after:?}"),
            DeviceError::NoFrame => write!(f, "no new frame"),
            DeviceError::Disconnected => write!(f, "device disconnected"),
            DeviceError::Driver(msg) => write!(f, "driver error: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Session could not be set up; no tick will run.
#[derive(Debug)]
pub enum SetupError {
    Config(String),
    /// Color and depth native resolutions differ.
    GeometryMismatch {
        color: Vec2<usize>,
        depth: Vec2<usize>,
    },
    PixelFormat {
        stream: StreamKind,
        expected: PixelFormat,
        actual: PixelFormat,
    },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Config(msg) => write!(f, "config error: {msg}"),
            SetupError::GeometryMismatch { color, depth } => write!(
                f,
                "color and depth must have the same resolution: color {color}, depth {depth}"
            ),
            SetupError::PixelFormat {
                stream,
                expected,
                actual,
            } => write!(f, "{stream} stream delivers {actual}, expected {expected}"),
        }
    }
}

impl std::error::Error for SetupError {}

/// A wait or read failed; the link is considered unhealthy.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionError {
    Wait {
        stream: StreamKind,
        source: DeviceError,
    },
    Timeout {
        stream: StreamKind,
        after: Duration,
    },
    Read {
        stream: StreamKind,
        source: DeviceError,
    },
}

impl AcquisitionError {
    /// The stream being serviced when the failure happened.
    pub fn stream(&self) -> StreamKind {
        match self {
            AcquisitionError::Wait { stream, .. }
            | AcquisitionError::Timeout { stream, .. }
            | AcquisitionError::Read { stream, .. } => *stream,
        }
    }
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionError::Wait { stream, source } => {
                write!(f, "wait for {stream} data failed: {source}")
            }
            AcquisitionError::Timeout { stream, after } => {
                write!(f, "no {stream} data within {after:?}")
            }
            AcquisitionError::Read { stream, source } => {
                write!(f, "unable to get {stream} data: {source}")
            }
        }
    }
}

impl std::error::Error for AcquisitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AcquisitionError::Wait { source, .. } | AcquisitionError::Read { source, .. } => {
                Some(source)
            }
            AcquisitionError::Timeout { .. } => None,
        }
    }
}

/// Why a tick was aborted. Nothing is published for an aborted tick.
#[derive(Debug)]
pub enum TickError {
    /// Fatal for the tick; the session needs an external restart.
    Acquisition(AcquisitionError),
    /// A pulled frame did not fit the session's buffers.
    Map {
        stream: StreamKind,
        source: ImageError,
    },
}

impl TickError {
    pub fn is_acquisition(&self) -> bool {
        matches!(self, TickError::Acquisition(_))
    }
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::Acquisition(err) => write!(f, "acquisition failed: {err}"),
            TickError::Map { stream, source } => write!(f, "{stream} frame rejected: {source}"),
        }
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TickError::Acquisition(err) => Some(err),
            TickError::Map { source, .. } => Some(source),
        }
    }
}

impl From<AcquisitionError> for TickError {
    fn from(err: AcquisitionError) -> Self {
        TickError::Acquisition(err)
    }
}
