//! Synchronized color/depth acquisition.
//!
//! A `Session` owns one sensor device with its color and depth streams. Each
//! `tick` waits for both streams, pulls one frame from each, maps them into
//! display buffers according to the current `Mode`, and publishes the buffers
//! to a `DisplaySink`.

pub mod config;
pub mod device;
pub mod error;
pub mod mode;
pub mod scripted;
pub mod session;
pub mod sync;
pub mod synthetic;

pub use config::SensorConfig;
pub use device::{DisplaySink, SensorDevice, SensorStream, StreamKind, VideoMode};
pub use error::{AcquisitionError, DeviceError, SetupError, TickError};
pub use mode::{Mode, StreamPolicy, Unsupported, WarpKind};
pub use session::{Session, TickReport};
pub use sync::StreamSynchronizer;
pub use synthetic::{SyntheticDevice, SyntheticStream};
