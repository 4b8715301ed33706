//! Pixel conversion for dual-stream depth/color sensors.
//!
//! Native sensor frames (packed RGB888 color or 16-bit depth) are copied into
//! a tile-aligned intermediate buffer and re-encoded into 4-byte display
//! pixels in the same pass. Display bytes are ordered B, G, R, A for color,
//! which reads as a little-endian `0xAARRGGBB` word.

pub mod buffer;
pub mod convert;
pub mod error;
pub mod frame;
pub mod mapper;
pub mod pixel;
pub mod snapshot;

pub use buffer::{DisplayBuffer, DisplayFrame, TileBuffer};
pub use error::ImageError;
pub use frame::{FrameSamples, OwnedFrame, OwnedSamples, SensorFrame};
pub use mapper::{CheckedFrame, FrameMapper};
pub use pixel::{NativePixel, PixelFormat, Rgb888};
