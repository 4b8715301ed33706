use crate::PixelFormat;
use sense_base::Vec2;
use std::fmt;

#[derive(Debug)]
pub enum ImageError {
    /// Frame encoding differs from what the buffer was set up for.
    Format {
        expected: PixelFormat,
        actual: PixelFormat,
    },
    /// Row stride (in samples) shorter than the frame width.
    Stride { stride: usize, width: usize },
    /// Sample data ends before the last declared row.
    Truncated { needed: usize, available: usize },
    /// Raw bytes cannot be viewed as samples of the declared format.
    Layout(String),
    /// Crop rectangle does not fit inside the tile buffer.
    OutOfTile {
        origin: Vec2<usize>,
        size: Vec2<usize>,
        tile: Vec2<usize>,
    },
    /// Frame is larger than the native resolution the buffers were sized for.
    Oversized {
        size: Vec2<usize>,
        native: Vec2<usize>,
    },
    /// Display bytes do not match the declared width and height.
    Size { expected: usize, actual: usize },
    Encode(crates_image::ImageError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Format { expected, actual } => {
                write!(f, "format error: expected {expected}, got {actual}")
            }
            ImageError::Stride { stride, width } => {
                write!(f, "stride error: stride {stride} is shorter than width {width}")
            }
            ImageError::Truncated { needed, available } => write!(
                f,
                "truncated frame: need {needed} samples, have {available}"
            ),
            ImageError::Layout(msg) => write!(f, "layout error: {msg}"),
            ImageError::OutOfTile { origin, size, tile } => write!(
                f,
                "crop {size} at ({}, {}) does not fit tile buffer {tile}",
                origin.x, origin.y
            ),
            ImageError::Oversized { size, native } => {
                write!(f, "frame {size} exceeds native resolution {native}")
            }
            ImageError::Size { expected, actual } => {
                write!(f, "size error: expected {expected} bytes, got {actual}")
            }
            ImageError::Encode(err) => write!(f, "encode error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Encode(err)
    }
}

impl From<bytemuck::PodCastError> for ImageError {
    fn from(err: bytemuck::PodCastError) -> Self {
        ImageError::Layout(format!("{err:?}"))
    }
}
