use crate::{ImageError, PixelFormat, Rgb888};
use sense_base::Vec2;

/// Samples of one frame, borrowed from the stream that produced them.
#[derive(Debug, Clone, Copy)]
pub enum FrameSamples<'a> {
    Rgb(&'a [Rgb888]),
    Depth(&'a [u16]),
}

impl FrameSamples<'_> {
    pub fn format(&self) -> PixelFormat {
        match self {
            FrameSamples::Rgb(_) => PixelFormat::Rgb888,
            FrameSamples::Depth(_) => PixelFormat::Depth1Mm,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FrameSamples::Rgb(samples) => samples.len(),
            FrameSamples::Depth(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One captured image.
///
/// The frame borrows the stream's sample memory, so it cannot outlive the
/// next read on that stream. `crop_origin` places the valid `size` rectangle
/// inside the sensor's full field of view; `stride` is the distance between
/// row starts, in samples.
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame<'a> {
    pub size: Vec2<usize>,
    pub crop_origin: Vec2<usize>,
    pub stride: usize,
    pub samples: FrameSamples<'a>,
}

impl<'a> SensorFrame<'a> {
    /// Tightly packed, uncropped frame.
    pub fn packed(size: Vec2<usize>, samples: FrameSamples<'a>) -> Self {
        Self {
            size,
            crop_origin: Vec2::zero(),
            stride: size.x,
            samples,
        }
    }

    /// View raw device bytes as a frame of `format`.
    ///
    /// `stride_bytes` is the row pitch reported by the device. Depth bytes
    /// must be 2-byte aligned.
    pub fn from_bytes(
        format: PixelFormat,
        size: Vec2<usize>,
        crop_origin: Vec2<usize>,
        stride_bytes: usize,
        bytes: &'a [u8],
    ) -> Result<Self, ImageError> {
        let bytes_per_sample = format.bytes_per_sample();
        if stride_bytes % bytes_per_sample != 0 {
            return Err(ImageError::Layout(format!(
                "row pitch {stride_bytes} is not a whole number of {format} samples"
            )));
        }
        // trailing partial samples are dropped
        let usable = bytes.len() - bytes.len() % bytes_per_sample;
        let samples = match format {
            PixelFormat::Rgb888 => FrameSamples::Rgb(bytemuck::try_cast_slice(&bytes[..usable])?),
            PixelFormat::Depth1Mm => {
                FrameSamples::Depth(bytemuck::try_cast_slice(&bytes[..usable])?)
            }
        };
        let frame = Self {
            size,
            crop_origin,
            stride: stride_bytes / bytes_per_sample,
            samples,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn format(&self) -> PixelFormat {
        self.samples.format()
    }

    /// Number of samples the declared geometry reads.
    ///
    /// Fails with `ImageError::Layout` if the geometry overflows `usize`.
    pub fn required_samples(&self) -> Result<usize, ImageError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Ok(0);
        }
        (self.size.y - 1)
            .checked_mul(self.stride)
            .and_then(|rows| rows.checked_add(self.size.x))
            .ok_or_else(|| {
                ImageError::Layout(format!(
                    "{} frame with stride {} overflows",
                    self.size, self.stride
                ))
            })
    }

    /// Check that every declared row lies inside the sample data.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.size.y > 0 && self.stride < self.size.x {
            return Err(ImageError::Stride {
                stride: self.stride,
                width: self.size.x,
            });
        }
        let needed = self.required_samples()?;
        let available = self.samples.len();
        if available < needed {
            return Err(ImageError::Truncated { needed, available });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnedSamples {
    Rgb(Vec<Rgb888>),
    Depth(Vec<u16>),
}

/// A frame that owns its samples, for device layers that copy out of driver
/// memory and for synthetic sources.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedFrame {
    pub size: Vec2<usize>,
    pub crop_origin: Vec2<usize>,
    pub stride: usize,
    pub samples: OwnedSamples,
}

impl OwnedFrame {
    pub fn rgb(size: Vec2<usize>, samples: Vec<Rgb888>) -> Self {
        Self {
            size,
            crop_origin: Vec2::zero(),
            stride: size.x,
            samples: OwnedSamples::Rgb(samples),
        }
    }

    pub fn depth(size: Vec2<usize>, samples: Vec<u16>) -> Self {
        Self {
            size,
            crop_origin: Vec2::zero(),
            stride: size.x,
            samples: OwnedSamples::Depth(samples),
        }
    }

    pub fn with_crop_origin(mut self, crop_origin: Vec2<usize>) -> Self {
        self.crop_origin = crop_origin;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn format(&self) -> PixelFormat {
        match self.samples {
            OwnedSamples::Rgb(_) => PixelFormat::Rgb888,
            OwnedSamples::Depth(_) => PixelFormat::Depth1Mm,
        }
    }

    pub fn as_frame(&self) -> SensorFrame<'_> {
        SensorFrame {
            size: self.size,
            crop_origin: self.crop_origin,
            stride: self.stride,
            samples: match &self.samples {
                OwnedSamples::Rgb(samples) => FrameSamples::Rgb(samples),
                OwnedSamples::Depth(samples) => FrameSamples::Depth(samples),
            },
        }
    }
}
