use crate::{
    DisplayBuffer, DisplayFrame, FrameSamples, ImageError, NativePixel, PixelFormat, SensorFrame,
    TileBuffer,
};
use sense_base::Vec2;

/// Direct-map path for one stream: owns that stream's tile and display
/// buffers for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct FrameMapper {
    format: PixelFormat,
    native: Vec2<usize>,
    tile: TileBuffer,
    display: DisplayBuffer,
}

/// A frame that passed `FrameMapper::check` and can be written without
/// further checks.
#[derive(Debug, Clone, Copy)]
pub struct CheckedFrame<'f, 'a> {
    frame: &'f SensorFrame<'a>,
}

impl<'f, 'a> CheckedFrame<'f, 'a> {
    pub fn frame(&self) -> &'f SensorFrame<'a> {
        self.frame
    }
}

impl FrameMapper {
    pub fn new(format: PixelFormat, native: Vec2<usize>, tile_size: usize) -> Self {
        Self {
            format,
            native,
            tile: TileBuffer::new(native, tile_size),
            display: DisplayBuffer::new(native),
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn native(&self) -> Vec2<usize> {
        self.native
    }

    pub fn tile(&self) -> &TileBuffer {
        &self.tile
    }

    pub fn display(&self) -> DisplayFrame<'_> {
        self.display.as_frame()
    }

    /// Check format, layout, size and tile bounds without touching either
    /// buffer.
    pub fn check<'f, 'a>(
        &self,
        frame: &'f SensorFrame<'a>,
    ) -> Result<CheckedFrame<'f, 'a>, ImageError> {
        if frame.format() != self.format {
            return Err(ImageError::Format {
                expected: self.format,
                actual: frame.format(),
            });
        }
        frame.validate()?;

        if frame.size.x > self.native.x || frame.size.y > self.native.y {
            return Err(ImageError::Oversized {
                size: frame.size,
                native: self.native,
            });
        }

        let tile = self.tile.size();
        let out_of_tile = ImageError::OutOfTile {
            origin: frame.crop_origin,
            size: frame.size,
            tile,
        };
        let end_x = frame.crop_origin.x.checked_add(frame.size.x);
        let end_y = frame.crop_origin.y.checked_add(frame.size.y);
        match (end_x, end_y) {
            (Some(x), Some(y)) if x <= tile.x && y <= tile.y => Ok(CheckedFrame { frame }),
            _ => Err(out_of_tile),
        }
    }

    /// Copy a checked frame's valid rectangle into the tile buffer at its
    /// crop origin and rebuild the display buffer from it.
    pub fn write(&mut self, checked: CheckedFrame<'_, '_>) {
        let frame = checked.frame;
        log::trace!(
            "{} crop origin {}, {}",
            self.format,
            frame.crop_origin.x,
            frame.crop_origin.y
        );
        match frame.samples {
            FrameSamples::Rgb(samples) => self.map_samples(frame, samples),
            FrameSamples::Depth(samples) => self.map_samples(frame, samples),
        }
    }

    /// `check` then `write`. A rejected frame leaves both buffers as they
    /// were.
    pub fn map(&mut self, frame: &SensorFrame<'_>) -> Result<(), ImageError> {
        let checked = self.check(frame)?;
        self.write(checked);
        Ok(())
    }

    fn map_samples<P: NativePixel>(&mut self, frame: &SensorFrame<'_>, samples: &[P]) {
        let Vec2 { x: width, y: height } = frame.size;
        let origin = frame.crop_origin;

        self.tile.clear();
        self.display.begin();

        for y in 0..height {
            let src = &samples[y * frame.stride..y * frame.stride + width];
            let dst = &mut self.tile.row_mut(origin.y + y)[origin.x..origin.x + width];
            for (cell, &sample) in dst.iter_mut().zip(src) {
                *cell = sample.to_tile();
                self.display.push(sample.to_display());
            }
        }
        self.display.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb888;

    #[test]
    fn test_two_sample_depth_row() {
        let samples = [0u16, 300];
        let frame = SensorFrame::packed(Vec2::new(2, 1), FrameSamples::Depth(&samples));
        let mut mapper = FrameMapper::new(PixelFormat::Depth1Mm, Vec2::new(2, 1), 4);

        mapper.map(&frame).unwrap();

        assert_eq!(mapper.tile().cell(0, 0), Some(Rgb888::new(0, 0, 0)));
        assert_eq!(mapper.tile().cell(1, 0), Some(Rgb888::new(44, 1, 0)));
        assert_eq!(
            mapper.display().data,
            &[0x00, 0x00, 0x00, 0xFF, 0x2C, 0x01, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_rejected_frame_leaves_buffers() {
        let good = [Rgb888::new(10, 20, 30)];
        let mut mapper = FrameMapper::new(PixelFormat::Rgb888, Vec2::new(1, 1), 2);
        mapper
            .map(&SensorFrame::packed(Vec2::new(1, 1), FrameSamples::Rgb(&good)))
            .unwrap();
        let before = mapper.display().data.to_vec();

        let frame = SensorFrame {
            size: Vec2::new(1, 1),
            crop_origin: Vec2::new(2, 0),
            stride: 1,
            samples: FrameSamples::Rgb(&good),
        };
        assert!(matches!(mapper.map(&frame), Err(ImageError::OutOfTile { .. })));
        assert_eq!(mapper.display().data, &before[..]);
        assert_eq!(mapper.tile().cell(0, 0), Some(Rgb888::new(10, 20, 30)));
    }
}
