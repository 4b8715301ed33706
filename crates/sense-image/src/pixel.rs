use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Alpha written into every display pixel.
pub const OPAQUE: u8 = 0xFF;

/// Raw depth value meaning "no measurement returned".
pub const DEPTH_NO_RETURN: u16 = 0;

/// Native sample encodings delivered by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 8-bit R, G, B triple.
    Rgb888,
    /// 16-bit linear depth, one millimeter per unit.
    Depth1Mm,
}

impl PixelFormat {
    /// Size of one native sample in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            PixelFormat::Rgb888 => 3,
            PixelFormat::Depth1Mm => 2,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb888 => write!(f, "RGB888"),
            PixelFormat::Depth1Mm => write!(f, "DEPTH_1_MM"),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A native sample that can be written into a tile cell and a display pixel.
pub trait NativePixel: Copy {
    const FORMAT: PixelFormat;

    /// Value stored in the intermediate tile buffer.
    fn to_tile(self) -> Rgb888;

    /// 4-byte display pixel.
    fn to_display(self) -> [u8; 4];
}

impl NativePixel for Rgb888 {
    const FORMAT: PixelFormat = PixelFormat::Rgb888;

    #[inline]
    fn to_tile(self) -> Rgb888 {
        self
    }

    // channel order is B, G, R
    #[inline]
    fn to_display(self) -> [u8; 4] {
        [self.b, self.g, self.r, OPAQUE]
    }
}

impl NativePixel for u16 {
    const FORMAT: PixelFormat = PixelFormat::Depth1Mm;

    /// Low byte into red, high byte into green. A no-return sample leaves the
    /// cell black.
    #[inline]
    fn to_tile(self) -> Rgb888 {
        if self == DEPTH_NO_RETURN {
            return Rgb888::default();
        }
        let [low, high] = self.to_le_bytes();
        Rgb888::new(low, high, 0)
    }

    /// `(d mod 256, d div 256, 0, 0xFF)`, or opaque black for a no-return
    /// sample. This is a visualization encoding, not a unit conversion.
    #[inline]
    fn to_display(self) -> [u8; 4] {
        let cell = self.to_tile();
        [cell.r, cell.g, cell.b, OPAQUE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channel_order() {
        assert_eq!(Rgb888::new(1, 2, 3).to_display(), [3, 2, 1, 0xFF]);
    }

    #[test]
    fn test_depth_zero_is_opaque_black() {
        assert_eq!(0u16.to_display(), [0, 0, 0, 0xFF]);
        assert_eq!(0u16.to_tile(), Rgb888::default());
    }

    #[test]
    fn test_depth_split_every_value() {
        for d in 1..=u16::MAX {
            let quad = d.to_display();
            assert_eq!(quad, [(d % 256) as u8, (d / 256) as u8, 0, 0xFF]);
        }
    }

    #[test]
    fn test_rgb888_is_three_bytes() {
        assert_eq!(std::mem::size_of::<Rgb888>(), PixelFormat::Rgb888.bytes_per_sample());
    }
}
