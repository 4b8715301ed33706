use crate::{Rgb888, pixel::OPAQUE};
use sense_base::Vec2;

/// Intermediate buffer of packed triples whose dimensions are the smallest
/// multiples of `tile_size` covering the native resolution.
#[derive(Debug, Clone)]
pub struct TileBuffer {
    size: Vec2<usize>,
    cells: Vec<Rgb888>,
}

impl TileBuffer {
    pub fn new(native: Vec2<usize>, tile_size: usize) -> Self {
        let size = native.round_up_to(tile_size);
        Self {
            size,
            cells: vec![Rgb888::default(); size.area()],
        }
    }

    /// Tile-aligned dimensions.
    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn clear(&mut self) {
        self.cells.fill(Rgb888::default());
    }

    pub fn cells(&self) -> &[Rgb888] {
        &self.cells
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Rgb888> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        Some(self.cells[y * self.size.x + x])
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Rgb888] {
        let start = y * self.size.x;
        &mut self.cells[start..start + self.size.x]
    }
}

/// Tightly packed 4-byte display pixels for one stream.
///
/// Always native width x height x 4 bytes. Starts out opaque black; every
/// successful map writes the frame's quads from the start in row order and
/// resets the rest to opaque black.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    size: Vec2<usize>,
    data: Vec<u8>,
}

impl DisplayBuffer {
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            data: [0, 0, 0, OPAQUE].repeat(size.area()),
        }
    }

    pub(crate) fn begin(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, quad: [u8; 4]) {
        self.data.extend_from_slice(&quad);
    }

    /// Pad with opaque black up to the native length.
    pub(crate) fn finish(&mut self) {
        let len = self.size.area() * 4;
        self.data.truncate(len);
        while self.data.len() < len {
            self.data.extend_from_slice(&[0, 0, 0, OPAQUE]);
        }
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn as_frame(&self) -> DisplayFrame<'_> {
        DisplayFrame {
            size: self.size,
            data: &self.data,
        }
    }
}

/// Read-only view of a display buffer handed to a rendering surface.
///
/// The memory is overwritten by the next tick; consumers copy what they keep.
#[derive(Debug, Clone, Copy)]
pub struct DisplayFrame<'a> {
    pub size: Vec2<usize>,
    pub data: &'a [u8],
}

impl DisplayFrame<'_> {
    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Pixel at (x, y) as stored: B, G, R, A for color.
    pub fn quad(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 4;
        self.data.get(i..i + 4).map(|q| [q[0], q[1], q[2], q[3]])
    }
}
