use crate::{DisplayFrame, ImageError};

fn check_len(frame: &DisplayFrame<'_>) -> Result<(), ImageError> {
    let expected = frame.size.area() * 4;
    if frame.data.len() != expected {
        return Err(ImageError::Size {
            expected,
            actual: frame.data.len(),
        });
    }
    Ok(())
}

/// Pack display quads into `0xAARRGGBB` words for framebuffer windows.
pub fn display_to_u32(frame: &DisplayFrame<'_>) -> Result<Vec<u32>, ImageError> {
    check_len(frame)?;
    Ok(frame
        .data
        .chunks_exact(4)
        .map(|q| u32::from_le_bytes([q[0], q[1], q[2], q[3]]))
        .collect())
}

/// Same as `display_to_u32`, writing into a slice of a wider window buffer.
///
/// `dst` is the window, `dst_width` its row length in pixels, and `x_offset`
/// the column where the frame's left edge lands.
pub fn blit_display_u32(
    frame: &DisplayFrame<'_>,
    dst: &mut [u32],
    dst_width: usize,
    x_offset: usize,
) -> Result<(), ImageError> {
    check_len(frame)?;
    let width = frame.width();
    if width == 0 {
        return Ok(());
    }
    if x_offset + width > dst_width || dst.len() < dst_width * frame.height() {
        return Err(ImageError::Size {
            expected: dst_width * frame.height(),
            actual: dst.len(),
        });
    }
    for (y, row) in frame.data.chunks_exact(width * 4).enumerate() {
        let start = y * dst_width + x_offset;
        for (out, q) in dst[start..start + width].iter_mut().zip(row.chunks_exact(4)) {
            *out = u32::from_le_bytes([q[0], q[1], q[2], q[3]]);
        }
    }
    Ok(())
}

/// Read display quads as B, G, R and emit opaque R, G, B, A bytes.
pub fn display_to_rgba(frame: &DisplayFrame<'_>) -> Result<Vec<u8>, ImageError> {
    check_len(frame)?;
    let mut rgba = Vec::with_capacity(frame.data.len());
    for q in frame.data.chunks_exact(4) {
        rgba.extend_from_slice(&[q[2], q[1], q[0], 0xFF]);
    }
    Ok(rgba)
}
