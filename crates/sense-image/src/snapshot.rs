use crate::{DisplayFrame, ImageError, convert::display_to_rgba};
use std::path::Path;

/// Write a display buffer to `path` as an RGBA PNG.
pub fn save_png(path: impl AsRef<Path>, frame: &DisplayFrame<'_>) -> Result<(), ImageError> {
    let rgba = display_to_rgba(frame)?;
    let path = path.as_ref();
    crates_image::save_buffer_with_format(
        path,
        &rgba,
        frame.width() as u32,
        frame.height() as u32,
        crates_image::ExtendedColorType::Rgba8,
        crates_image::ImageFormat::Png,
    )?;
    log::info!("saved {}x{} snapshot to {}", frame.width(), frame.height(), path.display());
    Ok(())
}

/// Save a color/depth pair as `color.png` and `depth.png` inside `dir`.
pub fn save_pair(
    dir: impl AsRef<Path>,
    color: &DisplayFrame<'_>,
    depth: &DisplayFrame<'_>,
) -> Result<(), ImageError> {
    let dir = dir.as_ref();
    save_png(dir.join("color.png"), color)?;
    save_png(dir.join("depth.png"), depth)
}
