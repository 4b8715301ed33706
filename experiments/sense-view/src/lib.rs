use sense_base::Vec2;
use sense_image::{DisplayFrame, ImageError, convert, snapshot};
use sense_stream::{DisplaySink, SensorDevice, Session, StreamKind, TickError, TickReport};
use std::{fmt, path::Path};

/// Window framebuffer showing color on the left and depth on the right.
pub struct SideBySide {
    view: Vec2<usize>,
    buffer: Vec<u32>,
}

impl SideBySide {
    pub fn new(view: Vec2<usize>) -> Self {
        Self {
            view,
            buffer: vec![0; view.area() * 2],
        }
    }

    /// Window size in pixels.
    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.view.x * 2, self.view.y)
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    fn offset(&self, stream: StreamKind) -> usize {
        match stream {
            StreamKind::Color => 0,
            StreamKind::Depth => self.view.x,
        }
    }
}

impl DisplaySink for SideBySide {
    fn publish(&mut self, stream: StreamKind, frame: DisplayFrame<'_>) {
        let width = self.size().x;
        let offset = self.offset(stream);
        if let Err(err) = convert::blit_display_u32(&frame, &mut self.buffer, width, offset) {
            log::warn!("dropping {} view: {}", stream, err);
        }
    }
}

#[derive(Debug)]
pub enum SnapshotError {
    /// The capture tick failed; nothing was saved.
    Tick(TickError),
    Save(ImageError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Tick(err) => write!(f, "snapshot capture failed: {err}"),
            SnapshotError::Save(err) => write!(f, "snapshot save failed: {err}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Tick(err) => Some(err),
            SnapshotError::Save(err) => Some(err),
        }
    }
}

impl From<TickError> for SnapshotError {
    fn from(err: TickError) -> Self {
        SnapshotError::Tick(err)
    }
}

impl From<ImageError> for SnapshotError {
    fn from(err: ImageError) -> Self {
        SnapshotError::Save(err)
    }
}

/// Run one tick and save both fresh display buffers as `color.png` and
/// `depth.png` in `dir`. A failed tick saves nothing.
pub fn take_snapshot<D: SensorDevice, S: DisplaySink + ?Sized>(
    session: &mut Session<D>,
    sink: &mut S,
    dir: impl AsRef<Path>,
) -> Result<TickReport, SnapshotError> {
    let report = session.tick(sink)?;
    snapshot::save_pair(
        dir,
        &session.display(StreamKind::Color),
        &session.display(StreamKind::Depth),
    )?;
    Ok(report)
}
