use crate::{
    AcquisitionError, DeviceError, DisplaySink, Mode, SensorConfig, SensorDevice, SensorStream,
    SetupError, StreamKind, StreamPolicy, StreamSynchronizer, TickError, WarpKind,
};
use sense_base::Vec2;
use sense_image::{DisplayFrame, FrameMapper, TileBuffer};

/// What a successful tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based count of successful ticks.
    pub tick: u64,
    pub mode: Mode,
    /// Warp the mode asked for but could not run; that stream's display
    /// buffer was published unchanged.
    pub unsupported: Option<WarpKind>,
}

/// A running color/depth acquisition.
///
/// Built once after the device and its streams are open, torn down once when
/// dropped. `tick` takes `&mut self`, so two ticks can never overlap.
pub struct Session<D: SensorDevice> {
    device: D,
    color: D::Stream,
    depth: D::Stream,
    sync: StreamSynchronizer,
    mode: Mode,
    size: Vec2<usize>,
    color_mapper: FrameMapper,
    depth_mapper: FrameMapper,
    ticks: u64,
}

fn check_stream<S: SensorStream>(stream: &S, kind: StreamKind) -> Result<(), SetupError> {
    let actual = stream.video_mode().format;
    let expected = kind.expected_format();
    if stream.kind() != kind || actual != expected {
        return Err(SetupError::PixelFormat {
            stream: kind,
            expected,
            actual,
        });
    }
    Ok(())
}

impl<D: SensorDevice> Session<D> {
    /// Check both streams and allocate the per-stream buffers.
    ///
    /// Fails if the config is invalid, a stream delivers the wrong encoding,
    /// or color and depth resolutions differ.
    pub fn new(
        device: D,
        color: D::Stream,
        depth: D::Stream,
        config: &SensorConfig,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        check_stream(&color, StreamKind::Color)?;
        check_stream(&depth, StreamKind::Depth)?;

        let color_mode = color.video_mode();
        let depth_mode = depth.video_mode();
        log::info!("{}: color {}, depth {}", device.name(), color_mode, depth_mode);
        if color_mode.size != depth_mode.size {
            log::error!(
                "expected color and depth to have the same resolution: depth {}, color {}",
                depth_mode.size,
                color_mode.size
            );
            return Err(SetupError::GeometryMismatch {
                color: color_mode.size,
                depth: depth_mode.size,
            });
        }

        let size = color_mode.size;
        let color_mapper = FrameMapper::new(color_mode.format, size, config.tile_size());
        let depth_mapper = FrameMapper::new(depth_mode.format, size, config.tile_size());
        log::info!(
            "stream size {}, tile buffer {}",
            size,
            color_mapper.tile().size()
        );

        Ok(Self {
            device,
            color,
            depth,
            sync: StreamSynchronizer::new(config.wait_timeout()),
            mode: config.initial_mode(),
            size,
            color_mapper,
            depth_mapper,
            ticks: 0,
        })
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Step the mode (see `Mode::advance`). Takes effect on the next tick.
    pub fn advance_mode(&mut self) -> Mode {
        let mode = self.mode.advance();
        log::info!("mode: {}", mode);
        mode
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn display(&self, stream: StreamKind) -> DisplayFrame<'_> {
        self.mapper(stream).display()
    }

    pub fn tile(&self, stream: StreamKind) -> &TileBuffer {
        self.mapper(stream).tile()
    }

    fn mapper(&self, stream: StreamKind) -> &FrameMapper {
        match stream {
            StreamKind::Color => &self.color_mapper,
            StreamKind::Depth => &self.depth_mapper,
        }
    }

    /// Acquire one color and one depth frame, map them per the current mode
    /// and publish both display buffers to `sink`.
    ///
    /// Any failure returns before a buffer is touched or published, so the
    /// sink keeps showing the previous tick.
    pub fn tick<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> Result<TickReport, TickError> {
        if let Err(err) = self.sync.acquire(&self.device, &mut self.color, &mut self.depth) {
            log::error!("{}", err);
            return Err(err.into());
        }

        let color_frame = self.color.frame().ok_or(AcquisitionError::Read {
            stream: StreamKind::Color,
            source: DeviceError::NoFrame,
        })?;
        let depth_frame = self.depth.frame().ok_or(AcquisitionError::Read {
            stream: StreamKind::Depth,
            source: DeviceError::NoFrame,
        })?;

        let (color_policy, depth_policy) = self.mode.policy();
        let mut unsupported = None;
        let mut direct = |stream: StreamKind, policy: StreamPolicy| match policy {
            StreamPolicy::DirectMap => true,
            StreamPolicy::Warp(kind) => {
                if let Err(err) = kind.ensure_supported() {
                    log::debug!("{}; {} view left as is", err, stream);
                    unsupported = Some(kind);
                }
                false
            }
        };
        let map_color = direct(StreamKind::Color, color_policy);
        let map_depth = direct(StreamKind::Depth, depth_policy);

        // both frames are checked before either buffer is written
        let color_checked = if map_color {
            let checked = self.color_mapper.check(&color_frame).map_err(|source| TickError::Map {
                stream: StreamKind::Color,
                source,
            })?;
            Some(checked)
        } else {
            None
        };
        let depth_checked = if map_depth {
            let checked = self.depth_mapper.check(&depth_frame).map_err(|source| TickError::Map {
                stream: StreamKind::Depth,
                source,
            })?;
            Some(checked)
        } else {
            None
        };
        if let Some(checked) = color_checked {
            self.color_mapper.write(checked);
        }
        if let Some(checked) = depth_checked {
            self.depth_mapper.write(checked);
        }

        sink.publish(StreamKind::Color, self.color_mapper.display());
        sink.publish(StreamKind::Depth, self.depth_mapper.display());

        self.ticks += 1;
        Ok(TickReport {
            tick: self.ticks,
            mode: self.mode,
            unsupported,
        })
    }
}

impl<D: SensorDevice> Drop for Session<D> {
    fn drop(&mut self) {
        log::info!("{}: shutting down after {} ticks", self.device.name(), self.ticks);
        self.device.shutdown();
    }
}
