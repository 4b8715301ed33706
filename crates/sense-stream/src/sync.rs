use crate::{AcquisitionError, DeviceError, SensorDevice, SensorStream, StreamKind};
use std::time::Duration;

/// Fixed two-stream wait/read protocol: wait, pull color, wait, pull depth.
///
/// Either stream waking the wait is enough; the ready index is not used to
/// pick what to read. Any failure aborts the acquisition and is not retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamSynchronizer {
    timeout: Option<Duration>,
}

impl StreamSynchronizer {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Block until the color or depth stream has a frame ready.
    ///
    /// `servicing` names the stream about to be read, for error reporting.
    pub fn wait_ready<D: SensorDevice>(
        &self,
        device: &D,
        streams: [&D::Stream; 2],
        servicing: StreamKind,
    ) -> Result<usize, AcquisitionError> {
        match device.wait_for_any(&streams, self.timeout) {
            Ok(index) => Ok(index),
            Err(DeviceError::Timeout(after)) => Err(AcquisitionError::Timeout {
                stream: servicing,
                after,
            }),
            Err(source) => Err(AcquisitionError::Wait {
                stream: servicing,
                source,
            }),
        }
    }

    /// Latch the next frame of `stream` without blocking.
    pub fn pull_frame<S: SensorStream>(&self, stream: &mut S) -> Result<(), AcquisitionError> {
        stream
            .read_frame()
            .map_err(|source| AcquisitionError::Read {
                stream: stream.kind(),
                source,
            })
    }

    /// Run the full protocol once. On success both streams hold a freshly
    /// latched frame.
    pub fn acquire<D: SensorDevice>(
        &self,
        device: &D,
        color: &mut D::Stream,
        depth: &mut D::Stream,
    ) -> Result<(), AcquisitionError> {
        let ready = self.wait_ready(device, [&*color, &*depth], StreamKind::Color)?;
        log::trace!("stream {} ready before color read", ready);
        self.pull_frame(color)?;

        let ready = self.wait_ready(device, [&*color, &*depth], StreamKind::Depth)?;
        log::trace!("stream {} ready before depth read", ready);
        self.pull_frame(depth)
    }
}
