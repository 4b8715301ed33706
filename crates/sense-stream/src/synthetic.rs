//! Test-pattern sensor for running the pipeline without hardware.
//!
//! A producer thread captures a color/depth pair every frame period and
//! parks it in a per-stream slot, overwriting anything unread. Waiters block
//! on a condvar until a slot they care about is filled.

use crate::{DeviceError, SensorConfig, SensorDevice, SensorStream, StreamKind, VideoMode};
use sense_base::Vec2;
use sense_image::{OwnedFrame, PixelFormat, Rgb888, SensorFrame};
use std::{
    sync::{Arc, Condvar, Mutex, MutexGuard},
    thread::JoinHandle,
    time::Duration,
};

// extra samples at the end of each depth row
const DEPTH_ROW_PADDING: usize = 8;

// columns on the left edge that never return depth
const DEPTH_SHADOW_COLUMNS: usize = 16;

struct State {
    running: bool,
    pending: [Option<OwnedFrame>; 2],
    captured: u64,
}

struct Shared {
    state: Mutex<State>,
    ready: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn slot(kind: StreamKind) -> usize {
    match kind {
        StreamKind::Color => 0,
        StreamKind::Depth => 1,
    }
}

pub struct SyntheticDevice {
    name: String,
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

pub struct SyntheticStream {
    kind: StreamKind,
    mode: VideoMode,
    shared: Arc<Shared>,
    latched: Option<OwnedFrame>,
}

fn color_pattern(size: Vec2<usize>, n: u64) -> OwnedFrame {
    let shift = n as usize;
    let mut samples = Vec::with_capacity(size.area());
    for y in 0..size.y {
        for x in 0..size.x {
            samples.push(Rgb888::new(
                (x + shift) as u8,
                y as u8,
                ((x + y) / 2 + shift * 2) as u8,
            ));
        }
    }
    OwnedFrame::rgb(size, samples)
}

fn depth_pattern(size: Vec2<usize>, n: u64) -> OwnedFrame {
    let stride = size.x + DEPTH_ROW_PADDING;
    let mut samples = vec![0u16; stride * size.y];
    for y in 0..size.y {
        for x in DEPTH_SHADOW_COLUMNS.min(size.x)..size.x {
            samples[y * stride + x] = 500 + ((x + y + n as usize * 4) % 4000) as u16;
        }
    }
    OwnedFrame::depth(size, samples).with_stride(stride)
}

impl SyntheticDevice {
    /// Start producing frames at `config.fps()` and return the device with
    /// its color and depth streams.
    pub fn open(config: &SensorConfig) -> Result<(Self, SyntheticStream, SyntheticStream), DeviceError> {
        if config.fps() == 0 {
            return Err(DeviceError::Driver("fps must be positive".to_string()));
        }
        let size = config.size();
        let period = config.tick_interval();
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                running: true,
                pending: [None, None],
                captured: 0,
            }),
            ready: Condvar::new(),
        });

        let worker = std::thread::Builder::new()
            .name("synthetic-sensor".to_string())
            .spawn({
                let shared = Arc::clone(&shared);
                move || Self::produce(shared, size, period)
            })
            .map_err(|e| DeviceError::Driver(e.to_string()))?;

        let stream = |kind: StreamKind, format| SyntheticStream {
            kind,
            mode: VideoMode {
                size,
                fps: config.fps(),
                format,
            },
            shared: Arc::clone(&shared),
            latched: None,
        };
        let color = stream(StreamKind::Color, PixelFormat::Rgb888);
        let depth = stream(StreamKind::Depth, PixelFormat::Depth1Mm);

        log::info!("synthetic sensor started: {} @ {}fps", size, config.fps());
        let device = Self {
            name: "synthetic".to_string(),
            shared,
            worker: Some(worker),
        };
        Ok((device, color, depth))
    }

    fn produce(shared: Arc<Shared>, size: Vec2<usize>, period: Duration) {
        let mut n = 0u64;
        loop {
            let color = color_pattern(size, n);
            let depth = depth_pattern(size, n);

            let state = shared.lock();
            // sleeps out the frame period unless shutdown wakes us
            let (mut state, _) = shared
                .ready
                .wait_timeout_while(state, period, |s| s.running)
                .unwrap_or_else(|e| e.into_inner());
            if !state.running {
                break;
            }
            state.pending = [Some(color), Some(depth)];
            state.captured += 1;
            drop(state);
            shared.ready.notify_all();
            n += 1;
        }
        log::debug!("synthetic sensor stopped after {} frames", n);
    }

    /// Number of color/depth pairs produced so far.
    pub fn captured(&self) -> u64 {
        self.shared.lock().captured
    }
}

impl SensorDevice for SyntheticDevice {
    type Stream = SyntheticStream;

    fn name(&self) -> &str {
        &self.name
    }

    fn wait_for_any(
        &self,
        streams: &[&SyntheticStream],
        timeout: Option<Duration>,
    ) -> Result<usize, DeviceError> {
        let idle = |s: &mut State| {
            s.running && !streams.iter().any(|st| s.pending[slot(st.kind)].is_some())
        };
        let state = self.shared.lock();
        let state = match timeout {
            Some(timeout) => {
                let (state, result) = self
                    .shared
                    .ready
                    .wait_timeout_while(state, timeout, idle)
                    .unwrap_or_else(|e| e.into_inner());
                if result.timed_out() {
                    return Err(DeviceError::Timeout(timeout));
                }
                state
            }
            None => self
                .shared
                .ready
                .wait_while(state, idle)
                .unwrap_or_else(|e| e.into_inner()),
        };
        if !state.running {
            return Err(DeviceError::Disconnected);
        }
        streams
            .iter()
            .position(|st| state.pending[slot(st.kind)].is_some())
            .ok_or(DeviceError::NoFrame)
    }

    fn shutdown(&mut self) {
        self.shared.lock().running = false;
        self.shared.ready.notify_all();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("synthetic sensor thread panicked");
            }
        }
    }
}

impl Drop for SyntheticDevice {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl SensorStream for SyntheticStream {
    fn kind(&self) -> StreamKind {
        self.kind
    }

    fn video_mode(&self) -> VideoMode {
        self.mode
    }

    fn read_frame(&mut self) -> Result<(), DeviceError> {
        let mut state = self.shared.lock();
        if !state.running {
            return Err(DeviceError::Disconnected);
        }
        match state.pending[slot(self.kind)].take() {
            Some(frame) => {
                self.latched = Some(frame);
                Ok(())
            }
            None => Err(DeviceError::NoFrame),
        }
    }

    fn frame(&self) -> Option<SensorFrame<'_>> {
        self.latched.as_ref().map(OwnedFrame::as_frame)
    }
}
