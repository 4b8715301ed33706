//! Deterministic single-threaded device driven by a `Script`.
//!
//! Frames are queued per stream ahead of time and failures are injected on
//! demand. `wait_for_any` never blocks: with nothing queued it reports the
//! script as exhausted, standing in for a sensor that stopped sending.

use crate::{DeviceError, SensorDevice, SensorStream, StreamKind, VideoMode};
use sense_image::{OwnedFrame, SensorFrame};
use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

#[derive(Default)]
struct ScriptState {
    color: VecDeque<OwnedFrame>,
    depth: VecDeque<OwnedFrame>,
    wait_failures: usize,
    read_failures: usize,
    waits: usize,
    shutdowns: usize,
}

impl ScriptState {
    fn queue(&mut self, kind: StreamKind) -> &mut VecDeque<OwnedFrame> {
        match kind {
            StreamKind::Color => &mut self.color,
            StreamKind::Depth => &mut self.depth,
        }
    }
}

/// Handle for feeding and inspecting a scripted device after it has been
/// moved into a session.
#[derive(Clone)]
pub struct Script {
    state: Rc<RefCell<ScriptState>>,
}

impl Script {
    pub fn push(&self, kind: StreamKind, frame: OwnedFrame) {
        self.state.borrow_mut().queue(kind).push_back(frame);
    }

    /// Queue one color and one depth frame.
    pub fn push_pair(&self, color: OwnedFrame, depth: OwnedFrame) {
        self.push(StreamKind::Color, color);
        self.push(StreamKind::Depth, depth);
    }

    /// Make the next `count` waits fail.
    pub fn fail_waits(&self, count: usize) {
        self.state.borrow_mut().wait_failures += count;
    }

    /// Make the next `count` reads fail, whatever is queued.
    pub fn fail_reads(&self, count: usize) {
        self.state.borrow_mut().read_failures += count;
    }

    pub fn queued(&self, kind: StreamKind) -> usize {
        self.state.borrow_mut().queue(kind).len()
    }

    pub fn waits(&self) -> usize {
        self.state.borrow().waits
    }

    pub fn shutdowns(&self) -> usize {
        self.state.borrow().shutdowns
    }
}

pub struct ScriptedDevice {
    state: Rc<RefCell<ScriptState>>,
}

pub struct ScriptedStream {
    kind: StreamKind,
    mode: VideoMode,
    state: Rc<RefCell<ScriptState>>,
    latched: Option<OwnedFrame>,
}

/// Create a scripted device whose streams report the given video modes.
pub fn scripted(
    color_mode: VideoMode,
    depth_mode: VideoMode,
) -> (Script, ScriptedDevice, ScriptedStream, ScriptedStream) {
    let state = Rc::new(RefCell::new(ScriptState::default()));
    let stream = |kind, mode| ScriptedStream {
        kind,
        mode,
        state: Rc::clone(&state),
        latched: None,
    };
    let color = stream(StreamKind::Color, color_mode);
    let depth = stream(StreamKind::Depth, depth_mode);
    (
        Script {
            state: Rc::clone(&state),
        },
        ScriptedDevice { state },
        color,
        depth,
    )
}

impl SensorDevice for ScriptedDevice {
    type Stream = ScriptedStream;

    fn name(&self) -> &str {
        "scripted"
    }

    fn wait_for_any(
        &self,
        streams: &[&ScriptedStream],
        _timeout: Option<Duration>,
    ) -> Result<usize, DeviceError> {
        let mut state = self.state.borrow_mut();
        state.waits += 1;
        if state.wait_failures > 0 {
            state.wait_failures -= 1;
            return Err(DeviceError::Driver("scripted wait failure".to_string()));
        }
        streams
            .iter()
            .position(|stream| !state.queue(stream.kind).is_empty())
            .ok_or(DeviceError::Driver("script exhausted".to_string()))
    }

    fn shutdown(&mut self) {
        self.state.borrow_mut().shutdowns += 1;
    }
}

impl SensorStream for ScriptedStream {
    fn kind(&self) -> StreamKind {
        self.kind
    }

    fn video_mode(&self) -> VideoMode {
        self.mode
    }

    fn read_frame(&mut self) -> Result<(), DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.read_failures > 0 {
            state.read_failures -= 1;
            return Err(DeviceError::Driver("scripted read failure".to_string()));
        }
        let frame = state.queue(self.kind).pop_front().ok_or(DeviceError::NoFrame)?;
        self.latched = Some(frame);
        Ok(())
    }

    fn frame(&self) -> Option<SensorFrame<'_>> {
        self.latched.as_ref().map(OwnedFrame::as_frame)
    }
}
