use crate::{Mode, SetupError};
use sense_base::Vec2;
use std::time::Duration;

/// Configuration for a color/depth session.
#[derive(Clone, Debug)]
pub struct SensorConfig {
    width: usize,
    height: usize,
    fps: u32,
    tile_size: usize,
    initial_mode: Mode,
    wait_timeout: Option<Duration>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            tile_size: 512,
            initial_mode: Mode::Separate,
            wait_timeout: None,
        }
    }
}

impl SensorConfig {
    /// Set the stream width in pixels.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the stream height in pixels.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the frames per second, which also bounds the tick rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the alignment granularity of the intermediate tile buffers.
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the mode the session starts in. This is the only way to start in
    /// `Mode::WarpColorToDepth`.
    pub fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Bound the per-stream wait.
    ///
    /// Without a timeout a stalled sensor blocks the tick forever; that is the
    /// main liveness risk on hardware with an unreliable link.
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }

    // Getters
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vec2<usize> {
        Vec2::new(self.width, self.height)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn initial_mode(&self) -> Mode {
        self.initial_mode
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout
    }

    /// Period of the external tick timer.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.tile_size == 0 {
            return Err(SetupError::Config("tile size must be positive".to_string()));
        }
        if self.fps == 0 {
            return Err(SetupError::Config("fps must be positive".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::Config(format!(
                "resolution {}x{} is empty",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
