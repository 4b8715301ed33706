use std::fmt;

/// Number of modes `Mode::advance` cycles through. Only the first two of the
/// three declared modes take part; `WarpColorToDepth` can only be chosen as
/// the initial mode.
const ADVANCE_CYCLE: u8 = 2;

/// Which pairing of color and depth views each tick produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Separate,
    WarpDepthToColor,
    WarpColorToDepth,
}

impl Mode {
    fn index(self) -> u8 {
        match self {
            Mode::Separate => 0,
            Mode::WarpDepthToColor => 1,
            Mode::WarpColorToDepth => 2,
        }
    }

    fn from_index(index: u8) -> Self {
        match index {
            0 => Mode::Separate,
            1 => Mode::WarpDepthToColor,
            _ => Mode::WarpColorToDepth,
        }
    }

    /// Step to the next mode, modulo 2 over the declared order.
    ///
    /// `Separate` and `WarpDepthToColor` alternate. `WarpColorToDepth` steps
    /// to `WarpDepthToColor` and is never reached again.
    pub fn advance(&mut self) -> Mode {
        *self = Mode::from_index((self.index() + 1) % ADVANCE_CYCLE);
        *self
    }

    /// How color and depth frames are handled in this mode, as
    /// `(color, depth)`.
    pub fn policy(self) -> (StreamPolicy, StreamPolicy) {
        match self {
            Mode::Separate => (StreamPolicy::DirectMap, StreamPolicy::DirectMap),
            Mode::WarpDepthToColor => (
                StreamPolicy::DirectMap,
                StreamPolicy::Warp(WarpKind::DepthToColor),
            ),
            Mode::WarpColorToDepth => (
                StreamPolicy::Warp(WarpKind::ColorToDepth),
                StreamPolicy::DirectMap,
            ),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Separate => write!(f, "separate"),
            Mode::WarpDepthToColor => write!(f, "warp depth to color"),
            Mode::WarpColorToDepth => write!(f, "warp color to depth"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPolicy {
    /// 1:1 geometric copy plus format conversion.
    DirectMap,
    /// Re-project into the other stream's view, then map.
    Warp(WarpKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpKind {
    DepthToColor,
    ColorToDepth,
}

impl WarpKind {
    /// Capability check for the warp transform. No warp is implemented, so
    /// every kind reports `Unsupported`.
    pub fn ensure_supported(self) -> Result<(), Unsupported> {
        Err(Unsupported(self))
    }
}

impl fmt::Display for WarpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarpKind::DepthToColor => write!(f, "depth-to-color warp"),
            WarpKind::ColorToDepth => write!(f, "color-to-depth warp"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported(pub WarpKind);

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not supported", self.0)
    }
}

impl std::error::Error for Unsupported {}
