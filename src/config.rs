//! Board configuration
//!
//! Every size and cadence is fixed when a `Simulation` is built. The host
//! binary can override the defaults from a JSON file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    /// Width or height is zero or negative
    EmptyDisplay { width: i32, height: i32 },
    /// Height must be a whole number of 8-row pages
    PartialPage { height: i32 },
    /// No ball slots
    ZeroCapacity,
    /// Bin count is zero or wider than the display
    BinCount { bins: usize, width: i32 },
    /// Spawn interval of zero ticks
    ZeroSpawnInterval,
    /// Row or pin spacing is not positive
    Spacing,
    /// Ball radius is negative
    BallRadius { radius: i32 },
    /// Pin radius is negative
    PinRadius { radius: i32 },
    /// Ball cannot fit between the side walls
    BallWiderThanBoard { radius: i32, width: i32 },
    /// Deflection step is negative
    NegativeDeflection { step: i32 },
    /// Histogram band is negative or fills the whole display
    HistogramHeight { histogram_height: i32, height: i32 },
    /// Landing line does not sit below the pin lattice
    LandingAbovePins { landing_y: i32, lattice_bottom: i32 },
    /// Config file could not be read
    Io(std::io::Error),
    /// Config file is not valid JSON for `BoardConfig`
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDisplay { width, height } => {
                write!(f, "display must be non-empty, got {}x{}", width, height)
            }
            ConfigError::PartialPage { height } => {
                write!(f, "display height {} is not a multiple of {}", height, PAGE_HEIGHT)
            }
            ConfigError::ZeroCapacity => write!(f, "max_balls must be at least 1"),
            ConfigError::BinCount { bins, width } => {
                write!(f, "bin_count {} must be between 1 and the width {}", bins, width)
            }
            ConfigError::ZeroSpawnInterval => write!(f, "spawn_interval must be at least 1 tick"),
            ConfigError::Spacing => write!(f, "row_spacing and pin_spacing must be positive"),
            ConfigError::BallRadius { radius } => {
                write!(f, "ball_radius must not be negative, got {}", radius)
            }
            ConfigError::PinRadius { radius } => {
                write!(f, "pin_radius must not be negative, got {}", radius)
            }
            ConfigError::BallWiderThanBoard { radius, width } => write!(
                f,
                "a ball of radius {} does not fit on a board {} pixels wide",
                radius, width
            ),
            ConfigError::NegativeDeflection { step } => {
                write!(f, "deflection_step must not be negative, got {}", step)
            }
            ConfigError::HistogramHeight {
                histogram_height,
                height,
            } => write!(
                f,
                "histogram_height {} must be in 0..{}",
                histogram_height, height
            ),
            ConfigError::LandingAbovePins {
                landing_y,
                lattice_bottom,
            } => write!(
                f,
                "landing line y={} must be below the pin lattice (y={})",
                landing_y, lattice_bottom
            ),
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Construction-time board parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // === Display ===
    pub width: i32,
    pub height: i32,

    // === Balls ===
    /// Slots in the ball pool
    pub max_balls: usize,
    pub ball_radius: i32,
    /// Ticks between spawn attempts
    pub spawn_interval: u32,

    // === Pins ===
    pub pin_rows: usize,
    pub pin_radius: i32,
    pub row_spacing: i32,
    pub pin_spacing: i32,
    /// Horizontal shift per pin hit
    pub deflection_step: i32,

    // === Histogram ===
    pub bin_count: usize,
    /// Height of the bar band at the bottom of the display
    pub histogram_height: i32,

    // === Host loop ===
    pub frame_interval_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,

            max_balls: MAX_BALLS,
            ball_radius: BALL_RADIUS,
            spawn_interval: NEW_BALL_INTERVAL,

            pin_rows: PIN_ROWS,
            pin_radius: PIN_RADIUS,
            row_spacing: ROW_SPACING,
            pin_spacing: PIN_SPACING,
            deflection_step: DEFLECTION_STEP,

            bin_count: BIN_COUNT,
            histogram_height: HISTOGRAM_HEIGHT,

            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl BoardConfig {
    /// Width of one histogram bin in pixels
    pub fn bin_width(&self) -> i32 {
        self.width / self.bin_count as i32
    }

    /// Y at which a ball is considered landed
    pub fn landing_y(&self) -> i32 {
        self.height - self.histogram_height - self.ball_radius
    }

    /// Y of the line separating the board from the histogram band
    pub fn divider_y(&self) -> i32 {
        self.height - self.histogram_height - 1
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyDisplay {
                width: self.width,
                height: self.height,
            });
        }
        if self.height % PAGE_HEIGHT != 0 {
            return Err(ConfigError::PartialPage {
                height: self.height,
            });
        }
        if self.max_balls == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.bin_count == 0 || self.bin_count > self.width as usize {
            return Err(ConfigError::BinCount {
                bins: self.bin_count,
                width: self.width,
            });
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.row_spacing <= 0 || self.pin_spacing <= 0 {
            return Err(ConfigError::Spacing);
        }
        if self.ball_radius < 0 {
            return Err(ConfigError::BallRadius {
                radius: self.ball_radius,
            });
        }
        if self.pin_radius < 0 {
            return Err(ConfigError::PinRadius {
                radius: self.pin_radius,
            });
        }
        // Deflections clamp x into [radius, width - radius - 1]
        if self.ball_radius > self.width - self.ball_radius - 1 {
            return Err(ConfigError::BallWiderThanBoard {
                radius: self.ball_radius,
                width: self.width,
            });
        }
        if self.deflection_step < 0 {
            return Err(ConfigError::NegativeDeflection {
                step: self.deflection_step,
            });
        }
        if self.histogram_height < 0 || self.histogram_height >= self.height {
            return Err(ConfigError::HistogramHeight {
                histogram_height: self.histogram_height,
                height: self.height,
            });
        }
        let lattice_bottom = self.pin_rows as i32 * self.row_spacing;
        if self.landing_y() <= lattice_bottom {
            return Err(ConfigError::LandingAbovePins {
                landing_y: self.landing_y(),
                lattice_bottom,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded board config from {}", path.display());
        Ok(config)
    }
}
