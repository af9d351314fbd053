//! Galton Board - a pin-lattice ball drop on a monochrome display
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pins, ball pool, histogram, composition)
//! - `framebuffer`: Page-packed 1-bit pixel buffer and drawing primitives
//! - `display`: Display transfer seam and the terminal backend
//! - `text`: Text rendering seam and a tiny built-in font
//! - `config`: Construction-time board configuration

pub mod config;
pub mod display;
pub mod framebuffer;
pub mod sim;
pub mod text;

pub use config::{BoardConfig, ConfigError};
pub use display::{DisplayTarget, RenderArea, TerminalDisplay};
pub use framebuffer::FrameBuffer;
pub use sim::{Ball, BallPool, CoinSource, HistogramAggregator, PcgCoin, PinField, Simulation};
pub use text::{MiniFont, TextRenderer};

/// Board defaults for a 128x64 SSD1306 OLED
pub mod consts {
    /// Display dimensions in pixels
    pub const DISPLAY_WIDTH: i32 = 128;
    pub const DISPLAY_HEIGHT: i32 = 64;

    /// Ball slots available at once
    pub const MAX_BALLS: usize = 10;
    /// Rows in the triangular pin lattice
    pub const PIN_ROWS: usize = 5;
    pub const BALL_RADIUS: i32 = 2;
    pub const PIN_RADIUS: i32 = 1;

    pub const BIN_COUNT: usize = 6;
    /// Height of the histogram band at the bottom of the screen
    pub const HISTOGRAM_HEIGHT: i32 = 20;
    /// Ticks between ball spawns
    pub const NEW_BALL_INTERVAL: u32 = 10;

    /// Vertical distance between pin rows
    pub const ROW_SPACING: i32 = 8;
    /// Horizontal distance between pins in a row
    pub const PIN_SPACING: i32 = 16;
    /// Horizontal shift applied when a ball hits a pin
    pub const DEFLECTION_STEP: i32 = 4;
    /// Crossing window around a row line (|dy| <= tolerance)
    pub const CROSSING_TOLERANCE: i32 = 1;

    /// Nominal frame period of the host loop
    pub const FRAME_INTERVAL_MS: u64 = 50;
    /// How long the title card stays up before the loop starts
    pub const SPLASH_MS: u64 = 2000;

    /// Rows per framebuffer page
    pub const PAGE_HEIGHT: i32 = 8;
}
