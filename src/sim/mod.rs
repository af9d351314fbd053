//! Deterministic simulation module
//!
//! All board logic lives here. This module must stay deterministic:
//! - One fixed step per tick
//! - Injected coin source only
//! - Stable iteration order (by slot index)
//! - No timing or display I/O

pub mod histogram;
pub mod pins;
pub mod pool;
pub mod rng;
pub mod state;

pub use histogram::HistogramAggregator;
pub use pins::PinField;
pub use pool::{Ball, BallPool};
pub use rng::{CoinSource, FixedCoin, PcgCoin, ScriptedCoin};
pub use state::{SimSnapshot, Simulation};
