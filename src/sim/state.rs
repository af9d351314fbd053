//! Simulation composition root
//!
//! Owns the ball pool (with its pin field), histogram, and coin source. The outer loop
//! calls `step()` once per tick and `render()` once per frame; nothing in here
//! sleeps or keeps time.

use serde::Serialize;

use super::histogram::HistogramAggregator;
use super::pins::PinField;
use super::pool::{Ball, BallPool};
use super::rng::CoinSource;
use crate::config::{BoardConfig, ConfigError};
use crate::framebuffer::FrameBuffer;
use crate::text::TextRenderer;

/// Title card lines and their positions
const SPLASH_TITLE: (i32, i32, &str) = (10, 20, "GALTON BOARD");
const SPLASH_SUBTITLE: (i32, i32, &str) = (20, 35, "SIMULATION");

/// Serializable view of the simulation for debug dumps
#[derive(Debug, Clone, Serialize)]
pub struct SimSnapshot<'a> {
    pub ticks: u64,
    pub balls: Vec<Ball>,
    pub histogram: &'a HistogramAggregator,
}

/// A running Galton board
#[derive(Debug, Clone)]
pub struct Simulation<C: CoinSource> {
    config: BoardConfig,
    pool: BallPool,
    histogram: HistogramAggregator,
    coin: C,
    /// Ticks since the last spawn attempt
    spawn_counter: u32,
    /// Ticks since construction
    ticks: u64,
    /// Frame owned by the simulation for `render_frame`
    frame: FrameBuffer,
}

impl<C: CoinSource> Simulation<C> {
    /// Validate `config` and build an empty board
    pub fn new(config: BoardConfig, coin: C) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Galton board {}x{}: {} rows, {} bins, {} ball slots, spawn every {} ticks",
            config.width,
            config.height,
            config.pin_rows,
            config.bin_count,
            config.max_balls,
            config.spawn_interval
        );
        Ok(Self {
            pool: BallPool::new(&config),
            histogram: HistogramAggregator::new(config.bin_count),
            frame: FrameBuffer::new(config.width, config.height),
            coin,
            spawn_counter: 0,
            ticks: 0,
            config,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn pins(&self) -> &PinField {
        self.pool.pins()
    }

    pub fn pool(&self) -> &BallPool {
        &self.pool
    }

    pub fn histogram(&self) -> &HistogramAggregator {
        &self.histogram
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Balls that have landed so far
    pub fn total(&self) -> u32 {
        self.histogram.total()
    }

    /// Advance one tick: maybe spawn, then move every ball
    pub fn step(&mut self) {
        self.ticks += 1;
        self.spawn_counter += 1;
        if self.spawn_counter >= self.config.spawn_interval {
            self.pool.spawn();
            self.spawn_counter = 0;
        }
        self.pool.step_all(&mut self.coin, &mut self.histogram);
    }

    /// Draw the whole scene into `buffer`
    pub fn render<T: TextRenderer + ?Sized>(&self, buffer: &mut FrameBuffer, text: &mut T) {
        draw_scene(&self.config, &self.pool, &self.histogram, buffer, text);
    }

    /// Render into the simulation's own frame and return it
    pub fn render_frame<T: TextRenderer + ?Sized>(&mut self, text: &mut T) -> &FrameBuffer {
        draw_scene(&self.config, &self.pool, &self.histogram, &mut self.frame, text);
        &self.frame
    }

    /// Title card shown before the first tick
    pub fn render_splash<T: TextRenderer + ?Sized>(&self, buffer: &mut FrameBuffer, text: &mut T) {
        buffer.clear();
        for (x, y, line) in [SPLASH_TITLE, SPLASH_SUBTITLE] {
            text.draw_string(buffer, x, y, line);
        }
    }

    pub fn snapshot(&self) -> SimSnapshot<'_> {
        SimSnapshot {
            ticks: self.ticks,
            balls: self.pool.active().copied().collect(),
            histogram: &self.histogram,
        }
    }
}

/// Pins, divider, balls, histogram bars, and the landed-ball counter
fn draw_scene<T: TextRenderer + ?Sized>(
    config: &BoardConfig,
    pool: &BallPool,
    histogram: &HistogramAggregator,
    buffer: &mut FrameBuffer,
    text: &mut T,
) {
    buffer.clear();

    for (x, y) in pool.pins().pins() {
        buffer.draw_disc(x, y, config.pin_radius, true);
    }

    buffer.draw_hline(0, config.divider_y(), config.width, true);

    for ball in pool.active() {
        buffer.draw_disc(ball.x, ball.y, config.ball_radius, true);
    }

    draw_histogram(config, histogram, buffer);

    text.draw_string(buffer, 0, 0, &histogram.total().to_string());
}

fn draw_histogram(config: &BoardConfig, histogram: &HistogramAggregator, buffer: &mut FrameBuffer) {
    let bin_width = config.bin_width();
    let band = config.histogram_height.max(0) as u32;
    let heights = histogram.normalized_heights(band);

    for (i, &height) in heights.iter().enumerate() {
        if height == 0 {
            continue;
        }
        let height = height as i32;
        buffer.draw_filled_rect(
            i as i32 * bin_width,
            config.height - height,
            bin_width - 1,
            height,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{FixedCoin, PcgCoin};
    use crate::text::MiniFont;
    use proptest::prelude::*;

    /// Records what it was asked to draw instead of drawing it
    #[derive(Default)]
    struct TextLog(Vec<(i32, i32, String)>);

    impl TextRenderer for TextLog {
        fn draw_string(&mut self, _buffer: &mut FrameBuffer, x: i32, y: i32, text: &str) {
            self.0.push((x, y, text.to_string()));
        }
    }

    fn sim<C: CoinSource>(coin: C) -> Simulation<C> {
        Simulation::new(BoardConfig::default(), coin).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig {
            max_balls: 0,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(config, FixedCoin(true)),
            Err(ConfigError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_spawn_cadence() {
        let mut sim = sim(FixedCoin(true));
        for _ in 0..9 {
            sim.step();
        }
        assert_eq!(sim.pool().active_count(), 0);

        sim.step();
        assert_eq!(sim.pool().active_count(), 1);

        // Rest of the window: still exactly one ball
        for _ in 0..9 {
            sim.step();
            assert_eq!(sim.pool().active_count(), 1);
        }

        sim.step();
        assert_eq!(sim.pool().active_count(), 2);
    }

    #[test]
    fn test_first_ball_lands_in_last_bin() {
        let mut sim = sim(FixedCoin(true));
        // Spawned on tick 10 and moved that same tick, so it lands on tick 51
        for _ in 0..50 {
            sim.step();
        }
        assert_eq!(sim.total(), 0);

        sim.step();
        assert_eq!(sim.total(), 1);
        assert_eq!(sim.histogram().bins(), &[0, 0, 0, 0, 0, 1]);
        assert_eq!(sim.ticks(), 51);
    }

    #[test]
    fn test_full_pool_drops_spawns() {
        let config = BoardConfig {
            max_balls: 2,
            spawn_interval: 1,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, FixedCoin(false)).unwrap();
        for _ in 0..10 {
            sim.step();
            assert!(sim.pool().active_count() <= 2);
        }
        assert_eq!(sim.pool().active_count(), 2);
    }

    #[test]
    fn test_render_scene() {
        let mut sim = sim(FixedCoin(true));
        for _ in 0..20 {
            sim.step();
        }
        let mut fb = FrameBuffer::new(128, 64);
        let mut text = TextLog::default();
        sim.render(&mut fb, &mut text);

        // Pins
        assert!(fb.get_pixel(64, 8));
        assert!(fb.get_pixel(32, 40));
        assert!(fb.get_pixel(96, 40));
        // Divider spans the width
        assert!((0..128).all(|x| fb.get_pixel(x, 43)));
        // Active balls
        for ball in sim.pool().active() {
            assert!(fb.get_pixel(ball.x, ball.y));
        }
        // No histogram yet
        assert!((0..128).all(|x| !fb.get_pixel(x, 63)));
        assert_eq!(text.0, vec![(0, 0, "0".to_string())]);
    }

    #[test]
    fn test_render_histogram_bars() {
        let mut sim = sim(FixedCoin(true));
        while sim.total() == 0 {
            sim.step();
        }
        let mut fb = FrameBuffer::new(128, 64);
        let mut text = TextLog::default();
        sim.render(&mut fb, &mut text);

        // Bin 5 at full height: columns 105..125, rows 44..63
        assert!(fb.get_pixel(105, 63));
        assert!(fb.get_pixel(124, 44));
        assert!(!fb.get_pixel(125, 63));
        assert!(!fb.get_pixel(104, 63));
        // Other bins empty
        assert!(!fb.get_pixel(0, 63));
        assert_eq!(text.0, vec![(0, 0, "1".to_string())]);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let sim = sim(FixedCoin(true));
        let mut fb = FrameBuffer::new(128, 64);
        fb.draw_filled_rect(0, 0, 128, 64, true);
        sim.render(&mut fb, &mut TextLog::default());
        assert!(!fb.get_pixel(127, 0));
    }

    #[test]
    fn test_splash_lines() {
        let sim = sim(FixedCoin(true));
        let mut fb = FrameBuffer::new(128, 64);
        let mut text = TextLog::default();
        sim.render_splash(&mut fb, &mut text);
        assert_eq!(
            text.0,
            vec![
                (10, 20, "GALTON BOARD".to_string()),
                (20, 35, "SIMULATION".to_string()),
            ]
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut sim = sim(FixedCoin(true));
        for _ in 0..12 {
            sim.step();
        }
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"ticks\":12"));
        assert!(json.contains("\"x\":64"));
    }

    #[test]
    fn test_determinism() {
        let mut a = sim(PcgCoin::new(99999));
        let mut b = sim(PcgCoin::new(99999));
        let mut font = MiniFont;

        for _ in 0..300 {
            a.step();
            b.step();
            let frame_a = a.render_frame(&mut font).clone();
            let frame_b = b.render_frame(&mut font);
            assert_eq!(&frame_a, frame_b);
        }
        assert_eq!(a.histogram(), b.histogram());
        assert!(a.total() > 0);
    }

    #[test]
    fn test_pins_come_from_pool() {
        let sim = sim(FixedCoin(true));
        assert_eq!(*sim.pins(), PinField::from_config(sim.config()));
        assert_eq!(sim.pins(), sim.pool().pins());
    }

    #[test]
    fn test_render_frame_matches_render() {
        let mut sim = sim(FixedCoin(false));
        for _ in 0..60 {
            sim.step();
        }
        let mut fb = FrameBuffer::new(128, 64);
        sim.render(&mut fb, &mut MiniFont);

        let frame = sim.render_frame(&mut MiniFont);
        assert_eq!((frame.width(), frame.height()), (128, 64));
        assert_eq!(frame, &fb);
    }

    #[test]
    fn test_narrowest_board_runs() {
        let config = BoardConfig {
            width: 5,
            bin_count: 1,
            spawn_interval: 1,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, PcgCoin::new(3)).unwrap();
        for _ in 0..200 {
            sim.step();
            for ball in sim.pool().active() {
                assert_eq!(ball.x, 2);
                assert!(ball.y >= 0 && ball.y < 64);
            }
        }
        assert!(sim.total() > 0);
        assert_eq!(sim.histogram().bins(), &[sim.total()]);
    }

    proptest! {
        #[test]
        fn prop_total_never_decreases(seed in any::<u64>()) {
            let mut sim = sim(PcgCoin::new(seed));
            let mut last = 0;
            for _ in 0..300 {
                sim.step();
                prop_assert!(sim.total() >= last);
                let sum: u32 = sim.histogram().bins().iter().sum();
                prop_assert_eq!(sum, sim.total());
                last = sim.total();
            }
        }
    }
}
