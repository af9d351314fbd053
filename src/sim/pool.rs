//! Ball slots and their per-tick lifecycle
//!
//! Slots are allocated first-free. When every slot is busy a spawn request is
//! simply dropped. Each tick an active ball:
//! 1. gets deflected if it is crossing a pin row,
//! 2. falls one pixel,
//! 3. lands (and frees its slot) once it reaches the landing line.

use serde::{Deserialize, Serialize};

use super::histogram::HistogramAggregator;
use super::pins::PinField;
use super::rng::CoinSource;
use crate::config::BoardConfig;

/// One ball slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    /// `false` means the slot is free
    pub active: bool,
}

/// Fixed-capacity ball arena
#[derive(Debug, Clone)]
pub struct BallPool {
    slots: Vec<Ball>,
    pins: PinField,
    spawn_x: i32,
    radius: i32,
    /// Largest x a ball may take after a deflection
    max_x: i32,
    deflection_step: i32,
    landing_y: i32,
    bin_width: i32,
    bin_count: usize,
}

impl BallPool {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            slots: vec![Ball::default(); config.max_balls],
            pins: PinField::from_config(config),
            spawn_x: config.width / 2,
            radius: config.ball_radius,
            max_x: config.width - config.ball_radius - 1,
            deflection_step: config.deflection_step,
            landing_y: config.landing_y(),
            bin_width: config.bin_width().max(1),
            bin_count: config.bin_count.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    /// Active balls in slot order
    pub fn active(&self) -> impl Iterator<Item = &Ball> {
        self.slots.iter().filter(|b| b.active)
    }

    /// All slots, free ones included
    pub fn slots(&self) -> &[Ball] {
        &self.slots
    }

    pub fn pins(&self) -> &PinField {
        &self.pins
    }

    /// Activate the first free slot at the top centre.
    /// Returns `false` when the pool is full and the request was dropped.
    pub fn spawn(&mut self) -> bool {
        match self.slots.iter_mut().find(|b| !b.active) {
            Some(ball) => {
                *ball = Ball {
                    x: self.spawn_x,
                    y: 0,
                    active: true,
                };
                log::debug!("Spawned ball at x={}", self.spawn_x);
                true
            }
            None => {
                log::trace!("Ball pool full ({} slots), spawn dropped", self.slots.len());
                false
            }
        }
    }

    /// Histogram bin for a landing x position
    pub fn bin_for(&self, x: i32) -> usize {
        (x / self.bin_width).clamp(0, self.bin_count as i32 - 1) as usize
    }

    /// Advance every active ball by one tick. Returns how many landed.
    pub fn step_all<C: CoinSource + ?Sized>(
        &mut self,
        coin: &mut C,
        histogram: &mut HistogramAggregator,
    ) -> usize {
        let mut landed = 0;
        for i in 0..self.slots.len() {
            if !self.slots[i].active {
                continue;
            }
            let mut ball = self.slots[i];

            if self.pins.deflecting_row(ball.y).is_some() {
                let direction = if coin.coin() { 1 } else { -1 };
                ball.x += direction * self.deflection_step;
                ball.x = ball.x.clamp(self.radius, self.max_x);
            }

            ball.y += 1;

            if ball.y >= self.landing_y {
                let bin = self.bin_for(ball.x);
                histogram.record(bin);
                ball.active = false;
                landed += 1;
                log::debug!("Ball landed at x={} in bin {}", ball.x, bin);
            }

            self.slots[i] = ball;
        }
        landed
    }
}
