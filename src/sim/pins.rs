//! Triangular pin lattice geometry
//!
//! Row `r` (0-based) holds `r + 1` pins, centered horizontally on the display
//! and sitting at `y = (r + 1) * row_spacing`. A ball is "crossing" a row while
//! it is within the tolerance window of the row line and still above the
//! bottom of the lattice.

use crate::config::BoardConfig;
use crate::consts::CROSSING_TOLERANCE;

/// Pin positions and crossing test (no mutable state)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinField {
    rows: usize,
    row_spacing: i32,
    pin_spacing: i32,
    center_x: i32,
    tolerance: i32,
}

impl PinField {
    pub fn new(rows: usize, row_spacing: i32, pin_spacing: i32, center_x: i32) -> Self {
        Self {
            rows,
            row_spacing,
            pin_spacing,
            center_x,
            tolerance: CROSSING_TOLERANCE,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(
            config.pin_rows,
            config.row_spacing,
            config.pin_spacing,
            config.width / 2,
        )
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn pins_in_row(&self, row: usize) -> usize {
        row + 1
    }

    /// Vertical position of a row's pins
    #[inline]
    pub fn row_y(&self, row: usize) -> i32 {
        (row as i32 + 1) * self.row_spacing
    }

    /// Horizontal position of pin `col` in `row`
    pub fn pin_x(&self, row: usize, col: usize) -> i32 {
        let span = (self.pins_in_row(row) as i32 - 1) * self.pin_spacing;
        self.center_x - span / 2 + col as i32 * self.pin_spacing
    }

    /// Y below which no deflection can happen
    #[inline]
    pub fn lattice_bottom(&self) -> i32 {
        self.rows as i32 * self.row_spacing
    }

    /// True when a ball at `ball_y` is passing row `row` this tick
    pub fn is_crossing(&self, ball_y: i32, row: usize) -> bool {
        row < self.rows
            && (ball_y - self.row_y(row)).abs() <= self.tolerance
            && ball_y < self.lattice_bottom()
    }

    /// Row whose line is nearest to `ball_y`, if it is a real row
    pub fn row_near(&self, ball_y: i32) -> Option<usize> {
        let nearest_line = (ball_y + self.row_spacing / 2).div_euclid(self.row_spacing);
        let row = nearest_line - 1;
        (row >= 0 && (row as usize) < self.rows).then_some(row as usize)
    }

    /// Row that deflects a ball at `ball_y` this tick, if any
    pub fn deflecting_row(&self, ball_y: i32) -> Option<usize> {
        self.row_near(ball_y)
            .filter(|&row| self.is_crossing(ball_y, row))
    }

    /// Every pin centre, row by row, left to right
    pub fn pins(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.pins_in_row(row)).map(move |col| (self.pin_x(row, col), self.row_y(row)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> PinField {
        PinField::from_config(&BoardConfig::default())
    }

    #[test]
    fn test_row_geometry() {
        let pins = field();
        assert_eq!(pins.pins_in_row(0), 1);
        assert_eq!(pins.pins_in_row(4), 5);
        assert_eq!(pins.row_y(0), 8);
        assert_eq!(pins.row_y(4), 40);

        assert_eq!(pins.pin_x(0, 0), 64);
        assert_eq!(pins.pin_x(1, 0), 56);
        assert_eq!(pins.pin_x(1, 1), 72);
        assert_eq!(pins.pin_x(4, 0), 32);
        assert_eq!(pins.pin_x(4, 4), 96);
    }

    #[test]
    fn test_pins_are_symmetric() {
        let pins = field();
        for row in 0..pins.rows() {
            let n = pins.pins_in_row(row);
            let left = pins.pin_x(row, 0);
            let right = pins.pin_x(row, n - 1);
            assert_eq!(64 - left, right - 64, "row {}", row);
        }
        assert_eq!(pins.pins().count(), 15);
    }

    #[test]
    fn test_crossing_window() {
        let pins = field();
        assert!(!pins.is_crossing(6, 0));
        assert!(pins.is_crossing(7, 0));
        assert!(pins.is_crossing(8, 0));
        assert!(pins.is_crossing(9, 0));
        assert!(!pins.is_crossing(10, 0));

        // Last row is cut off at the lattice bottom (y < 40)
        assert!(pins.is_crossing(39, 4));
        assert!(!pins.is_crossing(40, 4));
        assert!(!pins.is_crossing(41, 4));

        // Rows past the lattice never cross
        assert!(!pins.is_crossing(48, 5));
    }

    #[test]
    fn test_deflecting_rows() {
        let pins = field();
        let hits: Vec<(i32, usize)> = (0..50)
            .filter_map(|y| pins.deflecting_row(y).map(|row| (y, row)))
            .collect();

        let expected: Vec<(i32, usize)> = vec![
            (7, 0), (8, 0), (9, 0),
            (15, 1), (16, 1), (17, 1),
            (23, 2), (24, 2), (25, 2),
            (31, 3), (32, 3), (33, 3),
            (39, 4),
        ];
        assert_eq!(hits, expected);
    }

    #[test]
    fn test_row_near_outside_lattice() {
        let pins = field();
        assert_eq!(pins.row_near(0), None);
        assert_eq!(pins.row_near(3), None);
        assert_eq!(pins.row_near(4), Some(0));
        assert_eq!(pins.row_near(44), None);
    }
}
