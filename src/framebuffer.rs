//! Page-packed monochrome framebuffer
//!
//! Layout matches SSD1306/SH1106 page addressing:
//! - The screen is split into 8-row pages
//! - One byte holds 8 vertically stacked pixels of one column in one page
//! - Bit 0 is the topmost pixel of the page
//! - Bytes run column by column across page 0, then page 1, and so on
//!
//! Every drawing call goes through `set_pixel`, which ignores coordinates
//! outside the screen, so primitives can be drawn partly off-screen.

use crate::consts::PAGE_HEIGHT;
use crate::display::RenderArea;

/// 1 bit per pixel framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a blank buffer. `height` is rounded up to a whole page.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let pages = (height.max(0) + PAGE_HEIGHT - 1) / PAGE_HEIGHT;
        Self {
            width,
            height: pages * PAGE_HEIGHT,
            data: vec![0; (width * pages) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of 8-row pages
    #[inline]
    pub fn pages(&self) -> i32 {
        self.height / PAGE_HEIGHT
    }

    /// Raw page-packed bytes, ready for the display
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Area covering the whole buffer
    pub fn render_area(&self) -> RenderArea {
        RenderArea::full(self.width, self.height)
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Byte index and bit mask for an in-bounds pixel
    #[inline]
    fn locate(&self, x: i32, y: i32) -> (usize, u8) {
        let index = (x + (y / PAGE_HEIGHT) * self.width) as usize;
        (index, 1 << (y % PAGE_HEIGHT))
    }

    /// Write one pixel. Off-screen coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !self.in_bounds(x, y) {
            return;
        }
        let (index, mask) = self.locate(x, y);
        if on {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    /// Read one pixel. Off-screen coordinates read as off.
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let (index, mask) = self.locate(x, y);
        self.data[index] & mask != 0
    }

    /// Count of pixels currently on
    pub fn lit_pixels(&self) -> u32 {
        self.data.iter().map(|b| b.count_ones()).sum()
    }

    /// Filled disc: every pixel with dx² + dy² <= radius²
    pub fn draw_disc(&mut self, cx: i32, cy: i32, radius: i32, on: bool) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy, on);
                }
            }
        }
    }

    /// Horizontal run of `len` pixels starting at (x, y)
    pub fn draw_hline(&mut self, x: i32, y: i32, len: i32, on: bool) {
        for i in 0..len.max(0) {
            self.set_pixel(x + i, y, on);
        }
    }

    /// Filled rectangle with top-left corner at (x, y)
    pub fn draw_filled_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        for row in 0..h.max(0) {
            self.draw_hline(x, y + row, w, on);
        }
    }
}
