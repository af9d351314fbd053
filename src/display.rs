//! Display transfer
//!
//! The core hands a page-packed buffer to a `DisplayTarget` once per frame and
//! never looks at the result. `TerminalDisplay` is the host backend: it draws
//! the buffer with half-block characters, two pixel rows per text line.

use std::io::Write;

use crate::consts::PAGE_HEIGHT;

/// Column/page window of the display to update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderArea {
    pub start_column: i32,
    pub end_column: i32,
    pub start_page: i32,
    pub end_page: i32,
}

impl RenderArea {
    /// Area covering a whole `width` x `height` screen
    pub fn full(width: i32, height: i32) -> Self {
        Self {
            start_column: 0,
            end_column: width - 1,
            start_page: 0,
            end_page: height / PAGE_HEIGHT - 1,
        }
    }

    pub fn columns(&self) -> i32 {
        (self.end_column - self.start_column + 1).max(0)
    }

    pub fn pages(&self) -> i32 {
        (self.end_page - self.start_page + 1).max(0)
    }

    /// Bytes transferred for this area
    pub fn buffer_len(&self) -> usize {
        (self.columns() * self.pages()) as usize
    }
}

/// Something that can show a page-packed framebuffer
pub trait DisplayTarget {
    /// Push `buffer` (laid out as `area.pages()` runs of `area.columns()` bytes)
    fn render_on_display(&mut self, buffer: &[u8], area: &RenderArea);
}

/// Renders frames to a text terminal
pub struct TerminalDisplay<W: Write> {
    out: W,
    /// Move the cursor home before each frame instead of scrolling
    redraw_in_place: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            redraw_in_place: true,
        }
    }

    /// Append frames one after another (useful when piping to a file)
    pub fn scrolling(out: W) -> Self {
        Self {
            out,
            redraw_in_place: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Build the text for one frame
    fn frame_text(buffer: &[u8], area: &RenderArea) -> String {
        let columns = area.columns();
        let rows = area.pages() * PAGE_HEIGHT;
        let pixel = |x: i32, y: i32| -> bool {
            let index = (x + (y / PAGE_HEIGHT) * columns) as usize;
            buffer
                .get(index)
                .is_some_and(|byte| byte & (1 << (y % PAGE_HEIGHT)) != 0)
        };

        let mut text = String::with_capacity(((columns + 1) * rows / 2) as usize * 3);
        for y in (0..rows).step_by(2) {
            for x in 0..columns {
                let ch = match (pixel(x, y), pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                text.push(ch);
            }
            text.push('\n');
        }
        text
    }
}

impl<W: Write> DisplayTarget for TerminalDisplay<W> {
    fn render_on_display(&mut self, buffer: &[u8], area: &RenderArea) {
        if buffer.len() < area.buffer_len() {
            log::warn!(
                "Short frame: {} bytes for a {}-byte area",
                buffer.len(),
                area.buffer_len()
            );
        }
        let text = Self::frame_text(buffer, area);
        let result = if self.redraw_in_place {
            write!(self.out, "\x1b[H{}", text)
        } else {
            write!(self.out, "{}", text)
        }
        .and_then(|_| self.out.flush());

        if let Err(e) = result {
            log::warn!("Display write failed: {}", e);
        }
    }
}
