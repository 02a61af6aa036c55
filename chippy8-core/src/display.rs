use std::io;

use crate::config::SpriteEdges;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Presents the framebuffer on some host surface.
pub trait Renderer {
    fn present(&mut self, frame: &Framebuffer) -> io::Result<()>;
}

/// Renderer that discards every frame.
#[derive(Debug, Default)]
pub struct Headless;

impl Renderer for Headless {
    fn present(&mut self, _frame: &Framebuffer) -> io::Result<()> {
        Ok(())
    }
}

/// 64x32 monochrome pixels, row-major. Pixels only ever change by XOR.
#[derive(Clone)]
pub struct Framebuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            dirty: false,
        }
    }
}

impl Framebuffer {
    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// Flips one pixel and returns its previous state.
    pub fn toggle(&mut self, col: usize, row: usize) -> bool {
        let index = row * DISPLAY_WIDTH + col;
        let previous = self.pixels[index];
        self.pixels[index] = !previous;
        previous
    }

    /// XORs an 8-pixel-wide sprite onto the screen, one byte per row, most
    /// significant bit leftmost. Returns whether any lit pixel was turned off.
    pub fn draw(&mut self, x: u8, y: u8, data: &[u8], edges: SpriteEdges) -> bool {
        let mut collision = false;
        for (j, row_bits) in data.iter().enumerate() {
            for i in 0..8 {
                if row_bits & (0x80 >> i) == 0 {
                    continue;
                }
                let col = x as usize + i;
                let row = y as usize + j;
                let target = match edges {
                    SpriteEdges::Wrap => Some((col % DISPLAY_WIDTH, row % DISPLAY_HEIGHT)),
                    SpriteEdges::Clip => {
                        let col = x as usize % DISPLAY_WIDTH + i;
                        let row = y as usize % DISPLAY_HEIGHT + j;
                        (col < DISPLAY_WIDTH && row < DISPLAY_HEIGHT).then_some((col, row))
                    }
                };
                if let Some((col, row)) = target {
                    collision |= self.toggle(col, row);
                }
            }
        }
        self.dirty = true;
        collision
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        self.pixels[row * DISPLAY_WIDTH + col]
    }

    pub fn snapshot(&self) -> &[bool; DISPLAY_WIDTH * DISPLAY_HEIGHT] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
