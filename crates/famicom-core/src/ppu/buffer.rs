//! Double-buffered PPU framebuffer.

use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Two 256x240 planes of packed `0xAABBGGRR` pixels.
///
/// The PPU draws into the back plane; the front plane holds the last
/// completed frame. `swap` only flips an index, so no pixels are copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    planes: [Box<[u32]>; 2],
    front: usize,
}

impl FrameBuffer {
    pub const LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

    pub fn new() -> Self {
        Self {
            planes: [
                vec![0; Self::LEN].into_boxed_slice(),
                vec![0; Self::LEN].into_boxed_slice(),
            ],
            front: 0,
        }
    }

    /// Last completed frame.
    pub fn front(&self) -> &[u32] {
        &self.planes[self.front]
    }

    /// Frame currently being drawn.
    pub fn back(&self) -> &[u32] {
        &self.planes[self.front ^ 1]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        let back = self.front ^ 1;
        self.planes[back][y * SCREEN_WIDTH + x] = color;
    }

    pub fn swap(&mut self) {
        self.front ^= 1;
    }

    pub fn front_index(&self) -> usize {
        self.front
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_become_visible_after_swap() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(3, 2, 0xDEADBEEF);
        assert_eq!(fb.front()[2 * SCREEN_WIDTH + 3], 0);
        assert_eq!(fb.back()[2 * SCREEN_WIDTH + 3], 0xDEADBEEF);
        fb.swap();
        assert_eq!(fb.front()[2 * SCREEN_WIDTH + 3], 0xDEADBEEF);
        assert_eq!(fb.front_index(), 1);
    }
}
