// Core types shared by the surface, the rasterizer and the window.

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the buffer is (pixels)
    pub height: usize,     // how tall the buffer is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Allocate a `width × height` buffer filled with `color`.
    pub fn new(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    /// Pixel at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Copy `src` into `self` with its top-left corner at (x, y), clipped to our bounds.
    /// Visual: the whole source image appears at that spot, nothing spills past the edges.
    pub fn blit(&mut self, src: &FrameBuffer, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = src.width.min(self.width - x);
        let h = src.height.min(self.height - y);
        for row in 0..h {
            let s = row * src.width;
            let d = (y + row) * self.width + x;
            self.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
        }
    }
}

/// A point in view coordinates (pixels, origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Integer rectangle; `right`/`bottom` are exclusive edges like the view bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Bounds of a `width × height` view shrunk by `inset` on all four sides.
    pub fn inset_bounds(width: i32, height: i32, inset: i32) -> Self {
        Self::new(inset, inset, width - inset, height - inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_to_destination() {
        let src = FrameBuffer::new(4, 4, 0x00_11_22_33);
        let mut dst = FrameBuffer::new(3, 2, 0);
        dst.blit(&src, 1, 1);
        assert_eq!(dst.pixel(0, 0), Some(0));
        assert_eq!(dst.pixel(1, 1), Some(0x00_11_22_33));
        assert_eq!(dst.pixel(2, 1), Some(0x00_11_22_33));
        assert_eq!(dst.pixel(0, 1), Some(0));
        assert_eq!(dst.pixel(3, 1), None);
    }

    #[test]
    fn inset_bounds_shrinks_every_side() {
        assert_eq!(Rect::inset_bounds(200, 100, 40), Rect::new(40, 40, 160, 60));
    }

    #[test]
    fn midpoint_halves_both_axes() {
        assert_eq!(Point::new(110.0, 100.0).midpoint(Point::new(100.0, 100.0)), Point::new(105.0, 100.0));
    }
}
