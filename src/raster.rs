// Software stroking into a FrameBuffer.
// Visual effects provided here:
// 1) Thick, round-capped strokes along a path (the finger-painted line).
// 2) The rectangular border frame drawn on top of the canvas.
//
// Everything is coverage based: each pixel gets a 0..1 "how much of the pen
// is on me" value, then the paint color is blended in with that strength.

use std::str::FromStr;

use crate::error::Error;
use crate::path::StrokePath;
use crate::types::{FrameBuffer, Point, Rect};

/// ARGB color, `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Drop alpha: the `0x00RRGGBB` layout minifb expects.
    pub const fn rgb(self) -> u32 {
        self.0 & 0x00_FF_FF_FF
    }
}

impl FromStr for Color {
    type Err = Error;

    /// `#RRGGBB` (opaque) or `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let hex = s.trim().strip_prefix('#').ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        let value = u32::from_str_radix(hex, 16).map_err(|_| Error::InvalidColor(s.to_string()))?;
        match hex.len() {
            6 => Ok(Color(0xFF_00_00_00 | value)),
            8 => Ok(Color(value)),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

/// How the ends of an open stroke look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cap {
    Round,
}

/// How two segments meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Join {
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Outline only, never filled.
    Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub anti_alias: bool,
    pub dither: bool,
    pub cap: Cap,
    pub join: Join,
    pub style: Style,
}

impl Paint {
    /// The finger-paint pen: round stroke, smoothed edges, dithered.
    pub fn round_stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
            anti_alias: true,
            dither: true,
            cap: Cap::Round,
            join: Join::Round,
            style: Style::Stroke,
        }
    }
}

/// 4x4 ordered-dither thresholds (0..15).
const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Stroke every sub-path of `path`.
/// Visual: the current line appears on the buffer with the paint's width and color.
pub fn stroke_path(fb: &mut FrameBuffer, path: &StrokePath, paint: &Paint) {
    for line in path.flatten() {
        stroke_polyline(fb, &line, paint);
    }
}

/// Stroke the outline of `rect`.
/// Visual: a rectangular frame, the line centred on the rect's edges.
pub fn stroke_rect(fb: &mut FrameBuffer, rect: Rect, paint: &Paint) {
    let (l, t, r, b) = (rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
    let outline = [
        Point::new(l, t),
        Point::new(r, t),
        Point::new(r, b),
        Point::new(l, b),
        Point::new(l, t),
    ];
    stroke_polyline(fb, &outline, paint);
}

/// Stroke a connected run of points.
/// Round caps and joins fall out of measuring each pixel's distance to the nearest segment.
pub fn stroke_polyline(fb: &mut FrameBuffer, points: &[Point], paint: &Paint) {
    if points.is_empty() || fb.width == 0 || fb.height == 0 {
        return;
    }
    let half = (paint.stroke_width / 2.0).max(0.5);
    let reach = half + 1.0;

    // Bounding box of the whole stroke, in pixels, clipped to the buffer.
    let (mut min, mut max) = (points[0], points[0]);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let Some(bbox) = clip_box(fb, min, max, reach) else { return };
    let bw = bbox.x1 - bbox.x0 + 1;
    let bh = bbox.y1 - bbox.y0 + 1;

    // Coverage takes the max over segments so overlapping pieces of one stroke don't stack.
    let mut coverage = vec![0.0f32; bw * bh];
    let segments = points.windows(2).map(|w| (w[0], w[1]));
    let dots = (points.len() == 1).then(|| (points[0], points[0]));

    for (a, b) in segments.chain(dots) {
        let seg_min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let seg_max = Point::new(a.x.max(b.x), a.y.max(b.y));
        let Some(sb) = clip_box(fb, seg_min, seg_max, reach) else { continue };

        for y in sb.y0..=sb.y1 {
            for x in sb.x0..=sb.x1 {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance_to_segment(centre, a, b);
                let c = if paint.anti_alias {
                    (half + 0.5 - d).clamp(0.0, 1.0)
                } else if d <= half {
                    1.0
                } else {
                    0.0
                };
                let idx = (y - bbox.y0) * bw + (x - bbox.x0);
                if c > coverage[idx] {
                    coverage[idx] = c;
                }
            }
        }
    }

    for by in 0..bh {
        for bx in 0..bw {
            let c = coverage[by * bw + bx];
            if c <= 0.0 { continue; }
            blend_pixel(fb, bbox.x0 + bx, bbox.y0 + by, paint, c);
        }
    }
}

struct PixelBox {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// Pixel range covering `[min, max]` grown by `reach`, or `None` if it misses the buffer.
fn clip_box(fb: &FrameBuffer, min: Point, max: Point, reach: f32) -> Option<PixelBox> {
    let x0 = (min.x - reach).floor();
    let y0 = (min.y - reach).floor();
    let x1 = (max.x + reach).ceil();
    let y1 = (max.y + reach).ceil();
    let (w, h) = (fb.width as f32, fb.height as f32);
    if !(x1 >= 0.0 && y1 >= 0.0 && x0 < w && y0 < h) {
        return None;
    }
    Some(PixelBox {
        x0: x0.max(0.0) as usize,
        y0: y0.max(0.0) as usize,
        x1: x1.min(w - 1.0) as usize,
        y1: y1.min(h - 1.0) as usize,
    })
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + abx * t, a.y + aby * t);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Source-over blend of the paint color at `coverage` strength.
/// Visual: fully covered pixels take the exact pen color; edge pixels mix with what's underneath.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: usize, y: usize, paint: &Paint, coverage: f32) {
    let a = coverage * paint.color.alpha() as f32 / 255.0;
    if a <= 0.0 { return; }
    let idx = y * fb.width + x;
    let src = paint.color.rgb();
    if a >= 1.0 {
        fb.pixels[idx] = src;
        return;
    }

    // Ordered dither spreads the rounding error instead of banding the soft edge.
    let bias = if paint.dither {
        (BAYER_4X4[y & 3][x & 3] as f32 + 0.5) / 16.0 - 0.5
    } else {
        0.0
    };

    let dst = fb.pixels[idx];
    let mut out = 0u32;
    for shift in [16u32, 8, 0] {
        let s = ((src >> shift) & 0xFF) as f32;
        let d = ((dst >> shift) & 0xFF) as f32;
        let v = (d + (s - d) * a + bias).round().clamp(0.0, 255.0) as u32;
        out |= v << shift;
    }
    fb.pixels[idx] = out;
}
