// The in-progress stroke: a move-to followed by a chain of quadratic curves.
// Visual: nothing by itself; the rasterizer turns it into the line under your cursor.

use crate::types::Point;

/// Curves are split into roughly this many pixels per line segment.
const FLATTEN_STEP_PX: f32 = 2.0;
/// Upper bound on line segments per curve, so a wild drag can't explode the work.
const MAX_SEGMENTS_PER_CURVE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    /// Quadratic Bézier from the current point, bending toward `ctrl`, ending at `end`.
    QuadTo { ctrl: Point, end: Point },
}

#[derive(Clone, Debug, Default)]
pub struct StrokePath {
    commands: Vec<PathCommand>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every command but keep the allocation for the next gesture.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Point, end: Point) {
        self.commands.push(PathCommand::QuadTo { ctrl, end });
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Where the pen currently rests, if anything was recorded.
    pub fn last_point(&self) -> Option<Point> {
        self.commands.last().map(|c| match *c {
            PathCommand::MoveTo(p) => p,
            PathCommand::QuadTo { end, .. } => end,
        })
    }

    /// Axis-aligned box around every point and control point (`(min, max)`).
    /// The control hull contains the curves, so this bounds what gets drawn.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut pts = self.commands.iter().flat_map(|c| match *c {
            PathCommand::MoveTo(p) => [Some(p), None],
            PathCommand::QuadTo { ctrl, end } => [Some(ctrl), Some(end)],
        }).flatten();

        let first = pts.next()?;
        let (mut min, mut max) = (first, first);
        for p in pts {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Turn the path into polylines, one per sub-path.
    /// A sub-path that is only a move-to yields nothing (a tap draws no dot).
    pub fn flatten(&self) -> Vec<Vec<Point>> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut pen = Point::default();

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if current.len() > 1 {
                        out.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                    pen = p;
                }
                PathCommand::QuadTo { ctrl, end } => {
                    if current.is_empty() {
                        current.push(pen);
                    }
                    let n = segment_count(pen, ctrl, end);
                    for i in 1..=n {
                        let t = i as f32 / n as f32;
                        current.push(quad_point(pen, ctrl, end, t));
                    }
                    pen = end;
                }
            }
        }
        if current.len() > 1 {
            out.push(current);
        }
        out
    }
}

fn distance(a: Point, b: Point) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

fn segment_count(p0: Point, ctrl: Point, p1: Point) -> usize {
    let hull = distance(p0, ctrl) + distance(ctrl, p1);
    ((hull / FLATTEN_STEP_PX).ceil() as usize).clamp(1, MAX_SEGMENTS_PER_CURVE)
}

/// B(t) = (1-t)²·p0 + 2(1-t)t·ctrl + t²·p1
#[inline]
fn quad_point(p0: Point, ctrl: Point, p1: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c) = (u * u, 2.0 * u * t, t * t);
    Point::new(
        a * p0.x + b * ctrl.x + c * p1.x,
        a * p0.y + b * ctrl.y + c * p1.y,
    )
}
