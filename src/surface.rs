// The drawing surface: the one stateful piece of the app.
// Visual: everything you see inside the window comes from here. The cache
// layer holds every line drawn so far; the frame is painted on top of it.
//
// The host feeds three kinds of events in, one at a time, on one thread:
//   size changes → on_size_changed
//   touches      → on_touch_event
//   repaints     → on_draw

use crate::config::PaintConfig;
use crate::path::StrokePath;
use crate::raster::{self, Paint};
use crate::types::{FrameBuffer, Point, Rect};

/// What the finger (or mouse button) just did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
    /// Any platform action we don't handle (hover, secondary pointers, ...).
    Other(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Drawing,
}

pub struct CanvasSurface {
    paint: Paint,
    background: u32,
    touch_tolerance: f32,
    border_inset: i32,
    content_description: String,

    /// Offscreen copy of everything drawn so far. `None` until the first size change.
    cache: Option<FrameBuffer>,
    frame: Option<Rect>,

    path: StrokePath,
    phase: Phase,
    touch: Point,   // latest raw touch position
    current: Point, // last committed point; the next curve bends around it
    invalidated: bool,
}

impl CanvasSurface {
    pub fn new(config: &PaintConfig) -> Self {
        Self {
            paint: config.paint(),
            background: config.background_color.rgb(),
            touch_tolerance: config.touch_tolerance_px(),
            border_inset: config.border_inset,
            content_description: config.content_description.clone(),
            cache: None,
            frame: None,
            path: StrokePath::new(),
            phase: Phase::Idle,
            touch: Point::default(),
            current: Point::default(),
            invalidated: false,
        }
    }

    /// New view size. Reallocates the cache layer at the new size and repaints it
    /// with the background; earlier strokes are dropped, not rescaled.
    /// Zero or negative sizes are ignored.
    pub fn on_size_changed(&mut self, width: i32, height: i32, old_width: i32, old_height: i32) {
        if width <= 0 || height <= 0 {
            tracing::debug!(width, height, "ignoring empty size change");
            return;
        }

        let fresh = FrameBuffer::new(width as usize, height as usize, self.background);
        // Swap in the new buffer; the old one is released right here.
        let old = std::mem::replace(&mut self.cache, Some(fresh));
        tracing::debug!(
            width,
            height,
            old_width,
            old_height,
            released = old.is_some(),
            "cache layer reallocated"
        );
        drop(old);

        self.frame = Some(Rect::inset_bounds(width, height, self.border_inset));
        self.invalidated = true;
    }

    /// Composite onto `target`: cache layer at the origin first, border frame on top.
    pub fn on_draw(&self, target: &mut FrameBuffer) {
        let Some(cache) = &self.cache else { return };
        target.blit(cache, 0, 0);
        if let Some(frame) = self.frame {
            raster::stroke_rect(target, frame, &self.paint);
        }
    }

    /// Feed one touch event. Always reports the event as consumed.
    pub fn on_touch_event(&mut self, action: TouchAction, x: f32, y: f32) -> bool {
        self.touch = Point::new(x, y);
        match action {
            TouchAction::Down => self.touch_start(),
            TouchAction::Move => self.touch_move(),
            TouchAction::Up => self.touch_up(),
            TouchAction::Cancel | TouchAction::Other(_) => {}
        }
        true
    }

    fn touch_start(&mut self) {
        self.path.reset();
        self.path.move_to(self.touch);
        self.current = self.touch;
        self.phase = Phase::Drawing;
    }

    fn touch_move(&mut self) {
        let dx = (self.touch.x - self.current.x).abs();
        let dy = (self.touch.y - self.current.y).abs();
        if dx < self.touch_tolerance && dy < self.touch_tolerance {
            tracing::trace!(dx, dy, "move below touch tolerance, ignored");
            return;
        }

        // Previous point is the control point, midpoint is the end: a chain of smooth arcs.
        self.path.quad_to(self.current, self.touch.midpoint(self.current));
        self.current = self.touch;

        if let Some(cache) = self.cache.as_mut() {
            raster::stroke_path(cache, &self.path, &self.paint);
        }
        tracing::trace!(x = self.touch.x, y = self.touch.y, "stroke extended");
        self.invalidated = true;
    }

    fn touch_up(&mut self) {
        // The cache already holds the line; clearing the path keeps it from being drawn again.
        self.path.reset();
        self.phase = Phase::Idle;
    }

    /// True if something changed since the last call. Clears the flag.
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub fn cache(&self) -> Option<&FrameBuffer> {
        self.cache.as_ref()
    }

    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_point(&self) -> Point {
        self.current
    }

    pub fn touch_point(&self) -> Point {
        self.touch
    }

    pub fn content_description(&self) -> &str {
        &self.content_description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    fn config(tolerance: f32) -> PaintConfig {
        PaintConfig { touch_slop: tolerance, ..PaintConfig::default() }
    }

    fn sized(tolerance: f32, w: i32, h: i32) -> CanvasSurface {
        let mut s = CanvasSurface::new(&config(tolerance));
        s.on_size_changed(w, h, 0, 0);
        s.take_invalidation();
        s
    }

    fn bg() -> u32 {
        PaintConfig::default().background_color.rgb()
    }

    fn ink() -> u32 {
        PaintConfig::default().stroke_color.rgb()
    }

    #[test]
    fn end_to_end_gesture() {
        let mut s = sized(4.0, 200, 200);

        assert!(s.on_touch_event(TouchAction::Down, 100.0, 100.0));
        assert_eq!(s.phase(), Phase::Drawing);

        // No movement: filtered as jitter.
        assert!(s.on_touch_event(TouchAction::Move, 100.0, 100.0));
        assert_eq!(s.path().commands().len(), 1);
        assert!(!s.take_invalidation());

        // dx = 10 ≥ 4: accepted.
        s.on_touch_event(TouchAction::Move, 110.0, 100.0);
        assert_eq!(
            s.path().commands().last(),
            Some(&PathCommand::QuadTo {
                ctrl: Point::new(100.0, 100.0),
                end: Point::new(105.0, 100.0),
            })
        );
        assert_eq!(s.last_point(), Point::new(110.0, 100.0));
        assert!(s.take_invalidation());

        s.on_touch_event(TouchAction::Up, 110.0, 100.0);
        assert!(s.path().is_empty());
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.cache().unwrap().pixel(102, 100), Some(ink()));
    }

    #[test]
    fn jitter_never_touches_path_or_cache() {
        let mut s = sized(8.0, 100, 100);
        s.on_touch_event(TouchAction::Down, 50.0, 50.0);
        let before = s.cache().unwrap().clone();
        for (x, y) in [(57.9, 50.0), (50.0, 42.1), (55.0, 55.0), (43.0, 57.0)] {
            s.on_touch_event(TouchAction::Move, x, y);
            assert_eq!(s.path().commands().len(), 1);
            assert_eq!(s.last_point(), Point::new(50.0, 50.0));
            assert!(!s.take_invalidation());
        }
        assert_eq!(s.cache().unwrap(), &before);
        // Raw point is still tracked.
        assert_eq!(s.touch_point(), Point::new(43.0, 57.0));
    }

    #[test]
    fn one_axis_at_tolerance_is_enough() {
        let mut s = sized(8.0, 100, 100);
        s.on_touch_event(TouchAction::Down, 50.0, 50.0);
        s.on_touch_event(TouchAction::Move, 50.0, 58.0);
        assert_eq!(s.path().commands().len(), 2);
        assert_eq!(s.last_point(), Point::new(50.0, 58.0));
    }

    #[test]
    fn accepted_move_only_changes_pixels_near_the_stroke() {
        let mut s = sized(4.0, 120, 120);
        s.on_touch_event(TouchAction::Down, 30.0, 30.0);
        s.on_touch_event(TouchAction::Move, 60.0, 50.0);
        let (min, max) = s.path().bounds().unwrap();
        let reach = PaintConfig::default().stroke_width_px() / 2.0 + 1.0;

        let cache = s.cache().unwrap();
        let mut changed = 0;
        for y in 0..cache.height {
            for x in 0..cache.width {
                if cache.pixel(x, y) != Some(bg()) {
                    changed += 1;
                    assert!(x as f32 >= min.x - reach && x as f32 <= max.x + reach);
                    assert!(y as f32 >= min.y - reach && y as f32 <= max.y + reach);
                }
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn down_resets_path_from_any_state() {
        let mut s = sized(1.0, 100, 100);
        s.on_touch_event(TouchAction::Down, 10.0, 10.0);
        s.on_touch_event(TouchAction::Move, 20.0, 20.0);
        s.on_touch_event(TouchAction::Move, 30.0, 25.0);

        // A second Down mid-gesture starts over.
        s.on_touch_event(TouchAction::Down, 70.0, 70.0);
        assert_eq!(s.path().commands(), &[PathCommand::MoveTo(Point::new(70.0, 70.0))]);
        assert_eq!(s.last_point(), Point::new(70.0, 70.0));

        s.on_touch_event(TouchAction::Down, 70.0, 70.0);
        assert_eq!(s.path().commands().len(), 1);
        assert_eq!(s.phase(), Phase::Drawing);
    }

    #[test]
    fn redraw_after_up_shows_only_cached_content() {
        let mut s = sized(4.0, 160, 160);
        s.on_touch_event(TouchAction::Down, 60.0, 80.0);
        s.on_touch_event(TouchAction::Move, 80.0, 80.0);
        s.on_touch_event(TouchAction::Move, 100.0, 90.0);
        s.on_touch_event(TouchAction::Up, 100.0, 90.0);
        let cache_after_up = s.cache().unwrap().clone();

        let mut first = FrameBuffer::new(160, 160, 0);
        s.on_draw(&mut first);
        let mut second = FrameBuffer::new(160, 160, 0);
        s.on_draw(&mut second);
        assert_eq!(first, second);
        assert_eq!(s.cache().unwrap(), &cache_after_up);

        // Away from the frame, the target is exactly the cache.
        for y in 50..110 {
            for x in 50..110 {
                assert_eq!(first.pixel(x, y), cache_after_up.pixel(x, y));
            }
        }
    }

    #[test]
    fn draw_puts_frame_on_top_of_cache() {
        let s = sized(4.0, 200, 120);
        assert_eq!(s.frame(), Some(Rect::new(40, 40, 160, 80)));

        let mut target = FrameBuffer::new(200, 120, 0);
        s.on_draw(&mut target);
        assert_eq!(target.pixel(40, 60), Some(ink()));
        assert_eq!(target.pixel(100, 80), Some(ink()));
        assert_eq!(target.pixel(100, 60), Some(bg()));
        assert_eq!(target.pixel(5, 5), Some(bg()));
        // The frame never lands in the cache.
        assert_eq!(s.cache().unwrap().pixel(40, 60), Some(bg()));
    }

    #[test]
    fn draw_before_first_size_leaves_target_alone() {
        let s = CanvasSurface::new(&config(4.0));
        let mut target = FrameBuffer::new(10, 10, 7);
        s.on_draw(&mut target);
        assert!(target.pixels.iter().all(|&p| p == 7));
    }

    #[test]
    fn resize_yields_fresh_background_layer() {
        let mut s = sized(4.0, 100, 100);
        s.on_touch_event(TouchAction::Down, 20.0, 20.0);
        s.on_touch_event(TouchAction::Move, 60.0, 60.0);
        assert!(s.cache().unwrap().pixels.iter().any(|&p| p != bg()));

        s.on_size_changed(150, 80, 100, 100);
        let cache = s.cache().unwrap();
        assert_eq!((cache.width, cache.height), (150, 80));
        assert_eq!(cache.pixels.len(), 150 * 80);
        assert!(cache.pixels.iter().all(|&p| p == bg()));
        assert_eq!(s.frame(), Some(Rect::new(40, 40, 110, 40)));
        assert!(s.take_invalidation());
    }

    #[test]
    fn empty_or_negative_size_is_a_no_op() {
        let mut s = sized(4.0, 64, 48);
        let before = s.cache().unwrap().clone();
        s.on_size_changed(0, 48, 64, 48);
        s.on_size_changed(64, -3, 64, 48);
        assert_eq!(s.cache().unwrap(), &before);
        assert_eq!(s.frame(), Some(Rect::inset_bounds(64, 48, 40)));
        assert!(!s.take_invalidation());

        let mut fresh = CanvasSurface::new(&config(4.0));
        fresh.on_size_changed(0, 0, 0, 0);
        assert!(fresh.cache().is_none());
    }

    #[test]
    fn moves_before_any_size_still_track_the_path() {
        let mut s = CanvasSurface::new(&config(4.0));
        s.on_touch_event(TouchAction::Down, 0.0, 0.0);
        s.on_touch_event(TouchAction::Move, 10.0, 0.0);
        assert_eq!(s.path().commands().len(), 2);
        assert!(s.cache().is_none());
    }

    #[test]
    fn unknown_actions_are_consumed_and_ignored() {
        let mut s = sized(4.0, 50, 50);
        s.on_touch_event(TouchAction::Down, 10.0, 10.0);
        assert!(s.on_touch_event(TouchAction::Other(7), 40.0, 40.0));
        assert!(s.on_touch_event(TouchAction::Cancel, 40.0, 40.0));
        assert_eq!(s.path().commands().len(), 1);
        assert_eq!(s.phase(), Phase::Drawing);
        assert_eq!(s.last_point(), Point::new(10.0, 10.0));
    }

    #[test]
    fn content_description_comes_from_config() {
        let cfg = PaintConfig { content_description: "canvas".into(), ..PaintConfig::default() };
        assert_eq!(CanvasSurface::new(&cfg).content_description(), "canvas");
    }
}
