// Window glue: a minifb window stands in for the phone screen.
// Visual effects provided here:
// 1) A (resizable) window that shows whatever the surface composited.
// 2) The left mouse button acting as a single finger: press, drag, release.

use crate::config::PaintConfig;
use crate::error::Error;
use crate::surface::TouchAction;
use crate::types::FrameBuffer;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Open the window described by the config. The accessibility description doubles as the title.
    /// Visual: a new empty window appears.
    pub fn new(config: &PaintConfig) -> Result<Self, Error> {
        let opts = WindowOptions {
            resize: true,
            borderless: config.borderless,
            ..WindowOptions::default()
        };
        let mut window = Window::new(&config.content_description, config.width, config.height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without presenting (used while the window has no area).
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/// Turns polled mouse state into touch events, the way a touchscreen would report them.
#[derive(Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    /// Feed this frame's button state and position; get at most one touch event back.
    pub fn poll(&mut self, pressed: bool, pos: Option<(f32, f32)>) -> Option<(TouchAction, f32, f32)> {
        match (self.down, pressed) {
            (false, true) => {
                let (x, y) = pos?;
                self.down = true;
                self.last = Some((x, y));
                Some((TouchAction::Down, x, y))
            }
            (true, true) => {
                let (x, y) = pos?;
                if self.last == Some((x, y)) {
                    return None;
                }
                self.last = Some((x, y));
                Some((TouchAction::Move, x, y))
            }
            (true, false) => {
                self.down = false;
                let (x, y) = pos.or(self.last)?;
                self.last = None;
                Some((TouchAction::Up, x, y))
            }
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_drag_release_maps_to_down_move_up() {
        let mut p = PointerTracker::default();
        assert_eq!(p.poll(false, Some((1.0, 1.0))), None);
        assert_eq!(p.poll(true, Some((1.0, 1.0))), Some((TouchAction::Down, 1.0, 1.0)));
        assert_eq!(p.poll(true, Some((1.0, 1.0))), None);
        assert_eq!(p.poll(true, Some((5.0, 2.0))), Some((TouchAction::Move, 5.0, 2.0)));
        assert_eq!(p.poll(false, None), Some((TouchAction::Up, 5.0, 2.0)));
        assert_eq!(p.poll(false, None), None);
    }

    #[test]
    fn press_outside_the_window_waits_for_a_position() {
        let mut p = PointerTracker::default();
        assert_eq!(p.poll(true, None), None);
        assert_eq!(p.poll(true, Some((3.0, 4.0))), Some((TouchAction::Down, 3.0, 4.0)));
    }
}
