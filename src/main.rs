// What you SEE now:
// • A window filled with the background color and a frame inset from its edges.
// • Hold Left Mouse and drag: a smooth line follows the cursor and stays there.
// • Resizing the window starts over with a blank canvas. ESC quits.
//
// Set MINI_PAINT_CONFIG=path/to/config.toml to change colors or pen size,
// RUST_LOG=debug to watch resizes and buffer swaps.

use mini_paint::types::FrameBuffer;
use mini_paint::window::{Drawer, PointerTracker};
use mini_paint::{CanvasSurface, Error, PaintConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    /* --- Config + window setup ---
       Visual: window opens at the configured size. */
    let config = PaintConfig::from_env()?;
    let mut drawer = Drawer::new(&config)?;
    tracing::info!(width = config.width, height = config.height, "window opened");

    /* --- The drawing surface ---
       Visual: nothing yet; it gets its cache layer on the first size change below. */
    let mut surface = CanvasSurface::new(&config);
    tracing::info!(description = surface.content_description(), "canvas ready");
    let mut pointer = PointerTracker::default();

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(0, 0, 0);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Size: a changed window size reallocates the canvas (old drawing is lost). */
        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) {
            surface.on_size_changed(w as i32, h as i32, screen.width as i32, screen.height as i32);
            screen = FrameBuffer::new(w, h, 0);
        }

        /* 2) Input: left mouse is the finger. */
        if let Some((action, x, y)) = pointer.poll(drawer.left_mouse_down(), drawer.mouse_pos()) {
            surface.on_touch_event(action, x, y);
        }

        /* 3) Repaint only when the surface asked for it. */
        if surface.take_invalidation() {
            surface.on_draw(&mut screen);
        }

        /* 4) Present (a minimized window has no area; just keep events flowing). */
        if screen.width == 0 || screen.height == 0 {
            drawer.pump();
        } else {
            drawer.present(&screen)?;
        }
    }

    Ok(())
}
