//! A finger-painting canvas: touch events in, smoothed strokes cached in an
//! offscreen pixel buffer, composited with a border frame on each repaint.

pub mod config;
pub mod error;
pub mod path;
pub mod raster;
pub mod surface;
pub mod types;
pub mod window;

pub use config::PaintConfig;
pub use error::Error;
pub use surface::{CanvasSurface, Phase, TouchAction};
