//! Start-up configuration for the canvas.
//!
//! Everything here is resolved once before the surface is built and never
//! changes afterwards. Values can come from a TOML file; any key left out
//! keeps its default.
//!
//! ```toml
//! background_color = "#FFFF5500"
//! stroke_color = "#FFFFEB3B"
//! stroke_width = 12.0
//! touch_slop = 8.0
//! density = 2.0
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::raster::{Color, Paint};

/// Environment variable the host reads to find a config file.
pub const CONFIG_ENV: &str = "MINI_PAINT_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    #[serde(deserialize_with = "de_color")]
    pub background_color: Color,
    #[serde(deserialize_with = "de_color")]
    pub stroke_color: Color,
    /// Pen width in device-independent pixels.
    pub stroke_width: f32,
    /// Minimum drag distance in device-independent pixels.
    pub touch_slop: f32,
    /// Device pixels per device-independent pixel.
    pub density: f32,
    /// Gap between the view edge and the border frame, in device pixels.
    pub border_inset: i32,
    pub content_description: String,
    pub width: usize,
    pub height: usize,
    pub borderless: bool,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            background_color: Color(0xFF_FF_55_00),
            stroke_color: Color(0xFF_FF_EB_3B),
            stroke_width: 12.0,
            touch_slop: 8.0,
            density: 1.0,
            border_inset: 40,
            content_description: "Mini Paint canvas. Drag to draw a line.".to_string(),
            width: 800,
            height: 600,
            borderless: false,
        }
    }
}

impl PaintConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// File named by `MINI_PAINT_CONFIG` if set, defaults otherwise.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::info!(path = ?path, "loading config");
                Self::load(path)
            }
            None => {
                tracing::info!("no {CONFIG_ENV} set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn stroke_width_px(&self) -> f32 {
        self.stroke_width * self.density
    }

    pub fn touch_tolerance_px(&self) -> f32 {
        self.touch_slop * self.density
    }

    pub fn paint(&self) -> Paint {
        Paint::round_stroke(self.stroke_color, self.stroke_width_px())
    }
}

fn de_color<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
    let s = String::deserialize(d)?;
    s.parse::<Color>().map_err(serde::de::Error::custom)
}
