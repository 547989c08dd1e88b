// Error type for the host glue. The drawing surface itself never fails;
// only the window and the config file can.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the frame to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Config file could not be read
    #[error("Config read error ({}): {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `PaintConfig`
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A color string was not `#RRGGBB` / `#AARRGGBB`
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}
