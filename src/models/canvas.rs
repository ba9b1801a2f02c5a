//! Drawable canvas bounds and geometry clamping.

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-size drawable rectangle that all widget geometry is clamped into.
///
/// # Validation
///
/// - width and height must both be positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Canvas {
    /// Creates a canvas, rejecting non-positive dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use reterminal_designer::models::Canvas;
    ///
    /// let canvas = Canvas::new(800, 480).unwrap();
    /// assert_eq!(canvas.width, 800);
    /// assert!(Canvas::new(0, 480).is_err());
    /// ```
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            anyhow::bail!("Canvas dimensions must be positive (got {width}x{height})");
        }
        Ok(Self { width, height })
    }

    /// Clamps a rectangle into the canvas.
    ///
    /// Size is capped first (`1..=canvas`), then the origin is moved so the
    /// rectangle lies fully inside. Returns `(x, y, width, height)`.
    #[must_use]
    pub fn clamp_rect(&self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32, i32, i32) {
        let width = width.clamp(1, self.width);
        let height = height.clamp(1, self.height);
        let x = x.clamp(0, self.width - width);
        let y = y.clamp(0, self.height - height);
        (x, y, width, height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT` (e.g. `800x480`), as accepted on the command line.
impl FromStr for Canvas {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow::anyhow!("Invalid canvas size '{s}'. Expected WIDTHxHEIGHT"))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid canvas width '{w}'"))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid canvas height '{h}'"))?;
        Self::new(width, height)
    }
}
