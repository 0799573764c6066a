use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Corner representation of a box, `(x_1, y_1)` top-left and `(x_2, y_2)` bottom-right.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct BBox {
    pub x_1: f64,
    pub y_1: f64,
    pub x_2: f64,
    pub y_2: f64,
}

impl BBox {
    pub fn new(x_1: f64, y_1: f64, x_2: f64, y_2: f64) -> Self {
        if x_1 > x_2 || y_1 > y_2 {
            return BBox {
                x_1: 0.0,
                y_1: 0.0,
                x_2: 0.0,
                y_2: 0.0,
            };
        };
        BBox { x_1, y_1, x_2, y_2 }
    }

    /// Builds a box from the detector layout `[ymin, xmin, ymax, xmax]`.
    pub fn from_detector_layout([y_min, x_min, y_max, x_max]: [f64; 4]) -> Self {
        Self::new(x_min, y_min, x_max, y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_2 - self.x_1
    }

    pub fn height(&self) -> f64 {
        self.y_2 - self.y_1
    }

    pub fn area(&self) -> f64 {
        (self.width() * self.height()).max(0.0)
    }

    pub fn centroid(&self) -> CentroidBox {
        CentroidBox {
            cx: (self.x_1 + self.x_2) / 2.0,
            cy: (self.y_1 + self.y_2) / 2.0,
            w: self.width(),
            h: self.height(),
        }
    }

    /// Scales a normalized box to the pixel grid of `resolution`.
    pub fn scale(&self, resolution: Resolution) -> Self {
        let (w, h) = resolution.as_f64();
        BBox {
            x_1: self.x_1 * w,
            y_1: self.y_1 * h,
            x_2: self.x_2 * w,
            y_2: self.y_2 * h,
        }
    }

    /// Intersection area with `other`, each extent widened by `offset` before clamping at zero.
    ///
    /// An offset of `1.0` reproduces the inclusive pixel convention `x_2 - x_1 + 1`.
    pub fn intersection(&self, other: &Self, offset: f64) -> f64 {
        let iwidth = (self.x_2.min(other.x_2) - self.x_1.max(other.x_1) + offset).max(0.0);
        let iheight = (self.y_2.min(other.y_2) - self.y_1.max(other.y_1) + offset).max(0.0);
        iwidth * iheight
    }

    pub fn is_finite(&self) -> bool {
        [self.x_1, self.y_1, self.x_2, self.y_2]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Corner points in the order bottom-left, bottom-right, top-left, top-right.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            Vector2::new(self.x_1, self.y_2),
            Vector2::new(self.x_2, self.y_2),
            Vector2::new(self.x_1, self.y_1),
            Vector2::new(self.x_2, self.y_1),
        ]
    }
}

/// Center point plus extent, `(cx, cy, w, h)`.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct CentroidBox {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl CentroidBox {
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(self.cx, self.cy)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.cy + self.h / 2.0
    }
}

/// Output frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn as_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl TryFrom<[u32; 2]> for Resolution {
    type Error = Error;

    fn try_from([width, height]: [u32; 2]) -> Result<Self> {
        Self::new(width, height)
    }
}

impl From<Resolution> for [u32; 2] {
    fn from(resolution: Resolution) -> Self {
        [resolution.width, resolution.height]
    }
}
