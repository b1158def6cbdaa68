use crate::foundation::error::{PosterframeError, PosterframeResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Natural pixel dimensions of a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in source pixels (> 0).
    pub width: u32,
    /// Height in source pixels (> 0).
    pub height: u32,
}

impl ImageSize {
    /// Build from integer dimensions, rejecting zero.
    pub fn new(width: u32, height: u32) -> PosterframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterframeError::InvalidImageDimensions {
                width: f64::from(width),
                height: f64::from(height),
            });
        }
        Ok(Self { width, height })
    }

    /// Build from probe output, which may carry non-finite or fractional values.
    ///
    /// Fractional values are rounded to the nearest pixel; anything that does not round to a
    /// positive `u32` is rejected.
    pub fn from_probe(width: f64, height: f64) -> PosterframeResult<Self> {
        let invalid = || PosterframeError::InvalidImageDimensions { width, height };
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }
        let (w, h) = (width.round(), height.round());
        if w < 1.0 || h < 1.0 || w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
            return Err(invalid());
        }
        Ok(Self {
            width: w as u32,
            height: h as u32,
        })
    }

    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Full-image rectangle in source-pixel coordinates.
    pub fn bounds(self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.to_size())
    }
}

/// Straight (non-premultiplied) RGBA8 color used by render directives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
