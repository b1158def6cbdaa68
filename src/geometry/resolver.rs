//! Coordinate math between image space, frame space and display space.
//!
//! Display space is frame-local: the frame occupies `(0,0)..(frame.width, frame.height)` and the
//! image is a scaled rectangle whose center sits `position` away from the frame center. All
//! functions here are total; out-of-range input is clamped, never rejected.

use crate::{
    foundation::core::{ImageSize, Point, Rect, Size, Vec2},
    foundation::math::{clamp_total, finite_positive},
    metadata::model::CropRect,
};

/// Lower bound of the interactive zoom factor.
pub const ZOOM_MIN: f64 = 0.5;
/// Upper bound of the interactive zoom factor.
pub const ZOOM_MAX: f64 = 3.0;
/// Lower bound for both base and display scale.
pub const SCALE_MIN: f64 = 0.1;
/// Base scale never upscales past natural size.
pub const BASE_SCALE_MAX: f64 = 1.0;
/// Display scale (base * zoom) ceiling.
pub const DISPLAY_SCALE_MAX: f64 = 2.0;

/// Scale at zoom 1: cover the frame in the governing dimension, clamped to `[0.1, 1]`.
pub fn base_scale(image: Size, frame: Size) -> f64 {
    let scale_for_width = frame.width / image.width;
    let scale_for_height = frame.height / image.height;
    clamp_total(
        scale_for_width.max(scale_for_height),
        SCALE_MIN,
        BASE_SCALE_MAX,
    )
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return 1.0;
    }
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Final display scale: `clamp(base * zoom, 0.1, 2)`.
pub fn display_scale(base: f64, zoom: f64) -> f64 {
    clamp_total(base * clamp_zoom(zoom), SCALE_MIN, DISPLAY_SCALE_MAX)
}

/// Area available to the frame: container minus `padding` on every side (at least 1x1).
pub fn available_area(container: Size, padding: f64) -> Size {
    let pad = padding.max(0.0) * 2.0;
    Size::new(
        (container.width - pad).max(1.0),
        (container.height - pad).max(1.0),
    )
}

/// Largest rectangle of ratio `aspect` that fits in `available`.
pub fn fit_frame(available: Size, aspect: f64) -> Size {
    let aspect = finite_positive(aspect).unwrap_or(1.0);
    if available.width / available.height > aspect {
        Size::new(available.height * aspect, available.height)
    } else {
        Size::new(available.width, available.width / aspect)
    }
}

/// Image rectangle in frame-local display coordinates.
pub fn image_display_rect(position: Vec2, scale: f64, frame: Size, image: ImageSize) -> Rect {
    let display = image.to_size() * scale;
    let center_x = frame.width * 0.5 + position.x;
    let center_y = frame.height * 0.5 + position.y;
    Rect::new(
        center_x - display.width * 0.5,
        center_y - display.height * 0.5,
        center_x + display.width * 0.5,
        center_y + display.height * 0.5,
    )
}

/// Source-pixel rectangle visible through the frame.
///
/// Intersects the frame with the panned image in display space, divides back by `scale`, and
/// clamps to the image bounds (an axis that would exceed the natural size snaps to it).
pub fn frame_to_crop_rect(position: Vec2, scale: f64, frame: Size, image: ImageSize) -> CropRect {
    let scale = finite_positive(scale).unwrap_or(1.0);
    let img = image_display_rect(position, scale, frame, image);
    let frame_rect = Rect::from_origin_size((0.0, 0.0), frame);

    let ix0 = img.x0.max(frame_rect.x0);
    let iy0 = img.y0.max(frame_rect.y0);
    let ix1 = img.x1.min(frame_rect.x1);
    let iy1 = img.y1.min(frame_rect.y1);

    CropRect::new(
        (ix0 - img.x0) / scale,
        (iy0 - img.y0) / scale,
        (ix1 - ix0).max(0.0) / scale,
        (iy1 - iy0).max(0.0) / scale,
    )
    .clamped_to(image)
}

/// Bound a pan offset so the frame never shows area outside the image.
///
/// On an axis where the displayed image is smaller than the frame the offset collapses to 0.
pub fn clamp_pan(position: Vec2, frame: Size, image_display: Size) -> Vec2 {
    let max_x = ((image_display.width - frame.width) * 0.5).max(0.0);
    let max_y = ((image_display.height - frame.height) * 0.5).max(0.0);
    Vec2::new(
        clamp_total(position.x, -max_x, max_x),
        clamp_total(position.y, -max_y, max_y),
    )
}

/// Inverse of [`frame_to_crop_rect`]: the pan offset that centers `crop` in the frame.
pub fn crop_rect_to_position(crop: CropRect, scale: f64, image: ImageSize) -> Vec2 {
    center_to_position(crop.center(), scale, image)
}

/// Pan offset that puts source point `center` under the frame center.
pub fn center_to_position(center: Point, scale: f64, image: ImageSize) -> Vec2 {
    Vec2::new(
        (f64::from(image.width) * 0.5 - center.x) * scale,
        (f64::from(image.height) * 0.5 - center.y) * scale,
    )
}

/// Source point currently under the frame center.
pub fn position_to_center(position: Vec2, scale: f64, image: ImageSize) -> Point {
    let scale = finite_positive(scale).unwrap_or(1.0);
    Point::new(
        f64::from(image.width) * 0.5 - position.x / scale,
        f64::from(image.height) * 0.5 - position.y / scale,
    )
}

/// Resolved frame/scale state for one editor layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub frame: Size,
    pub base_scale: f64,
    pub scale: f64,
}

impl FrameGeometry {
    pub fn compute(
        container: Size,
        padding: f64,
        aspect: f64,
        image: ImageSize,
        zoom: f64,
    ) -> Self {
        let frame = fit_frame(available_area(container, padding), aspect);
        let base = base_scale(image.to_size(), frame);
        Self {
            frame,
            base_scale: base,
            scale: display_scale(base, zoom),
        }
    }

    /// Geometry that shows exactly `crop` filling the frame, plus the zoom that yields it.
    ///
    /// The frame takes the crop's ratio at the largest size the padded container allows. When base
    /// scale and zoom cannot reach the scale that size needs, the frame shrinks to the crop at the
    /// nearest reachable scale so re-opened framing never shows a different region.
    pub fn for_crop(
        container: Size,
        padding: f64,
        crop: CropRect,
        image: ImageSize,
    ) -> (Self, f64) {
        let fitted = fit_frame(available_area(container, padding), crop.aspect());
        let wanted = clamp_total(fitted.width / crop.width, SCALE_MIN, DISPLAY_SCALE_MAX);
        let (geometry, zoom) = Self::showing_crop_at(crop, wanted, image);
        // Crops under a third of the image on both axes keep base scale at its floor, so zoom
        // tops out at SCALE_MIN * ZOOM_MAX.
        if geometry.scale * (1.0 + 1e-9) < wanted {
            return Self::showing_crop_at(crop, geometry.scale.min(SCALE_MIN * ZOOM_MAX), image);
        }
        (geometry, zoom)
    }

    fn showing_crop_at(crop: CropRect, scale: f64, image: ImageSize) -> (Self, f64) {
        let frame = Size::new(crop.width, crop.height) * scale;
        let base = base_scale(image.to_size(), frame);
        let zoom = clamp_zoom(scale / base);
        let geometry = Self {
            frame,
            base_scale: base,
            scale: display_scale(base, zoom),
        };
        (geometry, zoom)
    }

    pub fn image_display_size(&self, image: ImageSize) -> Size {
        image.to_size() * self.scale
    }

    pub fn clamp_pan(&self, position: Vec2, image: ImageSize) -> Vec2 {
        clamp_pan(position, self.frame, self.image_display_size(image))
    }

    pub fn crop_rect(&self, position: Vec2, image: ImageSize) -> CropRect {
        frame_to_crop_rect(position, self.scale, self.frame, image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolver.rs"]
mod tests;
