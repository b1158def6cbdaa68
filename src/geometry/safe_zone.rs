use crate::{
    foundation::core::Point,
    metadata::model::{CropRect, FramingMetadata},
};

/// Narrow reference ratio (portrait phone).
pub const MOBILE_ASPECT: f64 = 9.0 / 16.0;
/// Wide reference ratio (desktop hero).
pub const DESKTOP_ASPECT: f64 = 16.0 / 9.0;

/// Sub-rectangle of `crop` that stays visible on both reference ratios, centered in `crop`.
///
/// This is a visual guide for the host and is never enforced on the crop itself.
pub fn safe_zone(crop: CropRect) -> CropRect {
    let (safe_width, safe_height) = if crop.aspect() > MOBILE_ASPECT {
        let h = crop.height;
        (h * MOBILE_ASPECT, h)
    } else {
        let w = crop.width;
        (w, w / DESKTOP_ASPECT)
    };
    CropRect::new(
        crop.x + (crop.width - safe_width) * 0.5,
        crop.y + (crop.height - safe_height) * 0.5,
        safe_width,
        safe_height,
    )
}

/// Inclusive point-in-rectangle test in source pixels.
pub(crate) fn contains_point(zone: CropRect, p: Point) -> bool {
    p.x >= zone.x && p.x <= zone.x + zone.width && p.y >= zone.y && p.y <= zone.y + zone.height
}

/// Whether the subject marked by the focus point falls outside the safe zone.
///
/// Metadata without a focus point resolves to the crop center, which is always inside.
pub fn focus_outside_safe_zone(meta: &FramingMetadata) -> bool {
    !contains_point(safe_zone(meta.crop_rect), meta.focus_source())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/safe_zone.rs"]
mod tests;
