//! Pure framing geometry: coordinate transforms, pan/zoom clamping and safe zones.

/// Image/frame/display transforms and scale computation.
pub mod resolver;
/// Region of a crop that survives both reference device ratios.
pub mod safe_zone;
