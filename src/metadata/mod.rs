//! Persisted framing model and the aspect ratios it may be framed at.

/// Selectable aspect ratios and `"W:H"` parsing.
pub mod aspect;
/// `FramingMetadata` and its parts.
pub mod model;
