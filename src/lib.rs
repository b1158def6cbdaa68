//! Posterframe is a non-destructive image framing engine.
//!
//! A host frames an image once in an interactive editor; the result is a small
//! [`FramingMetadata`] value (crop rectangle, aspect ratio, optional focus point, fit mode) that
//! is stored next to the untouched source image. Any renderer can later resolve that single value
//! into a visible window for an arbitrary container ratio.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`EditorSession`] consumes [`EditorEvent`]s (layout, drag, zoom, aspect, apply)
//!    and emits a [`FramingMetadata`] snapshot on apply.
//! 2. **Store**: metadata round-trips through JSON in the [`CropPayload`] shape.
//! 3. **Resolve**: [`render_plan`] turns metadata + container ratio + [`FitMode`] into a
//!    [`RenderPlan`]; [`project`] computes device preview windows.
//!
//! Resolution is deterministic: the same metadata resolved during server rendering and again on
//! the client yields identical plans, CSS strings and [`RenderPlan::fingerprint`] values.
//!
//! # Getting started
//!
//! For a standalone walkthrough of the geometry and the editor state machine, see
//! [`crate::guide`].
#![forbid(unsafe_code)]

mod foundation;

/// Editor and renderer tunables.
pub mod config;
/// Interactive framing session.
pub mod editor;
/// Pure framing geometry.
pub mod geometry;
/// High-level, standalone documentation for Posterframe's concepts and architecture.
pub mod guide;
/// Persisted framing model.
pub mod metadata;
/// Device preview projection.
pub mod preview;
/// Fit-mode rendering directives.
pub mod render;

pub use config::{ContainerSize, EditorConfig, FramingConfig, RenderConfig};
pub use editor::events::{EditorEvent, EditorOutcome};
pub use editor::layout_probe::{
    LayoutProbe, LayoutReadiness, RetryPolicy, poll_container, wait_for_container,
};
pub use editor::session::{EditorPhase, EditorSession};
pub use foundation::core::{ImageSize, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{PosterframeError, PosterframeResult};
pub use geometry::resolver::{
    FrameGeometry, base_scale, clamp_pan, crop_rect_to_position, display_scale,
    frame_to_crop_rect,
};
pub use geometry::safe_zone::{DESKTOP_ASPECT, MOBILE_ASPECT, focus_outside_safe_zone, safe_zone};
pub use metadata::aspect::{
    AspectOption, AspectOptions, RECOMMENDED_ASPECT, SOCIAL_ASPECT, parse_aspect,
};
pub use metadata::model::{CropPayload, CropRect, FitMode, FocusPoint, FramingMetadata};
pub use preview::projector::{DevicePreset, DeviceWindow, project, project_devices};
pub use render::fit::{render_plan, resolve};
pub use render::plan::{
    Background, Filter, ImageLayer, ObjectFit, ObjectPosition, Overlay, Placement,
    PlanFingerprint, PositionKeyword, RenderPlan,
};
