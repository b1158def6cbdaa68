//! # Posterframe guide (v0.1.0)
//!
//! This module is a standalone walkthrough of Posterframe's geometry, its editor state machine and
//! the way stored framing is resolved for arbitrary containers.
//!
//! If you are looking for CLI commands, start with the repository `README.md`.
//! If you are changing geometry or rendering, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`FramingMetadata`](crate::FramingMetadata): the persisted framing of one source image
//! - [`CropRect`](crate::CropRect): retained region, in source pixels
//! - [`FocusPoint`](crate::FocusPoint): subject position, in percent of the crop
//! - [`FitMode`](crate::FitMode): how the crop is placed into a container of another ratio
//! - [`EditorSession`](crate::EditorSession): one open editor, driven by
//!   [`EditorEvent`](crate::EditorEvent)s
//! - [`RenderPlan`](crate::RenderPlan): renderer-agnostic placement directives
//!
//! Framing is **non-destructive**. Nothing in this crate re-encodes pixels; the source image is
//! stored once and every consumer resolves the metadata at display time.
//!
//! ---
//!
//! ## Three coordinate spaces
//!
//! - **Source space**: natural image pixels. Crop rectangles and focus points (after conversion)
//!   live here.
//! - **Display space**: frame-local editor pixels. The frame occupies
//!   `(0, 0)..(frame.width, frame.height)`; the image is drawn at `scale` with its center offset
//!   from the frame center by the pan position.
//! - **Crop-relative percent**: focus points, `0..=100` on each axis of the crop.
//!
//! The frame is the largest rectangle of the selected ratio that fits the container minus a fixed
//! padding (`editor.framePaddingPx`, default 40 px per side). The base scale covers the frame in
//! the governing dimension and is clamped to `[0.1, 1]`; the display scale is
//! `clamp(base * zoom, 0.1, 2)` with `zoom` in `[0.5, 3]`.
//!
//! Worked example: a 1000x1000 image in an 800x600 container at 3:4 yields a 390x520 frame, base
//! scale 0.52, and crop `{ x: 125, y: 0, width: 750, height: 1000 }`.
//!
//! Pan offsets are clamped symmetrically: on each axis the image center may move at most
//! `(displayed - frame) / 2` away from the frame center, and not at all when the displayed image
//! is smaller than the frame. Every geometry function is total; drift is clamped, never reported.
//!
//! ---
//!
//! ## The editor state machine
//!
//! ```text
//! Uninitialized --open--> Initializing --layout--> Ready <--> Dirty --apply--> Saved
//!                               ^                                                |
//!                               +------------------- reset ----------------------+
//! ```
//!
//! - `open` validates the natural dimensions (rejecting non-finite or non-positive values with
//!   [`PosterframeError::InvalidImageDimensions`](crate::PosterframeError::InvalidImageDimensions)).
//! - Layout comes from a [`LayoutProbe`](crate::LayoutProbe) polled by
//!   [`poll_container`](crate::poll_container): 20 attempts at 50 ms, then an 800x600 fallback.
//! - Edits (drag, nudge, zoom, aspect, focus, fit mode) mark the session dirty when the derived
//!   snapshot differs from the baseline by more than 0.01 px or 0.001 in aspect ratio.
//! - Zoom and aspect changes keep the source point under the frame center fixed.
//! - Live container resizes recompute the frame only while no drag is active and before the
//!   first pan/zoom/aspect edit.
//!
//! Re-opening stored framing inverts the transform: the frame takes the crop's ratio, the zoom is
//! chosen so the crop fills it, and the pan centers the crop. When the display-scale or zoom range
//! cannot reach that fill, the frame shrinks around the crop instead. Without further input, the
//! derived crop reproduces the stored one within 0.01 px. The same path runs when the container
//! reflows after an apply, so applied framing survives layout changes.
//!
//! ---
//!
//! ## Safe zone
//!
//! [`safe_zone`](crate::safe_zone) is the centered part of a crop that stays visible at both a
//! 9:16 and a 16:9 target. The editor draws it as a guide and warns when the focus point falls
//! outside it; the crop itself is never constrained by it.
//!
//! ---
//!
//! ## Resolving for containers
//!
//! [`project`](crate::project) returns the window of the crop that a container of a given ratio
//! shows, centered on the focus point and clamped inside the crop.
//! [`render_plan`](crate::render_plan) builds on it per fit mode:
//!
//! - `cover`: one layer filling the container, object-position from the focus point
//! - `contain`: the whole crop letterboxed on a solid color
//! - `blur-fill`: a blurred cover layer under a 50% overlay
//! - `picture-in-picture`: a blurred, darkened, 1.1x cover background under a 30% overlay, with
//!   the crop letterboxed on top at 90% width (capped at 600 px)
//!
//! ---
//!
//! ## Server/client parity
//!
//! Plans are pure values of `(metadata, container ratio, mode, config)`. CSS is emitted with a
//! fixed four-decimal format, and [`RenderPlan::fingerprint`](crate::RenderPlan::fingerprint)
//! hashes every field with a seeded XXH3-128. A server can embed the fingerprint in its markup
//! and the client can compare it against its own resolution before hydrating.
