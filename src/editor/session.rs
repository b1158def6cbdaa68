use crate::{
    config::EditorConfig,
    editor::events::{EditorEvent, EditorOutcome},
    editor::layout_probe::is_usable,
    foundation::core::{ImageSize, Point, Rect, Size, Vec2},
    foundation::error::PosterframeResult,
    foundation::math::{ASPECT_EPSILON, POSITION_EPSILON, approx_eq, rect_approx_eq},
    geometry::resolver::{
        FrameGeometry, center_to_position, clamp_zoom, crop_rect_to_position, image_display_rect,
        position_to_center,
    },
    geometry::safe_zone::{focus_outside_safe_zone, safe_zone},
    metadata::aspect::AspectOptions,
    metadata::model::{CropRect, FitMode, FocusPoint, FramingMetadata},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorPhase {
    /// No valid image yet.
    Uninitialized,
    /// Image known, waiting for container layout.
    Initializing,
    Ready,
    Dirty,
    Saved,
}

#[derive(Clone, Debug, PartialEq)]
struct SourceImage {
    id: String,
    size: ImageSize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    pointer_start: Point,
    position_start: Vec2,
}

/// One open framing editor.
///
/// All input arrives through [`EditorSession::handle`] (or the by-value [`EditorSession::reduce`]);
/// geometry is recomputed from the pure resolver functions after every accepted event, so the
/// session never holds a crop rectangle that disagrees with its pan/zoom/aspect state.
#[derive(Clone, Debug)]
pub struct EditorSession {
    config: EditorConfig,
    aspects: AspectOptions,
    phase: EditorPhase,
    /// Phase an unmodified session rests in: `Ready`, or `Saved` after an apply.
    clean_phase: EditorPhase,
    /// Geometry has been resolved for the current image since the last open/reset.
    initialized: bool,
    /// A pan, zoom or aspect edit happened; live resizes no longer recompute.
    user_edited: bool,
    image: Option<SourceImage>,
    container: Option<Size>,
    zoom: f64,
    image_position: Vec2,
    selected_aspect: f64,
    focus_point: Option<FocusPoint>,
    fit_mode: FitMode,
    geometry: Option<FrameGeometry>,
    saved_snapshot: Option<FramingMetadata>,
    /// What dirty tracking compares against.
    baseline: Option<FramingMetadata>,
    /// Framing to reproduce whenever the frame size is (re)computed without user edits: the
    /// stored framing on open, the last applied snapshot afterwards.
    restore: Option<FramingMetadata>,
    drag: Option<DragState>,
}

impl EditorSession {
    pub fn new(config: EditorConfig, allowed_aspects: Option<&[f64]>) -> Self {
        let aspects = AspectOptions::resolve(allowed_aspects);
        let selected_aspect = aspects.default_ratio();
        Self {
            config,
            aspects,
            phase: EditorPhase::Uninitialized,
            clean_phase: EditorPhase::Ready,
            initialized: false,
            user_edited: false,
            image: None,
            container: None,
            zoom: 1.0,
            image_position: Vec2::ZERO,
            selected_aspect,
            focus_point: None,
            fit_mode: FitMode::default(),
            geometry: None,
            saved_snapshot: None,
            baseline: None,
            restore: None,
            drag: None,
        }
    }

    /// Attach an image (natural dimensions from an external probe) and optional prior framing.
    ///
    /// Invalid dimensions are rejected and leave the session untouched. Prior framing for a
    /// different image size is ignored.
    #[tracing::instrument(skip(self, existing), fields(has_existing = existing.is_some()))]
    pub fn open(
        &mut self,
        source_image_id: &str,
        natural_width: f64,
        natural_height: f64,
        existing: Option<FramingMetadata>,
    ) -> PosterframeResult<()> {
        let size = ImageSize::from_probe(natural_width, natural_height)?;

        let existing = existing.filter(|meta| {
            if meta.natural_width != size.width || meta.natural_height != size.height {
                tracing::warn!(
                    stored_width = meta.natural_width,
                    stored_height = meta.natural_height,
                    "stored framing was made for a different image size; ignoring"
                );
                return false;
            }
            if let Err(err) = meta.validate() {
                tracing::warn!(%err, "stored framing is invalid; ignoring");
                return false;
            }
            true
        });

        self.image = Some(SourceImage {
            id: source_image_id.to_string(),
            size,
        });
        self.zoom = 1.0;
        self.image_position = Vec2::ZERO;
        self.drag = None;
        self.user_edited = false;
        self.geometry = None;
        self.baseline = None;
        self.clean_phase = EditorPhase::Ready;
        match &existing {
            Some(meta) => {
                self.selected_aspect = meta.aspect_ratio;
                self.focus_point = meta.focus_point;
                self.fit_mode = meta.fit_mode;
            }
            None => {
                self.selected_aspect = self.aspects.default_ratio();
                self.focus_point = None;
                self.fit_mode = FitMode::default();
            }
        }
        self.saved_snapshot = existing.clone();
        self.restore = existing;
        self.begin_initializing();
        Ok(())
    }

    /// Apply one event in place.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn handle(&mut self, event: EditorEvent) -> EditorOutcome {
        match event {
            EditorEvent::ContainerMeasured(size) => self.container_observed(size),
            EditorEvent::LayoutUnavailable => {
                if self.container.is_some() {
                    return EditorOutcome::Ignored;
                }
                self.container_observed(self.config.fallback_container.to_size())
            }
            EditorEvent::ContainerResized(size) => self.container_observed(size),
            EditorEvent::DragStart(pointer) => {
                if self.geometry.is_none() || self.drag.is_some() {
                    return EditorOutcome::Ignored;
                }
                self.drag = Some(DragState {
                    pointer_start: pointer,
                    position_start: self.image_position,
                });
                EditorOutcome::Updated
            }
            EditorEvent::DragMove(pointer) => {
                let Some(drag) = self.drag else {
                    return EditorOutcome::Ignored;
                };
                self.pan_to(drag.position_start + (pointer - drag.pointer_start))
            }
            EditorEvent::DragEnd => {
                if self.drag.take().is_none() {
                    return EditorOutcome::Ignored;
                }
                EditorOutcome::Updated
            }
            EditorEvent::Nudge(delta) => {
                if self.geometry.is_none() {
                    return EditorOutcome::Ignored;
                }
                self.pan_to(self.image_position + delta)
            }
            EditorEvent::SetZoom(zoom) => {
                if self.geometry.is_none() {
                    return EditorOutcome::Ignored;
                }
                self.zoom = clamp_zoom(zoom);
                self.user_edited = true;
                self.reproject();
                EditorOutcome::Updated
            }
            EditorEvent::SelectAspect(ratio) => {
                if self.geometry.is_none() {
                    return EditorOutcome::Ignored;
                }
                let Some(ratio) = self.aspects.find(ratio) else {
                    return EditorOutcome::Ignored;
                };
                self.selected_aspect = ratio;
                self.user_edited = true;
                self.reproject();
                EditorOutcome::Updated
            }
            EditorEvent::SetFocusPoint(focus) => {
                if self.geometry.is_none() {
                    return EditorOutcome::Ignored;
                }
                self.focus_point = focus.map(FocusPoint::clamped);
                self.refresh_dirty();
                EditorOutcome::Updated
            }
            EditorEvent::SetFitMode(mode) => {
                if self.geometry.is_none() {
                    return EditorOutcome::Ignored;
                }
                self.fit_mode = mode;
                self.refresh_dirty();
                EditorOutcome::Updated
            }
            EditorEvent::Reset => self.reset(),
            EditorEvent::Apply => self.apply(),
        }
    }

    /// Reducer form of [`EditorSession::handle`].
    pub fn reduce(mut self, event: EditorEvent) -> (Self, EditorOutcome) {
        let outcome = self.handle(event);
        (self, outcome)
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_dirty(&self) -> bool {
        self.phase == EditorPhase::Dirty
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn image_position(&self) -> Vec2 {
        self.image_position
    }

    pub fn selected_aspect(&self) -> f64 {
        self.selected_aspect
    }

    pub fn aspect_options(&self) -> &AspectOptions {
        &self.aspects
    }

    pub fn container(&self) -> Option<Size> {
        self.container
    }

    pub fn focus_point(&self) -> Option<FocusPoint> {
        self.focus_point
    }

    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    pub fn geometry(&self) -> Option<FrameGeometry> {
        self.geometry
    }

    pub fn frame(&self) -> Option<Size> {
        self.geometry.map(|g| g.frame)
    }

    pub fn saved_snapshot(&self) -> Option<&FramingMetadata> {
        self.saved_snapshot.as_ref()
    }

    /// Image rectangle in frame-local display coordinates.
    pub fn image_rect(&self) -> Option<Rect> {
        let image = self.image.as_ref()?;
        let g = self.geometry?;
        Some(image_display_rect(
            self.image_position,
            g.scale,
            g.frame,
            image.size,
        ))
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        let image = self.image.as_ref()?;
        Some(self.geometry?.crop_rect(self.image_position, image.size))
    }

    pub fn safe_zone(&self) -> Option<CropRect> {
        self.crop_rect().map(safe_zone)
    }

    /// The focus point lies outside the safe zone and may be cut off on some devices.
    pub fn safe_zone_warning(&self) -> bool {
        self.snapshot()
            .is_some_and(|meta| focus_outside_safe_zone(&meta))
    }

    /// Metadata for the current state, without applying it.
    pub fn snapshot(&self) -> Option<FramingMetadata> {
        let image = self.image.as_ref()?;
        let crop = self.crop_rect()?;
        Some(FramingMetadata {
            source_image_id: image.id.clone(),
            natural_width: image.size.width,
            natural_height: image.size.height,
            crop_rect: crop,
            aspect_ratio: crop.aspect(),
            focus_point: self.focus_point,
            fit_mode: self.fit_mode,
        })
    }

    fn set_phase(&mut self, next: EditorPhase) {
        if self.phase != next {
            tracing::debug!(from = ?self.phase, to = ?next, "editor phase");
            self.phase = next;
        }
    }

    fn begin_initializing(&mut self) {
        self.initialized = false;
        self.set_phase(EditorPhase::Initializing);
        if self.container.is_some() {
            self.initialize();
        }
    }

    fn container_observed(&mut self, size: Size) -> EditorOutcome {
        if !is_usable(size) {
            return EditorOutcome::Ignored;
        }
        if self.initialized && (self.drag.is_some() || self.user_edited) {
            return EditorOutcome::Ignored;
        }
        self.container = Some(size);
        if self.image.is_some() {
            self.initialize();
        }
        EditorOutcome::Updated
    }

    /// Resolve geometry from scratch for the current container, restoring prior framing if any.
    fn initialize(&mut self) {
        let (Some(image), Some(container)) = (self.image.as_ref(), self.container) else {
            return;
        };
        let image = image.size;
        let padding = self.config.frame_padding_px;

        let geometry = match &self.restore {
            Some(meta) => {
                let (g, zoom) =
                    FrameGeometry::for_crop(container, padding, meta.crop_rect, image);
                self.zoom = zoom;
                self.image_position =
                    g.clamp_pan(crop_rect_to_position(meta.crop_rect, g.scale, image), image);
                g
            }
            None => {
                let g = FrameGeometry::compute(
                    container,
                    padding,
                    self.selected_aspect,
                    image,
                    self.zoom,
                );
                self.image_position = g.clamp_pan(self.image_position, image);
                g
            }
        };
        self.geometry = Some(geometry);
        self.initialized = true;
        self.baseline = match &self.saved_snapshot {
            Some(saved) => Some(saved.clone()),
            None => self.snapshot(),
        };
        self.set_phase(self.clean_phase);
        self.refresh_dirty();
    }

    fn pan_to(&mut self, position: Vec2) -> EditorOutcome {
        let (Some(image), Some(g)) = (self.image.as_ref(), self.geometry) else {
            return EditorOutcome::Ignored;
        };
        self.image_position = g.clamp_pan(position, image.size);
        self.user_edited = true;
        self.refresh_dirty();
        EditorOutcome::Updated
    }

    /// Recompute geometry for the current zoom/aspect, keeping the source point under the
    /// frame center fixed.
    fn reproject(&mut self) {
        let (Some(image), Some(container), Some(old)) =
            (self.image.as_ref(), self.container, self.geometry)
        else {
            return;
        };
        let image = image.size;
        let center = position_to_center(self.image_position, old.scale, image);
        let g = FrameGeometry::compute(
            container,
            self.config.frame_padding_px,
            self.selected_aspect,
            image,
            self.zoom,
        );
        self.image_position = g.clamp_pan(center_to_position(center, g.scale, image), image);
        self.geometry = Some(g);
        self.restore = None;
        self.refresh_dirty();
    }

    fn refresh_dirty(&mut self) {
        if !self.initialized {
            return;
        }
        let dirty = match (&self.baseline, self.snapshot()) {
            (Some(base), Some(current)) => differs(base, &current),
            _ => false,
        };
        let next = if dirty {
            EditorPhase::Dirty
        } else {
            self.clean_phase
        };
        self.set_phase(next);
    }

    fn reset(&mut self) -> EditorOutcome {
        if self.image.is_none() {
            return EditorOutcome::Ignored;
        }
        self.zoom = 1.0;
        self.image_position = Vec2::ZERO;
        self.selected_aspect = self.aspects.default_ratio();
        self.restore = None;
        self.drag = None;
        self.user_edited = false;
        self.geometry = None;
        self.clean_phase = EditorPhase::Ready;
        self.begin_initializing();
        EditorOutcome::Updated
    }

    fn apply(&mut self) -> EditorOutcome {
        let Some(snapshot) = self.snapshot() else {
            return EditorOutcome::Ignored;
        };
        if let Err(err) = snapshot.validate() {
            tracing::warn!(%err, "refusing to apply invalid framing");
            return EditorOutcome::Ignored;
        }
        self.saved_snapshot = Some(snapshot.clone());
        self.baseline = Some(snapshot.clone());
        self.restore = Some(snapshot.clone());
        self.clean_phase = EditorPhase::Saved;
        self.set_phase(EditorPhase::Saved);
        EditorOutcome::Applied(snapshot)
    }
}

fn differs(a: &FramingMetadata, b: &FramingMetadata) -> bool {
    !rect_approx_eq(a.crop_rect.to_rect(), b.crop_rect.to_rect(), POSITION_EPSILON)
        || !approx_eq(a.aspect_ratio, b.aspect_ratio, ASPECT_EPSILON)
        || a.focus_point != b.focus_point
        || a.fit_mode != b.fit_mode
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
