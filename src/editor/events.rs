use crate::{
    foundation::core::{Point, Size, Vec2},
    metadata::model::{FitMode, FocusPoint, FramingMetadata},
};

/// Input stream consumed by [`EditorSession::handle`](crate::EditorSession::handle).
///
/// Pointer and touch input both map onto the `Drag*` triple. A move outside an active drag is
/// dropped, as is a second start while one drag is already active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorEvent {
    /// First non-zero container layout observed.
    ContainerMeasured(Size),
    /// Layout polling exhausted its retry budget.
    LayoutUnavailable,
    /// Live layout reflow.
    ContainerResized(Size),
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    SetZoom(f64),
    /// Keyboard pan by a display-space offset.
    Nudge(Vec2),
    SelectAspect(f64),
    SetFocusPoint(Option<FocusPoint>),
    SetFitMode(FitMode),
    Reset,
    Apply,
}

/// What handling an event did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorOutcome {
    /// Not applicable in the current state; the session is unchanged.
    Ignored,
    Updated,
    /// A new snapshot was emitted and stored as the saved snapshot.
    Applied(FramingMetadata),
}

impl EditorOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, EditorOutcome::Ignored)
    }
}
