use super::*;
use crate::foundation::error::PosterframeError;
use crate::metadata::aspect::{RECOMMENDED_ASPECT, SOCIAL_ASPECT};

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn crop_close(a: CropRect, b: CropRect, eps: f64) -> bool {
    close(a.x, b.x, eps)
        && close(a.y, b.y, eps)
        && close(a.width, b.width, eps)
        && close(a.height, b.height, eps)
}

fn ready_session() -> EditorSession {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert_eq!(
        s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0))),
        EditorOutcome::Updated
    );
    s
}

#[test]
fn phases_progress_from_open_to_ready() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    assert_eq!(s.phase(), EditorPhase::Uninitialized);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert_eq!(s.phase(), EditorPhase::Initializing);
    assert_eq!(s.crop_rect(), None);
    s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0)));
    assert_eq!(s.phase(), EditorPhase::Ready);
    assert!(!s.is_dirty());
}

#[test]
fn worked_scenario_through_session() {
    let s = ready_session();
    assert_eq!(s.frame(), Some(Size::new(390.0, 520.0)));
    let g = s.geometry().unwrap();
    assert!(close(g.base_scale, 0.52, 1e-12));
    let crop = s.crop_rect().unwrap();
    assert!(crop_close(crop, CropRect::new(125.0, 0.0, 750.0, 1000.0), 1e-9), "{crop:?}");
    let zone = s.safe_zone().unwrap();
    assert!(crop_close(zone, CropRect::new(218.75, 0.0, 562.5, 1000.0), 1e-9), "{zone:?}");
}

#[test]
fn zero_container_is_not_ready() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert_eq!(
        s.handle(EditorEvent::ContainerMeasured(Size::ZERO)),
        EditorOutcome::Ignored
    );
    assert_eq!(s.phase(), EditorPhase::Initializing);
}

#[test]
fn layout_unavailable_uses_fallback_container() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert_eq!(s.handle(EditorEvent::LayoutUnavailable), EditorOutcome::Updated);
    assert_eq!(s.phase(), EditorPhase::Ready);
    assert_eq!(s.container(), Some(Size::new(800.0, 600.0)));
    assert_eq!(s.frame(), Some(Size::new(390.0, 520.0)));
    assert_eq!(s.handle(EditorEvent::LayoutUnavailable), EditorOutcome::Ignored);
}

#[test]
fn invalid_dimensions_keep_session_uninitialized() {
    for (w, h) in [(0.0, 100.0), (100.0, -5.0), (f64::NAN, 100.0), (100.0, f64::INFINITY)] {
        let mut s = EditorSession::new(EditorConfig::default(), None);
        let err = s.open("bad", w, h, None).unwrap_err();
        assert!(
            matches!(err, PosterframeError::InvalidImageDimensions { .. }),
            "{err}"
        );
        assert_eq!(s.phase(), EditorPhase::Uninitialized);
        assert_eq!(
            s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0))),
            EditorOutcome::Updated
        );
        assert_eq!(s.phase(), EditorPhase::Uninitialized);
        assert_eq!(s.handle(EditorEvent::Apply), EditorOutcome::Ignored);
    }
}

#[test]
fn drag_marks_dirty_and_returning_makes_it_clean() {
    let mut s = ready_session();
    assert_eq!(
        s.handle(EditorEvent::DragStart(Point::new(100.0, 100.0))),
        EditorOutcome::Updated
    );
    assert!(s.is_dragging());
    s.handle(EditorEvent::DragMove(Point::new(120.0, 100.0)));
    assert_eq!(s.image_position(), Vec2::new(20.0, 0.0));
    assert_eq!(s.phase(), EditorPhase::Dirty);

    s.handle(EditorEvent::DragMove(Point::new(100.0, 100.0)));
    assert_eq!(s.image_position(), Vec2::ZERO);
    assert_eq!(s.phase(), EditorPhase::Ready);
    s.handle(EditorEvent::DragEnd);
    assert!(!s.is_dragging());
}

#[test]
fn drag_pan_is_clamped_to_image() {
    let mut s = ready_session();
    s.handle(EditorEvent::DragStart(Point::new(0.0, 0.0)));
    s.handle(EditorEvent::DragMove(Point::new(500.0, 500.0)));
    // display 520x520 behind a 390x520 frame
    assert_eq!(s.image_position(), Vec2::new(65.0, 0.0));
    let crop = s.crop_rect().unwrap();
    assert!(close(crop.x, 0.0, 1e-9));
    assert!(close(crop.width, 750.0, 1e-9));
}

#[test]
fn drag_events_outside_a_drag_are_ignored() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert!(s.handle(EditorEvent::DragStart(Point::ZERO)).is_ignored());

    s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0)));
    assert!(s.handle(EditorEvent::DragMove(Point::new(50.0, 0.0))).is_ignored());
    assert!(s.handle(EditorEvent::DragEnd).is_ignored());
    assert_eq!(s.image_position(), Vec2::ZERO);

    s.handle(EditorEvent::DragStart(Point::new(10.0, 10.0)));
    assert!(s.handle(EditorEvent::DragStart(Point::new(200.0, 10.0))).is_ignored());
    s.handle(EditorEvent::DragMove(Point::new(40.0, 10.0)));
    s.handle(EditorEvent::DragMove(Point::new(40.0, 10.0)));
    assert_eq!(s.image_position(), Vec2::new(30.0, 0.0));

    assert_eq!(s.handle(EditorEvent::DragEnd), EditorOutcome::Updated);
    assert!(s.handle(EditorEvent::DragEnd).is_ignored());
    assert!(s.handle(EditorEvent::DragMove(Point::new(0.0, 10.0))).is_ignored());
    assert_eq!(s.image_position(), Vec2::new(30.0, 0.0));
}

#[test]
fn zoom_keeps_view_center() {
    let mut s = ready_session();
    s.handle(EditorEvent::Nudge(Vec2::new(30.0, 0.0)));
    let before = s.crop_rect().unwrap().center();

    s.handle(EditorEvent::SetZoom(2.0));
    assert_eq!(s.zoom(), 2.0);
    assert!(close(s.geometry().unwrap().scale, 1.04, 1e-12));
    assert!(close(s.image_position().x, 60.0, 1e-9));
    let after = s.crop_rect().unwrap();
    assert!(close(after.center().x, before.x, 1e-9));
    assert!(close(after.center().y, before.y, 1e-9));
    assert!(close(after.width, 375.0, 1e-9));
    assert!(close(after.height, 500.0, 1e-9));
    assert_eq!(s.phase(), EditorPhase::Dirty);
}

#[test]
fn zoom_is_clamped() {
    let mut s = ready_session();
    s.handle(EditorEvent::SetZoom(10.0));
    assert_eq!(s.zoom(), 3.0);
    assert!(close(s.geometry().unwrap().scale, 1.56, 1e-12));
    s.handle(EditorEvent::SetZoom(0.1));
    assert_eq!(s.zoom(), 0.5);
    // display 260x260 is smaller than the frame on both axes
    assert_eq!(s.image_position(), Vec2::ZERO);
    let crop = s.crop_rect().unwrap();
    assert!(crop_close(crop, CropRect::new(0.0, 0.0, 1000.0, 1000.0), 1e-9));
}

#[test]
fn aspect_change_resizes_frame() {
    let mut s = ready_session();
    assert_eq!(s.handle(EditorEvent::SelectAspect(1.0)), EditorOutcome::Updated);
    assert_eq!(s.selected_aspect(), 1.0);
    assert_eq!(s.frame(), Some(Size::new(520.0, 520.0)));
    let crop = s.crop_rect().unwrap();
    assert!(crop_close(crop, CropRect::new(0.0, 0.0, 1000.0, 1000.0), 1e-9));
    assert_eq!(s.phase(), EditorPhase::Dirty);

    assert!(s.handle(EditorEvent::SelectAspect(1.5)).is_ignored());
    assert_eq!(s.selected_aspect(), 1.0);
}

#[test]
fn restricted_aspect_list() {
    let s = EditorSession::new(EditorConfig::default(), Some(&[SOCIAL_ASPECT]));
    assert_eq!(s.selected_aspect(), SOCIAL_ASPECT);
    assert_eq!(s.aspect_options().options().len(), 1);

    let mut s = EditorSession::new(EditorConfig::default(), Some(&[]));
    assert_eq!(s.selected_aspect(), RECOMMENDED_ASPECT);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0)));
    assert!(s.handle(EditorEvent::SelectAspect(1.0)).is_ignored());
}

#[test]
fn resize_recomputes_until_user_edits() {
    let mut s = ready_session();
    assert_eq!(
        s.handle(EditorEvent::ContainerResized(Size::new(1000.0, 800.0))),
        EditorOutcome::Updated
    );
    assert_eq!(s.frame(), Some(Size::new(540.0, 720.0)));
    assert_eq!(s.phase(), EditorPhase::Ready);

    s.handle(EditorEvent::Nudge(Vec2::new(10.0, 0.0)));
    assert!(
        s.handle(EditorEvent::ContainerResized(Size::new(1200.0, 1000.0)))
            .is_ignored()
    );
    assert_eq!(s.frame(), Some(Size::new(540.0, 720.0)));
    assert_eq!(s.container(), Some(Size::new(1000.0, 800.0)));
}

#[test]
fn resize_is_ignored_mid_drag() {
    let mut s = ready_session();
    s.handle(EditorEvent::DragStart(Point::ZERO));
    assert!(
        s.handle(EditorEvent::ContainerResized(Size::new(1000.0, 800.0)))
            .is_ignored()
    );
    assert_eq!(s.frame(), Some(Size::new(390.0, 520.0)));
}

#[test]
fn apply_saves_and_further_edits_dirty_again() {
    let mut s = ready_session();
    let EditorOutcome::Applied(meta) = s.handle(EditorEvent::Apply) else {
        panic!("apply did not emit a snapshot");
    };
    assert_eq!(s.phase(), EditorPhase::Saved);
    assert_eq!(meta.source_image_id, "img-1");
    assert_eq!(meta.natural_width, 1000);
    assert!(crop_close(meta.crop_rect, CropRect::new(125.0, 0.0, 750.0, 1000.0), 1e-9));
    assert!(close(meta.aspect_ratio, 0.75, 1e-12));
    assert!(meta.validate().is_ok());
    assert_eq!(s.saved_snapshot(), Some(&meta));

    s.handle(EditorEvent::Nudge(Vec2::new(5.0, 0.0)));
    assert_eq!(s.phase(), EditorPhase::Dirty);
    s.handle(EditorEvent::Nudge(Vec2::new(-5.0, 0.0)));
    assert_eq!(s.phase(), EditorPhase::Saved);
}

#[test]
fn reflow_after_apply_keeps_applied_framing() {
    let mut s = ready_session();
    let EditorOutcome::Applied(meta) = s.handle(EditorEvent::Apply) else {
        panic!("apply did not emit a snapshot");
    };

    assert_eq!(
        s.handle(EditorEvent::ContainerResized(Size::new(1000.0, 800.0))),
        EditorOutcome::Updated
    );
    assert_eq!(s.phase(), EditorPhase::Saved);
    let frame = s.frame().unwrap();
    assert!(close(frame.width, 540.0, 1e-9) && close(frame.height, 720.0, 1e-9), "{frame:?}");
    assert!(crop_close(s.crop_rect().unwrap(), meta.crop_rect, 0.01));

    // too small to show the crop at the minimum scale; the crop still wins
    s.handle(EditorEvent::ContainerResized(Size::new(100.0, 100.0)));
    assert_eq!(s.phase(), EditorPhase::Saved);
    assert!(close(s.geometry().unwrap().scale, 0.1, 1e-12));
    let crop = s.crop_rect().unwrap();
    assert!(crop_close(crop, meta.crop_rect, 0.01), "{crop:?}");

    s.handle(EditorEvent::Nudge(Vec2::new(5.0, 0.0)));
    assert_eq!(s.phase(), EditorPhase::Dirty);
}

#[test]
fn reset_after_apply_rests_in_ready() {
    let mut s = ready_session();
    s.handle(EditorEvent::SetZoom(2.0));
    s.handle(EditorEvent::Apply);
    assert_eq!(s.phase(), EditorPhase::Saved);

    s.handle(EditorEvent::Reset);
    assert_eq!(s.zoom(), 1.0);
    assert_eq!(s.phase(), EditorPhase::Dirty);
    s.handle(EditorEvent::Apply);
    s.handle(EditorEvent::Reset);
    assert_eq!(s.phase(), EditorPhase::Ready);
}

#[test]
fn apply_before_layout_is_ignored() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 1000.0, 1000.0, None).unwrap();
    assert!(s.handle(EditorEvent::Apply).is_ignored());
    assert_eq!(s.saved_snapshot(), None);
}

#[test]
fn focus_and_fit_edits_mark_dirty() {
    let mut s = ready_session();
    s.handle(EditorEvent::SetFocusPoint(Some(FocusPoint::new(10.0, 10.0))));
    assert_eq!(s.phase(), EditorPhase::Dirty);
    assert!(s.safe_zone_warning());
    s.handle(EditorEvent::SetFocusPoint(None));
    assert_eq!(s.phase(), EditorPhase::Ready);
    assert!(!s.safe_zone_warning());

    s.handle(EditorEvent::SetFocusPoint(Some(FocusPoint::new(150.0, -3.0))));
    assert_eq!(s.focus_point(), Some(FocusPoint::new(100.0, 0.0)));

    s.handle(EditorEvent::SetFocusPoint(None));
    s.handle(EditorEvent::SetFitMode(FitMode::BlurFill));
    assert_eq!(s.phase(), EditorPhase::Dirty);
    let EditorOutcome::Applied(meta) = s.handle(EditorEvent::Apply) else {
        panic!("apply did not emit a snapshot");
    };
    assert_eq!(meta.fit_mode, FitMode::BlurFill);
}

#[test]
fn reset_restores_defaults() {
    let mut s = ready_session();
    s.handle(EditorEvent::SetZoom(2.0));
    s.handle(EditorEvent::SelectAspect(1.0));
    s.handle(EditorEvent::Nudge(Vec2::new(40.0, 40.0)));
    assert_eq!(s.phase(), EditorPhase::Dirty);

    assert_eq!(s.handle(EditorEvent::Reset), EditorOutcome::Updated);
    assert_eq!(s.zoom(), 1.0);
    assert_eq!(s.image_position(), Vec2::ZERO);
    assert_eq!(s.selected_aspect(), RECOMMENDED_ASPECT);
    assert_eq!(s.frame(), Some(Size::new(390.0, 520.0)));
    assert_eq!(s.phase(), EditorPhase::Ready);

    // resizes recompute again after a reset
    assert_eq!(
        s.handle(EditorEvent::ContainerResized(Size::new(1000.0, 800.0))),
        EditorOutcome::Updated
    );
}

#[test]
fn reopened_framing_round_trips() {
    let mut s = ready_session();
    s.handle(EditorEvent::SetZoom(1.5));
    s.handle(EditorEvent::Nudge(Vec2::new(40.0, 30.0)));
    s.handle(EditorEvent::SetFocusPoint(Some(FocusPoint::new(30.0, 60.0))));
    let EditorOutcome::Applied(saved) = s.handle(EditorEvent::Apply) else {
        panic!("apply did not emit a snapshot");
    };

    for container in [Size::new(800.0, 600.0), Size::new(1200.0, 900.0)] {
        let mut reopened = EditorSession::new(EditorConfig::default(), None);
        reopened
            .open("img-1", 1000.0, 1000.0, Some(saved.clone()))
            .unwrap();
        reopened.handle(EditorEvent::ContainerMeasured(container));
        let crop = reopened.crop_rect().unwrap();
        assert!(crop_close(crop, saved.crop_rect, 0.01), "{crop:?} vs {:?}", saved.crop_rect);
        assert!(close(reopened.zoom(), 1.5, 1e-9));
        assert_eq!(reopened.phase(), EditorPhase::Ready);
        assert!(!reopened.is_dirty());
        assert_eq!(reopened.focus_point(), Some(FocusPoint::new(30.0, 60.0)));
        assert_eq!(reopened.saved_snapshot(), Some(&saved));
    }
}

#[test]
fn reopen_when_display_scale_caps() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("tall", 462.0, 989.0, None).unwrap();
    s.handle(EditorEvent::ContainerMeasured(Size::new(1353.0, 1570.0)));
    s.handle(EditorEvent::SelectAspect(16.0 / 9.0));
    s.handle(EditorEvent::SetZoom(2.152));
    s.handle(EditorEvent::Nudge(Vec2::new(0.0, 1e6)));
    let EditorOutcome::Applied(saved) = s.handle(EditorEvent::Apply) else {
        panic!("apply did not emit a snapshot");
    };
    // 2x display scale leaves the narrow image inside the wide frame
    assert!(close(saved.crop_rect.width, 462.0, 1e-9));
    assert!(saved.crop_rect.height < 400.0, "{:?}", saved.crop_rect);

    let mut reopened = EditorSession::new(EditorConfig::default(), None);
    reopened.open("tall", 462.0, 989.0, Some(saved.clone())).unwrap();
    reopened.handle(EditorEvent::ContainerMeasured(Size::new(1353.0, 1570.0)));
    let crop = reopened.crop_rect().unwrap();
    assert!(crop_close(crop, saved.crop_rect, 0.01), "{crop:?} vs {:?}", saved.crop_rect);
    assert!(close(reopened.geometry().unwrap().scale, 2.0, 1e-9));
    assert_eq!(reopened.phase(), EditorPhase::Ready);
}

#[test]
fn reopen_off_center_crop() {
    let image = crate::foundation::core::ImageSize::new(1000, 1000).unwrap();
    let meta = FramingMetadata::new(
        "img-2",
        image,
        CropRect::new(100.0, 150.0, 600.0, 800.0),
        None,
        FitMode::Cover,
    )
    .unwrap();
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-2", 1000.0, 1000.0, Some(meta.clone())).unwrap();
    s.handle(EditorEvent::ContainerMeasured(Size::new(800.0, 600.0)));
    assert!(close(s.zoom(), 1.25, 1e-12));
    assert!(close(s.image_position().x, 65.0, 1e-9));
    assert!(close(s.image_position().y, -32.5, 1e-9));
    assert!(crop_close(s.crop_rect().unwrap(), meta.crop_rect, 1e-9));
}

#[test]
fn mismatched_existing_framing_is_ignored() {
    let image = crate::foundation::core::ImageSize::new(1000, 1000).unwrap();
    let meta = FramingMetadata::new(
        "img-1",
        image,
        CropRect::new(0.0, 0.0, 500.0, 500.0),
        None,
        FitMode::Contain,
    )
    .unwrap();
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 800.0, 800.0, Some(meta)).unwrap();
    assert_eq!(s.saved_snapshot(), None);
    assert_eq!(s.selected_aspect(), RECOMMENDED_ASPECT);
    assert_eq!(s.fit_mode(), FitMode::Cover);
}

#[test]
fn reducer_threads_state() {
    let mut s = EditorSession::new(EditorConfig::default(), None);
    s.open("img-1", 2000.0, 1500.0, None).unwrap();
    let events = [
        EditorEvent::ContainerMeasured(Size::new(800.0, 600.0)),
        EditorEvent::DragMove(Point::new(5.0, 5.0)),
        EditorEvent::DragStart(Point::new(0.0, 0.0)),
        EditorEvent::DragMove(Point::new(-20.0, 0.0)),
        EditorEvent::DragEnd,
        EditorEvent::Apply,
    ];
    let mut outcomes = Vec::new();
    for ev in events {
        let (next, outcome) = s.reduce(ev);
        s = next;
        outcomes.push(outcome);
    }
    assert!(outcomes[1].is_ignored());
    assert!(matches!(outcomes.last(), Some(EditorOutcome::Applied(_))));
    assert_eq!(s.phase(), EditorPhase::Saved);
    assert_eq!(s.image_position(), Vec2::new(-20.0, 0.0));
}
