use super::*;
use crate::foundation::core::ImageSize;
use crate::foundation::math::rect_contains;
use crate::metadata::model::{FitMode, FocusPoint};

fn meta(focus: Option<FocusPoint>) -> FramingMetadata {
    FramingMetadata::new(
        "img",
        ImageSize::new(2000, 1500).unwrap(),
        CropRect::new(200.0, 100.0, 1200.0, 900.0),
        focus,
        FitMode::Cover,
    )
    .unwrap()
}

#[test]
fn wider_crop_keeps_full_height() {
    let w = project(&meta(None), 1.0);
    assert_eq!(w, CropRect::new(350.0, 100.0, 900.0, 900.0));
}

#[test]
fn narrower_crop_keeps_full_width() {
    let w = project(&meta(None), 2.0);
    assert_eq!(w, CropRect::new(200.0, 250.0, 1200.0, 600.0));
}

#[test]
fn focus_point_recenters_and_clamps() {
    // focus at 25% of the crop width: 200 + 300 = 500 absolute
    let w = project(&meta(Some(FocusPoint::new(25.0, 50.0))), 1.0);
    assert_eq!(w.x, 200.0);

    let w = project(&meta(Some(FocusPoint::new(60.0, 50.0))), 1.0);
    // 200 + 720 = 920 center, window 900 wide -> x = 470
    assert_eq!(w.x, 470.0);

    let w = project(&meta(Some(FocusPoint::new(100.0, 0.0))), 9.0 / 16.0);
    assert!((w.x + w.width - 1400.0).abs() < 1e-9);
    assert_eq!(w.y, 100.0);
}

#[test]
fn invalid_target_returns_whole_crop() {
    let m = meta(None);
    for t in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert_eq!(project(&m, t), m.crop_rect);
    }
}

#[test]
fn window_is_contained_for_any_aspect() {
    let focuses = [None, Some(FocusPoint::new(0.0, 0.0)), Some(FocusPoint::new(100.0, 100.0)), Some(FocusPoint::new(37.0, 81.0))];
    let aspects = [0.01, 0.25, 9.0 / 19.5, 0.75, 1.0, 4.0 / 3.0, 1.905, 16.0 / 9.0, 7.0, 300.0];
    for focus in focuses {
        let m = meta(focus);
        for a in aspects {
            let w = project(&m, a);
            assert!(rect_contains(m.crop_rect.to_rect(), w.to_rect(), 1e-9), "{a} {w:?}");
            assert!(w.width > 0.0 && w.height > 0.0);
        }
    }
}

#[test]
fn device_strip_covers_every_preset() {
    let windows = project_devices(&meta(None));
    assert_eq!(windows.len(), DevicePreset::ALL.len());
    assert_eq!(windows[0].device, DevicePreset::Mobile);
    let desktop = windows
        .iter()
        .find(|w| w.device == DevicePreset::Desktop)
        .unwrap();
    assert_eq!(desktop.window.width, 1200.0);
    assert!((desktop.window.height - 675.0).abs() < 1e-9);
}
