use crate::{
    foundation::core::Point,
    foundation::math::{clamp_total, finite_positive},
    metadata::aspect::SOCIAL_ASPECT,
    metadata::model::{CropRect, FramingMetadata},
};

/// Simulated devices shown in the editor's preview strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DevicePreset {
    Mobile,
    Tablet,
    Desktop,
    Social,
}

impl DevicePreset {
    pub const ALL: [DevicePreset; 4] = [
        DevicePreset::Mobile,
        DevicePreset::Tablet,
        DevicePreset::Desktop,
        DevicePreset::Social,
    ];

    /// Viewport ratio (width / height) of the preset.
    pub fn aspect(self) -> f64 {
        match self {
            DevicePreset::Mobile => 9.0 / 19.5,
            DevicePreset::Tablet => 3.0 / 4.0,
            DevicePreset::Desktop => 16.0 / 9.0,
            DevicePreset::Social => SOCIAL_ASPECT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DevicePreset::Mobile => "mobile",
            DevicePreset::Tablet => "tablet",
            DevicePreset::Desktop => "desktop",
            DevicePreset::Social => "social",
        }
    }
}

/// Visible window of one preset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DeviceWindow {
    pub device: DevicePreset,
    pub aspect: f64,
    pub window: CropRect,
}

/// Sub-window of `crop` with ratio `target_aspect`, centered on `focus` and kept inside `crop`.
///
/// A non-finite or non-positive target resolves to the crop's own ratio (the whole crop).
pub fn project_window(crop: CropRect, focus: Point, target_aspect: f64) -> CropRect {
    let target = finite_positive(target_aspect).unwrap_or_else(|| crop.aspect());
    let (width, height) = if crop.aspect() > target {
        (crop.height * target, crop.height)
    } else {
        (crop.width, crop.width / target)
    };
    let width = width.min(crop.width);
    let height = height.min(crop.height);

    let x = clamp_total(focus.x - width * 0.5, crop.x, crop.x + crop.width - width);
    let y = clamp_total(focus.y - height * 0.5, crop.y, crop.y + crop.height - height);
    CropRect::new(x, y, width, height)
}

/// Window of `meta`'s crop visible in a container of ratio `target_aspect`.
pub fn project(meta: &FramingMetadata, target_aspect: f64) -> CropRect {
    let meta = meta.sanitized();
    project_window(meta.crop_rect, meta.focus_source(), target_aspect)
}

/// One window per built-in device preset, in [`DevicePreset::ALL`] order.
#[tracing::instrument(skip(meta), fields(source = %meta.source_image_id))]
pub fn project_devices(meta: &FramingMetadata) -> Vec<DeviceWindow> {
    DevicePreset::ALL
        .iter()
        .map(|&device| DeviceWindow {
            device,
            aspect: device.aspect(),
            window: project(meta, device.aspect()),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/preview/projector.rs"]
mod tests;
