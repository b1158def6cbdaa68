//! Tunables for the editor session and the fit-mode renderer.
//!
//! Geometry limits (zoom range, scale clamps) are fixed constants in
//! [`crate::geometry::resolver`] and are deliberately absent here.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Rgba8, Size},
    foundation::error::{PosterframeError, PosterframeResult},
    render::plan::PositionKeyword,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FramingConfig {
    pub editor: EditorConfig,
    pub render: RenderConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Gap between container edge and frame, per side.
    pub frame_padding_px: f64,
    /// Layout polls before falling back.
    pub layout_retry_attempts: u32,
    pub layout_retry_interval_ms: u64,
    /// Container size assumed when layout never becomes available.
    pub fallback_container: ContainerSize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            frame_padding_px: 40.0,
            layout_retry_attempts: 20,
            layout_retry_interval_ms: 50,
            fallback_container: ContainerSize {
                width: 800.0,
                height: 600.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn to_size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub blur_radius_px: f64,
    pub blur_fill_overlay_opacity: f64,
    pub pip_overlay_opacity: f64,
    /// Background upscale that hides the soft blur edges.
    pub pip_background_scale: f64,
    pub pip_background_brightness: f64,
    pub pip_width_fraction: f64,
    pub pip_max_width_px: f64,
    pub letterbox_color: Rgba8,
    pub overlay_color: Rgba8,
    /// Object position used when metadata carries no focus point.
    pub default_position: PositionKeyword,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            blur_radius_px: 20.0,
            blur_fill_overlay_opacity: 0.5,
            pip_overlay_opacity: 0.3,
            pip_background_scale: 1.1,
            pip_background_brightness: 0.6,
            pip_width_fraction: 0.9,
            pip_max_width_px: 600.0,
            letterbox_color: Rgba8::BLACK,
            overlay_color: Rgba8::BLACK,
            default_position: PositionKeyword::Center,
        }
    }
}

impl FramingConfig {
    pub fn from_json_str(s: &str) -> PosterframeResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> PosterframeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> PosterframeResult<()> {
        let e = &self.editor;
        if !e.frame_padding_px.is_finite() || e.frame_padding_px < 0.0 {
            return Err(PosterframeError::validation(
                "editor.framePaddingPx must be finite and >= 0",
            ));
        }
        let fc = e.fallback_container;
        if !(fc.width.is_finite() && fc.height.is_finite() && fc.width > 0.0 && fc.height > 0.0) {
            return Err(PosterframeError::validation(
                "editor.fallbackContainer must be positive",
            ));
        }

        let r = &self.render;
        for (name, v) in [
            ("blurFillOverlayOpacity", r.blur_fill_overlay_opacity),
            ("pipOverlayOpacity", r.pip_overlay_opacity),
            ("pipBackgroundBrightness", r.pip_background_brightness),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(PosterframeError::validation(format!(
                    "render.{name} must be within 0..=1"
                )));
            }
        }
        if !(r.pip_width_fraction > 0.0 && r.pip_width_fraction <= 1.0) {
            return Err(PosterframeError::validation(
                "render.pipWidthFraction must be within (0, 1]",
            ));
        }
        for (name, v) in [
            ("blurRadiusPx", r.blur_radius_px),
            ("pipMaxWidthPx", r.pip_max_width_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(PosterframeError::validation(format!(
                    "render.{name} must be finite and >= 0"
                )));
            }
        }
        if !r.pip_background_scale.is_finite() || r.pip_background_scale < 1.0 {
            return Err(PosterframeError::validation(
                "render.pipBackgroundScale must be >= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
