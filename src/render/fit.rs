use crate::{
    config::RenderConfig,
    foundation::core::ImageSize,
    foundation::math::finite_positive,
    metadata::model::{FitMode, FramingMetadata},
    preview::projector::project,
    render::plan::{
        Background, Filter, ImageLayer, ObjectFit, ObjectPosition, Overlay, Placement,
        PositionKeyword, RenderPlan,
    },
};

/// Resolve `meta` with its own stored fit mode.
pub fn resolve(meta: &FramingMetadata, container_aspect: f64, cfg: &RenderConfig) -> RenderPlan {
    render_plan(meta, container_aspect, meta.fit_mode, cfg)
}

/// Placement directives for `meta` inside a container of ratio `container_aspect`.
///
/// Deterministic and environment-independent. Drift in the stored rectangle is clamped first,
/// and an invalid container ratio resolves to the crop's own ratio.
#[tracing::instrument(skip(meta, cfg), fields(source = %meta.source_image_id))]
pub fn render_plan(
    meta: &FramingMetadata,
    container_aspect: f64,
    mode: FitMode,
    cfg: &RenderConfig,
) -> RenderPlan {
    let meta = meta.sanitized();
    let crop_aspect = meta.crop_rect.aspect();
    let container_aspect = finite_positive(container_aspect).unwrap_or(crop_aspect);
    let natural = ImageSize {
        width: meta.natural_width,
        height: meta.natural_height,
    };

    let focus_position = match meta.focus_point {
        Some(fp) => ObjectPosition::Percent { x: fp.x, y: fp.y },
        None => ObjectPosition::Keyword {
            keyword: cfg.default_position,
        },
    };

    let cover = ImageLayer {
        fit: ObjectFit::Cover,
        visible: project(&meta, container_aspect),
        object_position: focus_position,
        placement: Placement::FULL,
        filter: Filter::NONE,
        scale: 1.0,
        max_width_px: None,
    };

    let contained = |width_fraction: f64| ImageLayer {
        fit: ObjectFit::Contain,
        visible: meta.crop_rect,
        object_position: ObjectPosition::Keyword {
            keyword: PositionKeyword::Center,
        },
        placement: letterbox(crop_aspect, container_aspect, width_fraction),
        filter: Filter::NONE,
        scale: 1.0,
        max_width_px: None,
    };

    let (background, foreground) = match mode {
        FitMode::Cover => (
            Background {
                image: cover,
                backdrop: None,
                overlay: None,
            },
            None,
        ),
        FitMode::Contain => (
            Background {
                image: contained(1.0),
                backdrop: Some(cfg.letterbox_color),
                overlay: None,
            },
            None,
        ),
        FitMode::BlurFill => (
            Background {
                image: ImageLayer {
                    filter: Filter {
                        blur_px: cfg.blur_radius_px,
                        brightness: 1.0,
                    },
                    ..cover
                },
                backdrop: None,
                overlay: Some(Overlay {
                    color: cfg.overlay_color,
                    opacity: cfg.blur_fill_overlay_opacity,
                }),
            },
            None,
        ),
        FitMode::PictureInPicture => (
            Background {
                image: ImageLayer {
                    filter: Filter {
                        blur_px: cfg.blur_radius_px,
                        brightness: cfg.pip_background_brightness,
                    },
                    scale: cfg.pip_background_scale,
                    ..cover
                },
                backdrop: None,
                overlay: Some(Overlay {
                    color: cfg.overlay_color,
                    opacity: cfg.pip_overlay_opacity,
                }),
            },
            Some(ImageLayer {
                max_width_px: Some(cfg.pip_max_width_px),
                ..contained(cfg.pip_width_fraction)
            }),
        ),
    };

    let object_position = match mode {
        FitMode::Contain => background.image.object_position,
        FitMode::Cover | FitMode::BlurFill | FitMode::PictureInPicture => focus_position,
    };

    RenderPlan {
        mode,
        container_aspect,
        natural,
        background,
        foreground,
        object_position,
    }
}

/// Centered box of ratio `content_aspect` inside a container of ratio `container_aspect`,
/// at most `width_fraction` of the container width and the full container height.
fn letterbox(content_aspect: f64, container_aspect: f64, width_fraction: f64) -> Placement {
    let mut width = width_fraction;
    let mut height = width * container_aspect / content_aspect;
    if height > 1.0 {
        height = 1.0;
        width = content_aspect / container_aspect;
    }
    Placement::centered(width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
