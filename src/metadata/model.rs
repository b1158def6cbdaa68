use crate::{
    foundation::core::{ImageSize, Point, Rect},
    foundation::error::{PosterframeError, PosterframeResult},
    foundation::math::{ASPECT_EPSILON, clamp_total},
};

/// Smallest crop extent (source pixels) produced by clamping.
pub(crate) const MIN_CROP_EXTENT: f64 = 1.0;

/// Crop rectangle in source-pixel coordinates (`x`/`y` is the top-left corner).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Clamp into `image` bounds. Never fails; degenerate input collapses to the full image.
    pub fn clamped_to(self, image: ImageSize) -> Self {
        if !self.is_finite() {
            return Self::from_rect(image.bounds());
        }
        let nw = f64::from(image.width);
        let nh = f64::from(image.height);
        let (x, width) = clamp_axis(self.x, self.width, nw);
        let (y, height) = clamp_axis(self.y, self.height, nh);
        Self::new(x, y, width, height)
    }
}

fn clamp_axis(origin: f64, extent: f64, natural: f64) -> (f64, f64) {
    if extent >= natural {
        return (0.0, natural);
    }
    let mut extent = extent.max(MIN_CROP_EXTENT.min(natural));
    let origin = clamp_total(origin, 0.0, natural - extent);
    // rounding can leave origin + extent one ulp past the edge
    while origin + extent > natural {
        extent = extent.next_down();
    }
    (origin, extent)
}

/// Subject position as percentages (`0..=100`) relative to the crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

impl FocusPoint {
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_valid(self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }

    pub fn clamped(self) -> Self {
        Self::new(clamp_total(self.x, 0.0, 100.0), clamp_total(self.y, 0.0, 100.0))
    }

    /// Absolute source-pixel position of this focus point inside `crop`.
    pub fn to_source(self, crop: CropRect) -> Point {
        Point::new(
            crop.x + crop.width * self.x / 100.0,
            crop.y + crop.height * self.y / 100.0,
        )
    }
}

/// Strategy for placing a framed image inside an arbitrary runtime container.
///
/// Deserialization is total: any unrecognized string resolves to [`FitMode::Cover`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FitMode {
    /// Fill the container, cropping further around the focus point.
    #[default]
    Cover,
    /// Letterbox the whole crop on a solid fill.
    Contain,
    /// Blurred cover background under a translucent overlay.
    BlurFill,
    /// Blurred, darkened cover background with the untouched crop centered on top.
    PictureInPicture,
}

impl FitMode {
    pub const ALL: [FitMode; 4] = [
        FitMode::Cover,
        FitMode::Contain,
        FitMode::BlurFill,
        FitMode::PictureInPicture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FitMode::Cover => "cover",
            FitMode::Contain => "contain",
            FitMode::BlurFill => "blur-fill",
            FitMode::PictureInPicture => "picture-in-picture",
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "contain" => FitMode::Contain,
            "blur-fill" | "blurfill" => FitMode::BlurFill,
            "picture-in-picture" | "pictureinpicture" | "pip" => FitMode::PictureInPicture,
            _ => FitMode::Cover,
        }
    }
}

impl From<String> for FitMode {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<FitMode> for String {
    fn from(value: FitMode) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The exchanged crop payload: `{ cropData, aspectRatio, focusPoint? }`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    pub crop_data: CropRect,
    pub aspect_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_point: Option<FocusPoint>,
}

/// Persisted, renderer-agnostic description of how an image is framed.
///
/// Values are immutable once emitted by the editor; a re-save replaces them wholesale.
/// Every constructor path validates the invariants checked by [`FramingMetadata::validate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramingMetadata {
    /// Opaque reference to the external image.
    pub source_image_id: String,
    pub natural_width: u32,
    pub natural_height: u32,
    /// Retained region in source-pixel coordinates.
    #[serde(rename = "cropData")]
    pub crop_rect: CropRect,
    /// `crop_rect.width / crop_rect.height`, stored redundantly.
    pub aspect_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_point: Option<FocusPoint>,
    #[serde(default)]
    pub fit_mode: FitMode,
}

impl FramingMetadata {
    /// Build and validate metadata; `aspect_ratio` is derived from `crop`.
    pub fn new(
        source_image_id: impl Into<String>,
        image: ImageSize,
        crop: CropRect,
        focus_point: Option<FocusPoint>,
        fit_mode: FitMode,
    ) -> PosterframeResult<Self> {
        let meta = Self {
            source_image_id: source_image_id.into(),
            natural_width: image.width,
            natural_height: image.height,
            crop_rect: crop,
            aspect_ratio: crop.aspect(),
            focus_point,
            fit_mode,
        };
        meta.validate()?;
        Ok(meta)
    }

    /// Combine an exchanged payload with the image identity it belongs to.
    pub fn from_payload(
        source_image_id: impl Into<String>,
        image: ImageSize,
        payload: CropPayload,
        fit_mode: FitMode,
    ) -> PosterframeResult<Self> {
        let meta = Self {
            source_image_id: source_image_id.into(),
            natural_width: image.width,
            natural_height: image.height,
            crop_rect: payload.crop_data,
            aspect_ratio: payload.aspect_ratio,
            focus_point: payload.focus_point,
            fit_mode,
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn from_json_str(s: &str) -> PosterframeResult<Self> {
        let meta: Self = serde_json::from_str(s)?;
        meta.validate()?;
        Ok(meta)
    }

    pub fn to_payload(&self) -> CropPayload {
        CropPayload {
            crop_data: self.crop_rect,
            aspect_ratio: self.aspect_ratio,
            focus_point: self.focus_point,
        }
    }

    pub fn image_size(&self) -> PosterframeResult<ImageSize> {
        ImageSize::new(self.natural_width, self.natural_height)
    }

    pub fn validate(&self) -> PosterframeResult<()> {
        let image = self.image_size()?;
        let c = self.crop_rect;
        if !c.is_finite() {
            return Err(PosterframeError::validation("cropData must be finite"));
        }
        if c.x < 0.0 || c.y < 0.0 {
            return Err(PosterframeError::validation(
                "cropData x/y must be >= 0",
            ));
        }
        if c.width <= 0.0 || c.height <= 0.0 {
            return Err(PosterframeError::validation(
                "cropData width/height must be > 0",
            ));
        }
        if c.x + c.width > f64::from(image.width) || c.y + c.height > f64::from(image.height) {
            return Err(PosterframeError::validation(format!(
                "cropData exceeds image bounds {}x{}",
                image.width, image.height
            )));
        }
        if !self.aspect_ratio.is_finite() || (self.aspect_ratio - c.aspect()).abs() > ASPECT_EPSILON
        {
            return Err(PosterframeError::validation(format!(
                "aspectRatio {} does not match cropData ({})",
                self.aspect_ratio,
                c.aspect()
            )));
        }
        if let Some(fp) = self.focus_point
            && !fp.is_valid()
        {
            return Err(PosterframeError::validation(
                "focusPoint x/y must be within 0..=100",
            ));
        }
        Ok(())
    }

    /// Copy with drift silently clamped back inside the invariants.
    ///
    /// Renderers resolve through this so a marginally out-of-bounds stored rectangle still
    /// produces a well-formed plan.
    pub fn sanitized(&self) -> Self {
        let image = ImageSize {
            width: self.natural_width.max(1),
            height: self.natural_height.max(1),
        };
        let crop = self.crop_rect.clamped_to(image);
        Self {
            source_image_id: self.source_image_id.clone(),
            natural_width: image.width,
            natural_height: image.height,
            crop_rect: crop,
            aspect_ratio: crop.aspect(),
            focus_point: self.focus_point.map(FocusPoint::clamped),
            fit_mode: self.fit_mode,
        }
    }

    /// Focus point in absolute source coordinates (crop center when unset).
    pub fn focus_source(&self) -> Point {
        self.focus_point
            .unwrap_or(FocusPoint::CENTER)
            .to_source(self.crop_rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/model.rs"]
mod tests;
