use xxhash_rust::xxh3::Xxh3;

use crate::{
    foundation::core::{ImageSize, Rgba8},
    foundation::math::fmt_decimal,
    metadata::model::{CropRect, FitMode},
};

const XXH3_SEED: u64 = 0x5f3c_a1e0_27d4_b98d;

/// Named object-position used when no focus point is set.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PositionKeyword {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl PositionKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            PositionKeyword::Center => "center",
            PositionKeyword::Top => "top",
            PositionKeyword::Bottom => "bottom",
            PositionKeyword::Left => "left",
            PositionKeyword::Right => "right",
        }
    }
}

/// Effective object-position of an image layer inside its box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ObjectPosition {
    Keyword { keyword: PositionKeyword },
    /// Percentages of the cropped image.
    Percent { x: f64, y: f64 },
}

impl ObjectPosition {
    pub fn to_css(self) -> String {
        match self {
            ObjectPosition::Keyword { keyword } => keyword.as_str().to_string(),
            ObjectPosition::Percent { x, y } => {
                format!("{}% {}%", fmt_decimal(x), fmt_decimal(y))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    Cover,
    Contain,
}

impl ObjectFit {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
        }
    }
}

/// Layer box as fractions (`0..=1`) of the container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Box of `width` x `height` fractions centered in the container.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            x: (1.0 - width) * 0.5,
            y: (1.0 - height) * 0.5,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Filter {
    pub blur_px: f64,
    /// 1.0 leaves brightness untouched.
    pub brightness: f64,
}

impl Filter {
    pub const NONE: Self = Self {
        blur_px: 0.0,
        brightness: 1.0,
    };

    pub fn is_none(&self) -> bool {
        self.blur_px == 0.0 && self.brightness == 1.0
    }

    pub fn to_css(self) -> Option<String> {
        let mut parts = Vec::<String>::new();
        if self.blur_px > 0.0 {
            parts.push(format!("blur({}px)", fmt_decimal(self.blur_px)));
        }
        if self.brightness != 1.0 {
            parts.push(format!("brightness({})", fmt_decimal(self.brightness)));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Overlay {
    pub color: Rgba8,
    pub opacity: f64,
}

/// One image draw: which part of the source is visible, where, and how it is treated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ImageLayer {
    pub fit: ObjectFit,
    /// Source-pixel window visible inside `placement`.
    pub visible: CropRect,
    pub object_position: ObjectPosition,
    pub placement: Placement,
    pub filter: Filter,
    /// Uniform scale applied around the layer center.
    pub scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width_px: Option<f64>,
}

impl ImageLayer {
    /// CSS declarations positioning this layer in a `position: relative` container, in a fixed
    /// order. The source window is realized with background sizing so the stored image is never
    /// re-encoded.
    pub fn css(&self, natural: ImageSize) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("position", "absolute".to_string()),
            ("left", pct(self.placement.x)),
            ("top", pct(self.placement.y)),
            ("width", pct(self.placement.width)),
            ("height", pct(self.placement.height)),
            ("object-fit", self.fit.as_str().to_string()),
            ("object-position", self.object_position.to_css()),
        ];
        let (size, position) = background_window(self.visible, natural);
        out.push(("background-size", size));
        out.push(("background-position", position));
        if let Some(filter) = self.filter.to_css() {
            out.push(("filter", filter));
        }
        if self.scale != 1.0 {
            out.push(("transform", format!("scale({})", fmt_decimal(self.scale))));
        }
        if let Some(max) = self.max_width_px {
            out.push(("max-width", format!("{}px", fmt_decimal(max))));
        }
        out
    }
}

fn pct(fraction: f64) -> String {
    format!("{}%", fmt_decimal(fraction * 100.0))
}

/// `background-size` / `background-position` that show `window` of a `natural` image
/// stretched over the whole box.
fn background_window(window: CropRect, natural: ImageSize) -> (String, String) {
    let nw = f64::from(natural.width);
    let nh = f64::from(natural.height);
    let size = format!(
        "{} {}",
        pct(nw / window.width),
        pct(nh / window.height)
    );
    let axis = |origin: f64, extent: f64, full: f64| {
        let slack = full - extent;
        if slack <= 0.0 { 0.0 } else { origin / slack }
    };
    let position = format!(
        "{} {}",
        pct(axis(window.x, window.width, nw)),
        pct(axis(window.y, window.height, nh))
    );
    (size, position)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Background {
    pub image: ImageLayer,
    /// Solid fill painted under the image (letterbox color).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Rgba8>,
    /// Translucent fill painted over the image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
}

/// Final placement directives for one framed image in one container.
///
/// Plans are pure values: equal inputs produce equal plans and equal fingerprints, which is what
/// lets a server-rendered page and its client hydration agree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub mode: FitMode,
    pub container_aspect: f64,
    pub natural: ImageSize,
    pub background: Background,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<ImageLayer>,
    pub object_position: ObjectPosition,
}

/// Stable 128-bit plan hash (hex-rendered via `Display`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlanFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

impl RenderPlan {
    pub fn fingerprint(&self) -> PlanFingerprint {
        let mut h = StableHasher::new();
        h.write_str(self.mode.as_str());
        h.write_f64(self.container_aspect);
        h.write_u32(self.natural.width);
        h.write_u32(self.natural.height);
        h.write_layer(&self.background.image);
        h.write_opt_color(self.background.backdrop);
        match self.background.overlay {
            Some(o) => {
                h.write_u8(1);
                h.write_color(o.color);
                h.write_f64(o.opacity);
            }
            None => h.write_u8(0),
        }
        match &self.foreground {
            Some(layer) => {
                h.write_u8(1);
                h.write_layer(layer);
            }
            None => h.write_u8(0),
        }
        h.write_position(self.object_position);
        h.finish()
    }

    /// CSS declarations for the background and (if any) foreground layer.
    pub fn css(&self) -> (Vec<(&'static str, String)>, Option<Vec<(&'static str, String)>>) {
        let mut bg = self.background.image.css(self.natural);
        if let Some(color) = self.background.backdrop {
            bg.push(("background-color", color.to_hex()));
        }
        let fg = self.foreground.map(|l| l.css(self.natural));
        (bg, fg)
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        // -0.0 and 0.0 must hash alike
        let v = if v == 0.0 { 0.0 } else { v };
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_color(&mut self, c: Rgba8) {
        self.write_bytes(&[c.r, c.g, c.b, c.a]);
    }

    fn write_opt_color(&mut self, c: Option<Rgba8>) {
        match c {
            Some(c) => {
                self.write_u8(1);
                self.write_color(c);
            }
            None => self.write_u8(0),
        }
    }

    fn write_position(&mut self, p: ObjectPosition) {
        match p {
            ObjectPosition::Keyword { keyword } => {
                self.write_u8(0);
                self.write_str(keyword.as_str());
            }
            ObjectPosition::Percent { x, y } => {
                self.write_u8(1);
                self.write_f64(x);
                self.write_f64(y);
            }
        }
    }

    fn write_layer(&mut self, l: &ImageLayer) {
        self.write_str(l.fit.as_str());
        for v in [l.visible.x, l.visible.y, l.visible.width, l.visible.height] {
            self.write_f64(v);
        }
        self.write_position(l.object_position);
        for v in [l.placement.x, l.placement.y, l.placement.width, l.placement.height] {
            self.write_f64(v);
        }
        self.write_f64(l.filter.blur_px);
        self.write_f64(l.filter.brightness);
        self.write_f64(l.scale);
        match l.max_width_px {
            Some(v) => {
                self.write_u8(1);
                self.write_f64(v);
            }
            None => self.write_u8(0),
        }
    }

    fn finish(self) -> PlanFingerprint {
        let v = self.inner.digest128();
        PlanFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
