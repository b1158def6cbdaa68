use crate::{
    foundation::error::{PosterframeError, PosterframeResult},
    foundation::math::{ASPECT_EPSILON, approx_eq, finite_positive},
};

/// Recommended default frame ratio (3:4 portrait poster).
pub const RECOMMENDED_ASPECT: f64 = 3.0 / 4.0;

/// Link-preview thumbnail ratio (1200x630).
pub const SOCIAL_ASPECT: f64 = 1200.0 / 630.0;

/// A selectable frame ratio.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectOption {
    pub label: String,
    pub ratio: f64,
}

impl AspectOption {
    pub fn new(label: impl Into<String>, ratio: f64) -> Self {
        Self {
            label: label.into(),
            ratio,
        }
    }
}

/// The ratio table offered when the caller does not restrict it.
pub fn standard_options() -> Vec<AspectOption> {
    vec![
        AspectOption::new("3:4", RECOMMENDED_ASPECT),
        AspectOption::new("1:1", 1.0),
        AspectOption::new("4:5", 4.0 / 5.0),
        AspectOption::new("2:3", 2.0 / 3.0),
        AspectOption::new("9:16", 9.0 / 16.0),
        AspectOption::new("16:9", 16.0 / 9.0),
        AspectOption::new("1.91:1", SOCIAL_ASPECT),
    ]
}

/// Resolved set of ratios an editor session may select from.
///
/// Never empty; `default_ratio` is always one of `options`.
#[derive(Clone, Debug, PartialEq)]
pub struct AspectOptions {
    options: Vec<AspectOption>,
    default_ratio: f64,
}

impl AspectOptions {
    /// Resolve a caller-restricted list.
    ///
    /// `None` yields [`standard_options`]. Non-finite or non-positive entries are dropped, and an
    /// empty result falls back to the single recommended ratio.
    pub fn resolve(allowed: Option<&[f64]>) -> Self {
        let Some(allowed) = allowed else {
            return Self {
                options: standard_options(),
                default_ratio: RECOMMENDED_ASPECT,
            };
        };

        let mut options = Vec::<AspectOption>::with_capacity(allowed.len());
        for &r in allowed {
            let Some(r) = finite_positive(r) else {
                continue;
            };
            if options.iter().any(|o| approx_eq(o.ratio, r, ASPECT_EPSILON)) {
                continue;
            }
            options.push(AspectOption::new(label_for(r), r));
        }

        if options.is_empty() {
            tracing::warn!(
                ?allowed,
                "allowed aspect list is empty or misconfigured; using recommended ratio"
            );
            return Self {
                options: vec![AspectOption::new(label_for(RECOMMENDED_ASPECT), RECOMMENDED_ASPECT)],
                default_ratio: RECOMMENDED_ASPECT,
            };
        }

        let default_ratio = options
            .iter()
            .find(|o| approx_eq(o.ratio, RECOMMENDED_ASPECT, ASPECT_EPSILON))
            .unwrap_or(&options[0])
            .ratio;
        Self {
            options,
            default_ratio,
        }
    }

    pub fn options(&self) -> &[AspectOption] {
        &self.options
    }

    pub fn default_ratio(&self) -> f64 {
        self.default_ratio
    }

    /// Matching option ratio within tolerance, if any.
    pub fn find(&self, ratio: f64) -> Option<f64> {
        self.options
            .iter()
            .find(|o| approx_eq(o.ratio, ratio, ASPECT_EPSILON))
            .map(|o| o.ratio)
    }
}

impl Default for AspectOptions {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// Parse `"16:9"`, `"1200/630"` or a plain decimal such as `"0.75"`.
pub fn parse_aspect(s: &str) -> PosterframeResult<f64> {
    let s = s.trim();
    let parsed = if let Some((w, h)) = s.split_once([':', '/', 'x']) {
        let w: f64 = w.trim().parse().map_err(|_| bad_aspect(s))?;
        let h: f64 = h.trim().parse().map_err(|_| bad_aspect(s))?;
        w / h
    } else {
        s.parse::<f64>().map_err(|_| bad_aspect(s))?
    };
    finite_positive(parsed).ok_or_else(|| bad_aspect(s))
}

fn bad_aspect(s: &str) -> PosterframeError {
    PosterframeError::validation(format!("invalid aspect ratio '{s}'"))
}

fn label_for(ratio: f64) -> String {
    standard_options()
        .into_iter()
        .find(|o| approx_eq(o.ratio, ratio, ASPECT_EPSILON))
        .map(|o| o.label)
        .unwrap_or_else(|| format!("{}:1", crate::foundation::math::fmt_decimal(ratio)))
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/aspect.rs"]
mod tests;
