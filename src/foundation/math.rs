use crate::foundation::core::Rect;

/// Position/size tolerance (source or display pixels) for dirty tracking and round trips.
pub(crate) const POSITION_EPSILON: f64 = 0.01;

/// Aspect-ratio tolerance for dirty tracking, option matching and stored-ratio checks.
pub(crate) const ASPECT_EPSILON: f64 = 1e-3;

pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// `clamp` that tolerates an inverted range (collapses to `lo`) and maps NaN to `lo`.
pub(crate) fn clamp_total(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    if hi < lo {
        return lo;
    }
    v.clamp(lo, hi)
}

pub(crate) fn finite_positive(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

#[cfg(test)]
pub(crate) fn rect_contains(outer: Rect, inner: Rect, eps: f64) -> bool {
    inner.x0 >= outer.x0 - eps
        && inner.y0 >= outer.y0 - eps
        && inner.x1 <= outer.x1 + eps
        && inner.y1 <= outer.y1 + eps
}

pub(crate) fn rect_approx_eq(a: Rect, b: Rect, eps: f64) -> bool {
    approx_eq(a.x0, b.x0, eps)
        && approx_eq(a.y0, b.y0, eps)
        && approx_eq(a.width(), b.width(), eps)
        && approx_eq(a.height(), b.height(), eps)
}

/// Fixed-precision decimal rendering used wherever numbers end up in emitted directives.
///
/// Trailing zeros are trimmed so `50.0` renders as `50` and `37.5` as `37.5`.
pub(crate) fn fmt_decimal(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
