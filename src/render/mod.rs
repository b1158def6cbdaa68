//! Fit-mode resolution into renderer-agnostic placement directives.

/// Fit-mode resolution.
pub mod fit;
/// Render plan types, CSS emission and fingerprints.
pub mod plan;
