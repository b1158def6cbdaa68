//! Bounded polling for container layout readiness.
//!
//! The editor cannot size its frame until the host container has been laid out. Polling is a
//! plain loop with a hard attempt ceiling and a guaranteed fallback, so it always terminates.

use std::time::Duration;

use crate::{
    config::EditorConfig,
    editor::events::EditorEvent,
    foundation::core::Size,
};

/// Source of container measurements (a DOM observer, a window, a test double).
pub trait LayoutProbe {
    /// Current container size, or `None` while layout is not available yet.
    fn measure(&mut self) -> Option<Size>;
}

impl<F> LayoutProbe for F
where
    F: FnMut() -> Option<Size>,
{
    fn measure(&mut self) -> Option<Size> {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn from_config(cfg: &EditorConfig) -> Self {
        Self {
            attempts: cfg.layout_retry_attempts.max(1),
            interval: Duration::from_millis(cfg.layout_retry_interval_ms),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutReadiness {
    Measured { size: Size, attempts: u32 },
    Fallback { size: Size },
}

impl LayoutReadiness {
    pub fn size(self) -> Size {
        match self {
            LayoutReadiness::Measured { size, .. } | LayoutReadiness::Fallback { size } => size,
        }
    }

    /// The session event this result feeds.
    pub fn into_event(self) -> EditorEvent {
        match self {
            LayoutReadiness::Measured { size, .. } => EditorEvent::ContainerMeasured(size),
            LayoutReadiness::Fallback { .. } => EditorEvent::LayoutUnavailable,
        }
    }
}

pub(crate) fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Poll `probe` up to `policy.attempts` times, calling `sleep` between attempts.
pub fn poll_container<P, S>(
    probe: &mut P,
    policy: RetryPolicy,
    fallback: Size,
    mut sleep: S,
) -> LayoutReadiness
where
    P: LayoutProbe + ?Sized,
    S: FnMut(Duration),
{
    for attempt in 1..=policy.attempts {
        if let Some(size) = probe.measure()
            && is_usable(size)
        {
            tracing::debug!(attempt, ?size, "container layout measured");
            return LayoutReadiness::Measured {
                size,
                attempts: attempt,
            };
        }
        if attempt < policy.attempts {
            sleep(policy.interval);
        }
    }
    tracing::warn!(
        attempts = policy.attempts,
        ?fallback,
        "container layout unavailable; using fallback size"
    );
    LayoutReadiness::Fallback { size: fallback }
}

/// [`poll_container`] with thread sleeps and the configured budget and fallback.
pub fn wait_for_container<P>(probe: &mut P, cfg: &EditorConfig) -> LayoutReadiness
where
    P: LayoutProbe + ?Sized,
{
    poll_container(
        probe,
        RetryPolicy::from_config(cfg),
        cfg.fallback_container.to_size(),
        std::thread::sleep,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/editor/layout_probe.rs"]
mod tests;
