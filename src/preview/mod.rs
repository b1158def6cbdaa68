/// Visible windows of stored framing on simulated devices.
pub mod projector;
