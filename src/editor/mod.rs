//! Interactive framing session.
//!
//! A session is driven entirely by [`events::EditorEvent`] values; the host owns the event loop
//! and feeds pointer, keyboard and layout input in order.

/// Session input and outcomes.
pub mod events;
/// Bounded container-layout polling.
pub mod layout_probe;
/// The session state machine.
pub mod session;
