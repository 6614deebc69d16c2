use crate::item::ItemId;
use serde::Serialize;

/// Signals delivered by the host into the bar.
///
/// Sources:
/// - Pointer / keyboard activation  → `Activated`
/// - Contextual view chrome          → `Back`, `Done`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// An entry was activated (clicked, tapped, key-triggered).
    Activated(ItemId),
    /// The current contextual view asked to go back.
    Back,
    /// The current contextual view finished its task.
    Done,
}

/// Events raised by the bar toward the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Leading entry of the base view was activated.
    Previous,
    /// A contextual view was pushed; carries the new stack depth.
    Pushed { depth: usize },
    /// A contextual view was dismissed via back / its leading entry.
    Back { depth: usize },
    /// A contextual view was dismissed because it finished.
    Done { depth: usize },
}
