use crate::item::{ItemId, ItemKind};
use thiserror::Error;

/// Top-level error type used across the entire workspace.
///
/// Registration errors are raised synchronously at the call that caused them
/// and leave the registry untouched. Layout itself never fails.
#[derive(Debug, Error)]
pub enum ActionBarError {
    #[error("{kind:?} item '{id}' cannot be registered as {slot}")]
    UnsupportedItemKind {
        id: ItemId,
        kind: ItemKind,
        slot: &'static str,
    },

    #[error("item '{0}' is already registered")]
    DuplicateItem(ItemId),

    #[error("no item '{0}' is registered")]
    UnknownItem(ItemId),

    #[error("item '{0}' is not a group")]
    NotAGroup(ItemId),

    #[error("item '{id}' has invalid minimum width {width}")]
    InvalidWidth { id: ItemId, width: f32 },

    #[error("no contextual view to pop")]
    StackUnderflow,

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ActionBarError> = std::result::Result<T, E>;
