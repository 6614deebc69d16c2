pub mod error;
pub mod event;
pub mod item;
pub mod registry;

pub use error::{ActionBarError, Result};
pub use event::{Event, Signal};
pub use item::{GroupMode, Item, ItemId, ItemKind};
pub use registry::Toolbar;
