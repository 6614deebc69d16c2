//! Adaptive layout for action bars.
//!
//! [`compute_arrangement`] decides, for one toolbar and one width, which
//! entries are inline, which collapse into their group's dropdown and which
//! fall into the overflow menu. [`ActionView`] caches that decision per view
//! and [`ActionBar`] stacks contextual views on top of a base view.

pub mod engine;
pub mod overflow;
pub mod stack;
pub mod view;

pub use engine::{classify, compute_arrangement, Arrangement, DisplayKind, Placement, Slot, Tier};
pub use overflow::pack;
pub use stack::{ActionBar, BarState};
pub use view::ActionView;
