use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum width of an ordinary entry when the host supplies none.
pub const DEFAULT_ITEM_WIDTH: f32 = 90.0;
/// Minimum width of the leading ("previous") entry.
pub const DEFAULT_LEADING_WIDTH: f32 = 100.0;
/// Minimum width of the overflow trigger.
pub const DEFAULT_OVERFLOW_WIDTH: f32 = 48.0;
/// Width of the separator drawn in front of a group.
pub const DEFAULT_SEPARATOR_WIDTH: f32 = 1.0;

/// Host-assigned identifier of a toolbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What role an entry plays on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// The always-visible back/title entry. At most one per toolbar.
    Leading,
    /// Ordinary button, toggle or check.
    Leaf,
    /// Visual divider. Costs nothing when packing.
    Separator,
    /// Collapsible container of leaves.
    Group,
    /// The designated group receiving everything that does not fit.
    Overflow,
}

/// How a group behaves when there is room to spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Children are laid out inline whenever everything fits.
    #[default]
    Normal,
    /// Always rendered as a collapsed dropdown.
    Spinner,
}

/// A single toolbar entry.
///
/// One record covers every kind; the group-only fields (`children`, `mode`,
/// `use_separator`, `separator_width`) are ignored for other kinds and the
/// registry refuses children on anything that is not a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Horizontal space required when shown inline.
    pub minimum_width: f32,
    /// Kept inline first when the toolbar has to triage.
    pub important: bool,
    pub children: Vec<Item>,
    pub mode: GroupMode,
    pub use_separator: bool,
    pub separator_width: f32,
}

impl Item {
    fn with_kind(id: impl Into<ItemId>, kind: ItemKind, minimum_width: f32) -> Self {
        Self {
            id: id.into(),
            kind,
            minimum_width,
            important: false,
            children: Vec::new(),
            mode: GroupMode::Normal,
            use_separator: false,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }

    pub fn leading(id: impl Into<ItemId>, minimum_width: f32) -> Self {
        Self::with_kind(id, ItemKind::Leading, minimum_width)
    }

    pub fn leaf(id: impl Into<ItemId>, minimum_width: f32) -> Self {
        Self::with_kind(id, ItemKind::Leaf, minimum_width)
    }

    pub fn separator(id: impl Into<ItemId>) -> Self {
        Self::with_kind(id, ItemKind::Separator, 0.0)
    }

    pub fn group(id: impl Into<ItemId>, minimum_width: f32) -> Self {
        Self::with_kind(id, ItemKind::Group, minimum_width)
    }

    pub fn overflow(id: impl Into<ItemId>, minimum_width: f32) -> Self {
        Self::with_kind(id, ItemKind::Overflow, minimum_width)
    }

    #[must_use]
    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GroupMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, use_separator: bool) -> Self {
        self.use_separator = use_separator;
        self
    }

    #[must_use]
    pub fn with_separator_width(mut self, width: f32) -> Self {
        self.separator_width = width;
        self
    }

    /// Append a child. Validity is checked when the group is registered.
    #[must_use]
    pub fn with_child(mut self, child: Item) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_group(&self) -> bool {
        self.kind == ItemKind::Group
    }

    /// Width this entry costs in packing decisions. Separators are free.
    pub fn cost(&self) -> f32 {
        match self.kind {
            ItemKind::Separator => 0.0,
            _ => self.minimum_width,
        }
    }

    /// Width of the group's children laid out inline, ignoring separators.
    pub fn expanded_width(&self) -> f32 {
        self.children.iter().map(Item::cost).sum()
    }

    /// Leaves (not separators) among the children, in display order.
    pub fn leaves(&self) -> impl Iterator<Item = &Item> {
        self.children
            .iter()
            .filter(|child| child.kind == ItemKind::Leaf)
    }
}
