use crate::error::{ActionBarError, Result};
use crate::item::{Item, ItemId, ItemKind, DEFAULT_OVERFLOW_WIDTH};
use std::collections::HashSet;
use tracing::debug;

/// Identifier given to the overflow entry every toolbar starts with.
pub const DEFAULT_OVERFLOW_ID: &str = "overflow";

/// The ordered collection of entries shown by a single view.
///
/// Holds registrations only. What is actually displayed at a given width is
/// derived by the layout engine and never stored here.
///
/// Groups own their children by value and nothing points back at its
/// container, so every lookup walks top-down.
#[derive(Debug, Clone)]
pub struct Toolbar {
    leading: Option<Item>,
    entries: Vec<Item>,
    overflow: Item,
    /// View-wide separator switch; `None` keeps each group's own setting.
    use_separator: Option<bool>,
    /// Bumped on every mutation so cached layouts can tell they are stale.
    revision: u64,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self {
            leading: None,
            entries: Vec::new(),
            overflow: Item::overflow(DEFAULT_OVERFLOW_ID, DEFAULT_OVERFLOW_WIDTH),
            use_separator: None,
            revision: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn leading(&self) -> Option<&Item> {
        self.leading.as_ref()
    }

    /// Top-level leaves, separators and groups in registration order.
    pub fn entries(&self) -> &[Item] {
        &self.entries
    }

    pub fn overflow(&self) -> &Item {
        &self.overflow
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn use_separator(&self) -> Option<bool> {
        self.use_separator
    }

    /// Whether `group` is drawn with a leading separator on this toolbar.
    pub fn separator_for(&self, group: &Item) -> bool {
        self.use_separator.unwrap_or(group.use_separator)
    }

    /// Find any registered item, including group children.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.all_items().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Every registered item, top-down.
    fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.leading
            .iter()
            .chain(std::iter::once(&self.overflow))
            .chain(self.entries.iter().flat_map(|entry| {
                std::iter::once(entry).chain(entry.children.iter())
            }))
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Register an item in the slot its kind calls for.
    ///
    /// Leaves, separators and groups are appended to the entries. Leading and
    /// overflow items replace whatever occupied their singleton slot
    /// (overwrite, not merge).
    pub fn add_entry(&mut self, item: Item) -> Result<()> {
        match item.kind {
            ItemKind::Leading => self.register_leading(item),
            ItemKind::Overflow => self.set_overflow_group(item),
            ItemKind::Leaf | ItemKind::Separator | ItemKind::Group => {
                self.validate(&item, None)?;
                self.entries.push(item);
                self.touch();
                Ok(())
            }
        }
    }

    /// Set the leading entry, replacing any previous one.
    pub fn register_leading(&mut self, item: Item) -> Result<()> {
        if item.kind != ItemKind::Leading {
            return Err(unsupported(&item, "in the leading slot"));
        }
        let replaced = self.leading.as_ref().map(|old| old.id.clone());
        self.validate(&item, replaced.as_ref())?;
        if let Some(old) = replaced {
            debug!("Replacing leading entry '{old}' with '{}'", item.id);
        }
        self.leading = Some(item);
        self.touch();
        Ok(())
    }

    /// Set the overflow entry, replacing the previous one.
    ///
    /// Overflow contents are derived on every layout pass, so an overflow
    /// item arriving with children is refused.
    pub fn set_overflow_group(&mut self, item: Item) -> Result<()> {
        if item.kind != ItemKind::Overflow {
            return Err(unsupported(&item, "as the overflow entry"));
        }
        if let Some(child) = item.children.first() {
            return Err(unsupported(child, "inside the overflow entry"));
        }
        let replaced = self.overflow.id.clone();
        self.validate(&item, Some(&replaced))?;
        debug!("Replacing overflow entry '{replaced}' with '{}'", item.id);
        self.overflow = item;
        self.touch();
        Ok(())
    }

    /// Append a leaf or separator to a registered group.
    pub fn add_child(&mut self, group: &ItemId, item: Item) -> Result<()> {
        let Some(index) = self.entries.iter().position(|entry| &entry.id == group) else {
            return Err(if self.contains(group) {
                ActionBarError::NotAGroup(group.clone())
            } else {
                ActionBarError::UnknownItem(group.clone())
            });
        };
        if !self.entries[index].is_group() {
            return Err(ActionBarError::NotAGroup(group.clone()));
        }
        check_child(&item)?;
        self.validate(&item, None)?;
        self.entries[index].children.push(item);
        self.touch();
        Ok(())
    }

    /// Remove an item wherever it is registered and hand it back.
    ///
    /// Removing a group removes its children with it. The overflow entry is
    /// permanent and can only be replaced.
    pub fn unregister(&mut self, id: &ItemId) -> Result<Item> {
        if &self.overflow.id == id {
            return Err(unsupported(&self.overflow, "for removal"));
        }
        if self.leading.as_ref().is_some_and(|item| &item.id == id) {
            self.touch();
            return self.leading.take().ok_or_else(|| ActionBarError::UnknownItem(id.clone()));
        }
        if let Some(index) = self.entries.iter().position(|entry| &entry.id == id) {
            self.touch();
            return Ok(self.entries.remove(index));
        }
        for entry in &mut self.entries {
            if let Some(index) = entry.children.iter().position(|child| &child.id == id) {
                let removed = entry.children.remove(index);
                self.touch();
                return Ok(removed);
            }
        }
        Err(ActionBarError::UnknownItem(id.clone()))
    }

    /// Apply a view-wide separator setting, or `None` to defer to each group.
    pub fn set_use_separator(&mut self, use_separator: Option<bool>) {
        if self.use_separator != use_separator {
            self.use_separator = use_separator;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Check `item` (and its children) before anything is mutated.
    /// `replacing` names an id that is about to be vacated.
    fn validate(&self, item: &Item, replacing: Option<&ItemId>) -> Result<()> {
        let mut seen: HashSet<&ItemId> = self
            .all_items()
            .map(|existing| &existing.id)
            .filter(|id| Some(*id) != replacing)
            .collect();

        check_width(item)?;
        if !seen.insert(&item.id) {
            return Err(ActionBarError::DuplicateItem(item.id.clone()));
        }

        if !item.is_group() {
            if let Some(child) = item.children.first() {
                return Err(unsupported(child, "as a child of a non-group entry"));
            }
            return Ok(());
        }

        for child in &item.children {
            check_child(child)?;
            check_width(child)?;
            if !seen.insert(&child.id) {
                return Err(ActionBarError::DuplicateItem(child.id.clone()));
            }
        }
        Ok(())
    }
}

fn unsupported(item: &Item, slot: &'static str) -> ActionBarError {
    ActionBarError::UnsupportedItemKind {
        id: item.id.clone(),
        kind: item.kind,
        slot,
    }
}

fn check_child(item: &Item) -> Result<()> {
    match item.kind {
        ItemKind::Leaf | ItemKind::Separator if item.children.is_empty() => Ok(()),
        ItemKind::Leaf | ItemKind::Separator => Err(unsupported(
            &item.children[0],
            "as a child of a non-group entry",
        )),
        _ => Err(unsupported(item, "inside a group")),
    }
}

fn check_width(item: &Item) -> Result<()> {
    let valid = |w: f32| w.is_finite() && w >= 0.0;
    if valid(item.minimum_width) && valid(item.separator_width) {
        Ok(())
    } else {
        Err(ActionBarError::InvalidWidth {
            id: item.id.clone(),
            width: if valid(item.minimum_width) {
                item.separator_width
            } else {
                item.minimum_width
            },
        })
    }
}
