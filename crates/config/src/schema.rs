use actionbar_core::item::{
    DEFAULT_ITEM_WIDTH, DEFAULT_LEADING_WIDTH, DEFAULT_OVERFLOW_WIDTH, DEFAULT_SEPARATOR_WIDTH,
};
use actionbar_core::{GroupMode, Item, ItemKind, Result, Toolbar};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `actionbar.toml`.
///
/// Sections left out of the file are empty; only a missing file yields the
/// demo bar from [`BarConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    /// Settings for the demo host.
    #[serde(default)]
    pub bar: BarSettings,
    /// The base view shown when no contextual view is active.
    #[serde(default)]
    pub view: ViewConfig,
    /// Contextual views that can be pushed on top of the base view.
    #[serde(default)]
    pub contextual: Vec<ViewConfig>,
}

impl Default for BarConfig {
    /// Title, five buttons and a three-button group, plus two contextual
    /// views with a group each.
    fn default() -> Self {
        let buttons = |prefix: &str, range: std::ops::Range<usize>| -> Vec<ItemConfig> {
            range
                .map(|i| ItemConfig::new(format!("{prefix}btn{i}"), ItemKind::Leaf))
                .collect()
        };

        let mut base = vec![
            ItemConfig::new("title", ItemKind::Leading),
            ItemConfig::new("overflow", ItemKind::Overflow),
        ];
        base.extend(buttons("", 0..5));
        base.push(ItemConfig {
            children: buttons("", 5..8),
            ..ItemConfig::new("group1", ItemKind::Group)
        });

        let contextual = (0..2)
            .map(|j| {
                let prefix = format!("cav{j}-");
                let mut items = vec![ItemConfig::new(format!("{prefix}previous"), ItemKind::Leading)];
                items.extend(buttons(prefix.as_str(), 0..3));
                items.push(ItemConfig {
                    children: buttons(prefix.as_str(), 3..6),
                    ..ItemConfig::new(format!("{prefix}group1"), ItemKind::Group)
                });
                ViewConfig {
                    use_separator: None,
                    items,
                }
            })
            .collect();

        Self {
            bar: BarSettings::default(),
            view: ViewConfig {
                use_separator: Some(true),
                items: base,
            },
            contextual,
        }
    }
}

/// Settings for the headless demo host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    /// Container width used when none is given on the command line.
    pub width: f32,
}

impl Default for BarSettings {
    fn default() -> Self {
        Self { width: 800.0 }
    }
}

/// One toolbar: leading entry, plain entries, groups and overflow entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Force a separator in front of every group (`true`/`false`), or leave
    /// it to each group when unset.
    pub use_separator: Option<bool>,
    /// Entries in registration order. Leading and overflow entries may appear
    /// anywhere; they go to their own slot.
    pub items: Vec<ItemConfig>,
}

impl ViewConfig {
    /// Register every configured item on a fresh toolbar.
    pub fn to_toolbar(&self) -> Result<Toolbar> {
        let mut toolbar = Toolbar::new();
        for item in &self.items {
            toolbar.add_entry(item.to_item())?;
        }
        toolbar.set_use_separator(self.use_separator);
        Ok(toolbar)
    }
}

/// Config block for a single entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Unique identifier, e.g. `"btn0"` or `"group1"`.
    pub id: String,
    /// Entry kind; plain buttons when omitted.
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
    /// Width required inline. Defaults depend on the kind.
    #[serde(default)]
    pub minimum_width: Option<f32>,
    #[serde(default)]
    pub important: bool,
    /// Groups only.
    #[serde(default)]
    pub mode: GroupMode,
    /// Groups only.
    #[serde(default)]
    pub use_separator: bool,
    /// Groups only.
    #[serde(default)]
    pub separator_width: Option<f32>,
    /// Groups only; anything else is rejected when the view is built.
    #[serde(default)]
    pub children: Vec<ItemConfig>,
}

fn default_kind() -> ItemKind {
    ItemKind::Leaf
}

impl ItemConfig {
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            kind,
            minimum_width: None,
            important: false,
            mode: GroupMode::Normal,
            use_separator: false,
            separator_width: None,
            children: Vec::new(),
        }
    }

    /// Build the core item. Validation is left to the registry.
    pub fn to_item(&self) -> Item {
        let width = |fallback| self.minimum_width.unwrap_or(fallback);
        let id = self.id.as_str();
        let base = match self.kind {
            ItemKind::Leading => Item::leading(id, width(DEFAULT_LEADING_WIDTH)),
            ItemKind::Leaf => Item::leaf(id, width(DEFAULT_ITEM_WIDTH)),
            ItemKind::Separator => Item::separator(id),
            ItemKind::Group => Item::group(id, width(DEFAULT_ITEM_WIDTH)),
            ItemKind::Overflow => Item::overflow(id, width(DEFAULT_OVERFLOW_WIDTH)),
        };

        self.children.iter().fold(
            base.important(self.important)
                .with_mode(self.mode)
                .with_separator(self.use_separator)
                .with_separator_width(self.separator_width.unwrap_or(DEFAULT_SEPARATOR_WIDTH)),
            |item, child| item.with_child(child.to_item()),
        )
    }
}
