use crate::engine::{classify, compute_arrangement, Arrangement, Tier};
use actionbar_core::{Item, ItemId, Result, Toolbar};
use tracing::{debug, trace};

/// A toolbar plus the layout it last rendered.
///
/// Width changes that stay inside the all-inline or grouped tier reuse the
/// cached arrangement untouched, so the host never sees a rebuild it does not
/// need. Triaged layouts depend on the exact width and are always recomputed.
/// Any registry change invalidates the cache.
#[derive(Debug, Clone, Default)]
pub struct ActionView {
    toolbar: Toolbar,
    rendered: Option<Rendered>,
}

#[derive(Debug, Clone)]
struct Rendered {
    revision: u64,
    arrangement: Arrangement,
}

impl Rendered {
    fn reusable(&self, toolbar: &Toolbar, tier: Tier) -> bool {
        self.revision == toolbar.revision()
            && self.arrangement.tier == tier
            && tier != Tier::Triaged
    }
}

impl ActionView {
    pub fn new(toolbar: Toolbar) -> Self {
        Self {
            toolbar,
            rendered: None,
        }
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Mutable access to the registrations. Changes invalidate the cache.
    pub fn toolbar_mut(&mut self) -> &mut Toolbar {
        &mut self.toolbar
    }

    // ── Host-facing registration ──────────────────────────────────────────────

    pub fn register_leading(&mut self, item: Item) -> Result<()> {
        self.toolbar.register_leading(item)
    }

    pub fn register_entry(&mut self, item: Item) -> Result<()> {
        self.toolbar.add_entry(item)
    }

    pub fn register_group_child(&mut self, group: &ItemId, item: Item) -> Result<()> {
        self.toolbar.add_child(group, item)
    }

    pub fn set_overflow_group(&mut self, item: Item) -> Result<()> {
        self.toolbar.set_overflow_group(item)
    }

    pub fn unregister(&mut self, id: &ItemId) -> Result<Item> {
        self.toolbar.unregister(id)
    }

    // ── Layout ────────────────────────────────────────────────────────────────

    /// Recompute for a new container width and return what to draw.
    pub fn on_width_changed(&mut self, width: f32) -> &Arrangement {
        let tier = classify(&self.toolbar, width);

        let rendered = match self.rendered.take() {
            Some(rendered) if rendered.reusable(&self.toolbar, tier) => {
                trace!(?tier, width, "Layout tier unchanged; keeping arrangement");
                rendered
            }
            previous => {
                let from = previous.map(|p| p.arrangement.tier);
                if from != Some(tier) {
                    debug!(?from, to = ?tier, width, "Layout tier changed");
                }
                Rendered {
                    revision: self.toolbar.revision(),
                    arrangement: compute_arrangement(&self.toolbar, width),
                }
            }
        };

        &self.rendered.insert(rendered).arrangement
    }

    /// Tier of the most recent layout, if any.
    pub fn last_state(&self) -> Option<Tier> {
        self.rendered.as_ref().map(|r| r.arrangement.tier)
    }

    /// The arrangement currently on screen, if the view has been laid out.
    pub fn arrangement(&self) -> Option<&Arrangement> {
        self.rendered.as_ref().map(|r| &r.arrangement)
    }

    /// Drop everything derived from the last layout, keeping registrations.
    pub fn remove_all(&mut self) {
        self.rendered = None;
    }

    pub fn is_leading(&self, id: &ItemId) -> bool {
        self.toolbar.leading().is_some_and(|item| &item.id == id)
    }
}
