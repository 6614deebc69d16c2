use crate::overflow::pack;
use actionbar_core::{GroupMode, Item, ItemId, ItemKind, Toolbar};
use serde::Serialize;

/// How much of the toolbar fits at a given width.
///
/// Ordered by capability, so `Tier::Triaged < Tier::Grouped < Tier::All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Not even collapsed groups fit; important entries win, the rest overflow.
    Triaged,
    /// Every group collapses into its dropdown.
    Grouped,
    /// Every entry fits inline.
    All,
}

/// One rendered position on the toolbar, left to right.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "slot", rename_all = "snake_case")]
pub enum Slot {
    /// An entry drawn directly on the bar.
    Inline { item: ItemId },
    /// Divider drawn in front of a group (or the overflow entry).
    Separator { before: ItemId },
    /// A group drawn as a single trigger; `children` fill its dropdown.
    CollapsedGroup { item: ItemId, children: Vec<ItemId> },
    /// The overflow trigger and everything packed into it. Always last.
    Overflow { item: ItemId, children: Vec<ItemId> },
}

/// Where an individual item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    Inline,
    CollapsedGroup,
    WithinGroup,
    Overflow,
    WithinOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub item: ItemId,
    pub display: DisplayKind,
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrangement {
    pub tier: Tier,
    pub slots: Vec<Slot>,
}

impl Arrangement {
    /// Every placed item in display order, dropdown contents included.
    /// Separators synthesised by the engine are not items and are skipped.
    pub fn placements(&self) -> Vec<Placement> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut push = |item: &ItemId, display| {
            out.push(Placement {
                item: item.clone(),
                display,
            })
        };

        for slot in &self.slots {
            match slot {
                Slot::Inline { item } => push(item, DisplayKind::Inline),
                Slot::Separator { .. } => {}
                Slot::CollapsedGroup { item, children } => {
                    push(item, DisplayKind::CollapsedGroup);
                    for child in children {
                        push(child, DisplayKind::WithinGroup);
                    }
                }
                Slot::Overflow { item, children } => {
                    push(item, DisplayKind::Overflow);
                    for child in children {
                        push(child, DisplayKind::WithinOverflow);
                    }
                }
            }
        }
        out
    }

    /// Ids drawn directly on the bar.
    pub fn inline(&self) -> Vec<&ItemId> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Inline { item } => Some(item),
                _ => None,
            })
            .collect()
    }

    /// Contents of the overflow menu; empty when nothing overflowed.
    pub fn overflow(&self) -> &[ItemId] {
        match self.slots.last() {
            Some(Slot::Overflow { children, .. }) => children,
            _ => &[],
        }
    }
}

/// Pick the tier `width` supports.
///
/// All-inline uses `<=` while collapsed groups need strict `<`; the gap is
/// deliberate headroom. Zero, negative and NaN widths always triage.
pub fn classify(toolbar: &Toolbar, width: f32) -> Tier {
    if !(width > 0.0) {
        return Tier::Triaged;
    }

    let fixed = toolbar.leading().map_or(0.0, Item::cost)
        + toolbar
            .entries()
            .iter()
            .filter(|entry| !entry.is_group())
            .map(Item::cost)
            .sum::<f32>();

    let expanded: f32 = groups(toolbar)
        .map(|group| match group.mode {
            GroupMode::Spinner => group.minimum_width,
            GroupMode::Normal => group.expanded_width(),
        })
        .sum();
    if fixed + expanded <= width {
        return Tier::All;
    }

    let collapsed: f32 = groups(toolbar).map(|group| group.minimum_width).sum();
    if fixed + collapsed < width {
        Tier::Grouped
    } else {
        Tier::Triaged
    }
}

/// Lay `toolbar` out at `width`.
///
/// Pure and total: the same inputs always produce the same arrangement, and
/// every leaf ends up exactly once inline, in a dropdown or in overflow.
pub fn compute_arrangement(toolbar: &Toolbar, width: f32) -> Arrangement {
    let tier = classify(toolbar, width);
    let slots = match tier {
        Tier::All => lay_out_all(toolbar),
        Tier::Grouped => lay_out_grouped(toolbar),
        Tier::Triaged => triage(toolbar, width),
    };
    Arrangement { tier, slots }
}

fn groups(toolbar: &Toolbar) -> impl Iterator<Item = &Item> {
    toolbar.entries().iter().filter(|entry| entry.is_group())
}

fn inline(item: &Item) -> Slot {
    Slot::Inline {
        item: item.id.clone(),
    }
}

/// A group as a dropdown trigger. Only leaves go into the dropdown; the
/// group's own separators are drawn when it expands inline.
fn collapsed(group: &Item) -> Slot {
    Slot::CollapsedGroup {
        item: group.id.clone(),
        children: group.leaves().map(|child| child.id.clone()).collect(),
    }
}

/// Leading entry followed by the plain (non-group) entries.
fn head(toolbar: &Toolbar) -> Vec<Slot> {
    toolbar
        .leading()
        .into_iter()
        .chain(toolbar.entries().iter().filter(|entry| !entry.is_group()))
        .map(inline)
        .collect()
}

fn push_collapsed(slots: &mut Vec<Slot>, toolbar: &Toolbar, group: &Item) {
    if toolbar.separator_for(group) {
        slots.push(Slot::Separator {
            before: group.id.clone(),
        });
    }
    slots.push(collapsed(group));
}

fn lay_out_all(toolbar: &Toolbar) -> Vec<Slot> {
    let mut slots = head(toolbar);
    for group in groups(toolbar) {
        match group.mode {
            GroupMode::Spinner => slots.push(collapsed(group)),
            GroupMode::Normal => {
                if toolbar.separator_for(group) && !group.children.is_empty() {
                    slots.push(Slot::Separator {
                        before: group.id.clone(),
                    });
                }
                slots.extend(group.children.iter().map(inline));
            }
        }
    }
    slots
}

fn lay_out_grouped(toolbar: &Toolbar) -> Vec<Slot> {
    let mut slots = head(toolbar);
    for group in groups(toolbar) {
        push_collapsed(&mut slots, toolbar, group);
    }
    slots
}

/// Greedy first-fit under pressure: important leaves, then any leaf that
/// still fits, then whole groups. Everything else is packed into overflow.
/// Top-level separators are dropped at this tier.
fn triage(toolbar: &Toolbar, width: f32) -> Vec<Slot> {
    let overflow = toolbar.overflow();
    let reserved = width - overflow.minimum_width;

    let leaves: Vec<&Item> = toolbar
        .entries()
        .iter()
        .filter(|entry| entry.kind == ItemKind::Leaf)
        .collect();
    let mut kept = vec![false; leaves.len()];
    let mut used = 0.0_f32;
    let mut hidden = Vec::new();

    for (index, leaf) in leaves.iter().enumerate() {
        if leaf.important && used + leaf.cost() < reserved {
            kept[index] = true;
            used += leaf.cost();
        } else {
            hidden.push(index);
        }
    }

    hidden.retain(|&index| {
        let cost = leaves[index].cost();
        if used + cost < reserved {
            kept[index] = true;
            used += cost;
            false
        } else {
            true
        }
    });

    let mut shown_groups = Vec::new();
    let mut hidden_groups = Vec::new();
    for group in groups(toolbar) {
        let cost = group.minimum_width + group.separator_width;
        if used + cost < reserved {
            used += cost;
            shown_groups.push(group);
        } else {
            hidden_groups.push(group);
        }
    }

    let hidden_leaves: Vec<&Item> = hidden.iter().map(|&index| leaves[index]).collect();
    let packed = pack(&hidden_leaves, &hidden_groups);

    let mut slots: Vec<Slot> = toolbar.leading().into_iter().map(inline).collect();
    for (leaf, keep) in leaves.iter().zip(&kept) {
        if *keep {
            slots.push(inline(leaf));
        }
    }
    for group in shown_groups {
        push_collapsed(&mut slots, toolbar, group);
    }
    if !packed.is_empty() {
        if toolbar.separator_for(overflow) {
            slots.push(Slot::Separator {
                before: overflow.id.clone(),
            });
        }
        slots.push(Slot::Overflow {
            item: overflow.id.clone(),
            children: packed.iter().map(|item| item.id.clone()).collect(),
        });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&ItemId]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    fn overflow_ids(arrangement: &Arrangement) -> Vec<String> {
        arrangement.overflow().iter().map(ItemId::to_string).collect()
    }

    /// Leading 30 plus four 50-wide plain buttons.
    fn four_buttons(overflow_width: f32) -> Toolbar {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::leading("title", 30.0)).unwrap();
        bar.add_entry(Item::overflow("more", overflow_width)).unwrap();
        for i in 0..4 {
            bar.add_entry(Item::leaf(format!("btn{i}"), 50.0)).unwrap();
        }
        bar
    }

    /// Leading 30 plus one group (60) holding two 40-wide buttons.
    fn one_group() -> Toolbar {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::leading("title", 30.0)).unwrap();
        bar.add_entry(
            Item::group("group1", 60.0)
                .with_child(Item::leaf("a", 40.0))
                .with_child(Item::leaf("b", 40.0)),
        )
        .unwrap();
        bar
    }

    #[test]
    fn exact_fit_shows_everything_inline() {
        let arrangement = compute_arrangement(&four_buttons(40.0), 230.0);
        assert_eq!(arrangement.tier, Tier::All);
        assert_eq!(
            ids(&arrangement.inline()),
            ["title", "btn0", "btn1", "btn2", "btn3"]
        );
        assert!(arrangement.overflow().is_empty());
    }

    #[test]
    fn one_pixel_short_triages_and_backfills() {
        let arrangement = compute_arrangement(&four_buttons(40.0), 229.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        // 229 - 40 leaves 189: three buttons fit, the fourth overflows.
        assert_eq!(ids(&arrangement.inline()), ["title", "btn0", "btn1", "btn2"]);
        assert_eq!(overflow_ids(&arrangement), ["btn3"]);
        assert!(matches!(arrangement.slots.last(), Some(Slot::Overflow { .. })));
    }

    #[test]
    fn cramped_bar_overflows_every_button_in_order() {
        let arrangement = compute_arrangement(&four_buttons(40.0), 80.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(ids(&arrangement.inline()), ["title"]);
        assert_eq!(overflow_ids(&arrangement), ["btn0", "btn1", "btn2", "btn3"]);
    }

    #[test]
    fn groups_collapse_when_children_do_not_fit() {
        let arrangement = compute_arrangement(&one_group(), 95.0);
        assert_eq!(arrangement.tier, Tier::Grouped);
        assert_eq!(
            arrangement.slots,
            vec![
                Slot::Inline { item: "title".into() },
                Slot::CollapsedGroup {
                    item: "group1".into(),
                    children: vec!["a".into(), "b".into()],
                },
            ]
        );
    }

    #[test]
    fn grouped_boundary_is_strict() {
        // 30 + 60 == 90 is not enough for the grouped tier.
        assert_eq!(classify(&one_group(), 90.0), Tier::Triaged);
        assert_eq!(classify(&one_group(), 90.5), Tier::Grouped);
        // ...while the all-inline tier accepts an exact fit.
        assert_eq!(classify(&one_group(), 110.0), Tier::All);
    }

    #[test]
    fn normal_group_expands_inline_with_separator() {
        let mut bar = one_group();
        bar.set_use_separator(Some(true));
        let arrangement = compute_arrangement(&bar, 200.0);
        assert_eq!(arrangement.tier, Tier::All);
        assert_eq!(
            arrangement.slots,
            vec![
                Slot::Inline { item: "title".into() },
                Slot::Separator { before: "group1".into() },
                Slot::Inline { item: "a".into() },
                Slot::Inline { item: "b".into() },
            ]
        );
    }

    #[test]
    fn empty_group_gets_no_separator_when_expanded() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::group("empty", 20.0).with_separator(true))
            .unwrap();
        let arrangement = compute_arrangement(&bar, 100.0);
        assert_eq!(arrangement.tier, Tier::All);
        assert!(arrangement.slots.is_empty());
    }

    #[test]
    fn spinner_group_stays_collapsed_with_room_to_spare() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::leading("title", 30.0)).unwrap();
        bar.add_entry(
            Item::group("spin", 60.0)
                .with_mode(GroupMode::Spinner)
                .with_child(Item::leaf("a", 40.0))
                .with_child(Item::leaf("b", 40.0)),
        )
        .unwrap();

        // Spinner contributes its own width: 30 + 60 <= 100.
        let arrangement = compute_arrangement(&bar, 100.0);
        assert_eq!(arrangement.tier, Tier::All);
        assert!(matches!(
            &arrangement.slots[1],
            Slot::CollapsedGroup { item, children } if item.as_str() == "spin" && children.len() == 2
        ));
    }

    #[test]
    fn plain_entries_precede_groups() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::group("g", 10.0).with_child(Item::leaf("child", 10.0)))
            .unwrap();
        bar.add_entry(Item::leaf("late", 10.0)).unwrap();
        let arrangement = compute_arrangement(&bar, 500.0);
        assert_eq!(ids(&arrangement.inline()), ["late", "child"]);
    }

    #[test]
    fn important_entries_win_and_ties_exclude() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 30.0)).unwrap();
        bar.add_entry(Item::leaf("a", 60.0).important(true)).unwrap();
        bar.add_entry(Item::leaf("b", 60.0)).unwrap();
        bar.add_entry(Item::leaf("c", 60.0).important(true)).unwrap();
        bar.add_entry(Item::leaf("d", 60.0)).unwrap();

        // Reserved 120: `c` would land exactly on the limit and is refused.
        let tight = compute_arrangement(&bar, 150.0);
        assert_eq!(ids(&tight.inline()), ["a"]);
        assert_eq!(overflow_ids(&tight), ["b", "c", "d"]);

        // Reserved 130: both important entries fit, in registration order.
        let roomier = compute_arrangement(&bar, 160.0);
        assert_eq!(ids(&roomier.inline()), ["a", "c"]);
        assert_eq!(overflow_ids(&roomier), ["b", "d"]);
    }

    #[test]
    fn backfill_admits_small_entries_first_fit() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 40.0)).unwrap();
        bar.add_entry(Item::leaf("big", 100.0).important(true)).unwrap();
        bar.add_entry(Item::leaf("huge", 200.0)).unwrap();
        bar.add_entry(Item::leaf("small1", 10.0)).unwrap();
        bar.add_entry(Item::leaf("small2", 10.0)).unwrap();

        let arrangement = compute_arrangement(&bar, 200.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(ids(&arrangement.inline()), ["big", "small1", "small2"]);
        assert_eq!(overflow_ids(&arrangement), ["huge"]);
    }

    #[test]
    fn groups_admitted_after_leaves_rest_overflow() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 40.0)).unwrap();
        bar.add_entry(Item::leaf("a", 50.0).important(true)).unwrap();
        bar.add_entry(
            Item::group("g", 40.0)
                .with_child(Item::leaf("x", 30.0))
                .with_child(Item::leaf("y", 30.0)),
        )
        .unwrap();
        bar.add_entry(Item::group("h", 100.0).with_child(Item::leaf("z", 80.0)))
            .unwrap();

        // Reserved 110: a (50) + g (40 + 1 separator) fit, h does not.
        let arrangement = compute_arrangement(&bar, 150.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(
            arrangement.slots,
            vec![
                Slot::Inline { item: "a".into() },
                Slot::CollapsedGroup {
                    item: "g".into(),
                    children: vec!["x".into(), "y".into()],
                },
                Slot::Overflow {
                    item: "more".into(),
                    children: vec!["z".into()],
                },
            ]
        );
    }

    #[test]
    fn overflow_is_omitted_when_nothing_is_hidden() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::leaf("a", 50.0).important(true)).unwrap();
        bar.add_entry(Item::group("g", 100.0)).unwrap();
        // The empty group contributes no children to overflow.
        let arrangement = compute_arrangement(&bar, 40.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(overflow_ids(&arrangement), ["a"]);

        // Without `a` the empty group expands to nothing at all.
        bar.unregister(&"a".into()).unwrap();
        let arrangement = compute_arrangement(&bar, 40.0);
        assert!(arrangement.slots.is_empty());
    }

    #[test]
    fn degenerate_widths_keep_only_leading() {
        let bar = one_group();
        for width in [0.0, -25.0, f32::NAN] {
            let arrangement = compute_arrangement(&bar, width);
            assert_eq!(arrangement.tier, Tier::Triaged);
            assert_eq!(ids(&arrangement.inline()), ["title"]);
            assert_eq!(overflow_ids(&arrangement), ["a", "b"]);
        }
    }

    #[test]
    fn zero_width_items_still_triage_at_zero() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 0.0)).unwrap();
        bar.add_entry(Item::leaf("free", 0.0)).unwrap();
        let arrangement = compute_arrangement(&bar, 0.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(overflow_ids(&arrangement), ["free"]);
    }

    #[test]
    fn separators_are_free_but_dropped_under_triage() {
        let mut bar = four_buttons(40.0);
        bar.add_entry(Item::separator("sep")).unwrap();
        assert_eq!(classify(&bar, 230.0), Tier::All);

        let arrangement = compute_arrangement(&bar, 100.0);
        assert!(!arrangement.inline().iter().any(|id| id.as_str() == "sep"));
        assert!(!arrangement.overflow().iter().any(|id| id.as_str() == "sep"));
    }

    /// Overflow 40, then a group (50) holding `a` (40), a divider and `b` (40).
    fn group_with_divider() -> Toolbar {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 40.0)).unwrap();
        bar.add_entry(
            Item::group("g", 50.0)
                .with_child(Item::leaf("a", 40.0))
                .with_child(Item::separator("div"))
                .with_child(Item::leaf("b", 40.0)),
        )
        .unwrap();
        bar
    }

    #[test]
    fn group_separators_never_reach_overflow() {
        let arrangement = compute_arrangement(&group_with_divider(), 50.0);
        assert_eq!(arrangement.tier, Tier::Triaged);
        assert_eq!(overflow_ids(&arrangement), ["a", "b"]);
    }

    #[test]
    fn group_separators_stay_out_of_dropdowns() {
        let bar = group_with_divider();
        let arrangement = compute_arrangement(&bar, 60.0);
        assert_eq!(arrangement.tier, Tier::Grouped);
        assert_eq!(
            arrangement.slots,
            vec![Slot::CollapsedGroup {
                item: "g".into(),
                children: vec!["a".into(), "b".into()],
            }]
        );

        // Expanded inline, the divider sits between the two buttons.
        let expanded = compute_arrangement(&bar, 80.0);
        assert_eq!(expanded.tier, Tier::All);
        assert_eq!(ids(&expanded.inline()), ["a", "div", "b"]);
    }

    #[test]
    fn spinner_group_under_triage_is_admitted_or_overflowed_whole() {
        let mut bar = Toolbar::new();
        bar.add_entry(Item::overflow("more", 40.0)).unwrap();
        bar.add_entry(Item::leaf("a", 50.0).important(true)).unwrap();
        bar.add_entry(
            Item::group("spin", 40.0)
                .with_mode(GroupMode::Spinner)
                .with_child(Item::leaf("x", 30.0))
                .with_child(Item::separator("div"))
                .with_child(Item::leaf("y", 30.0)),
        )
        .unwrap();
        bar.add_entry(Item::leaf("wide", 200.0)).unwrap();

        // Reserved 110: a (50) + spin (40 + 1) fit; wide does not.
        let roomy = compute_arrangement(&bar, 150.0);
        assert_eq!(roomy.tier, Tier::Triaged);
        assert_eq!(
            roomy.slots,
            vec![
                Slot::Inline { item: "a".into() },
                Slot::CollapsedGroup {
                    item: "spin".into(),
                    children: vec!["x".into(), "y".into()],
                },
                Slot::Overflow {
                    item: "more".into(),
                    children: vec!["wide".into()],
                },
            ]
        );

        // Reserved 80: only a fits, the spinner's leaves overflow after wide.
        let tight = compute_arrangement(&bar, 120.0);
        assert_eq!(ids(&tight.inline()), ["a"]);
        assert_eq!(overflow_ids(&tight), ["wide", "x", "y"]);
    }

    #[test]
    fn placements_flatten_dropdowns() {
        let arrangement = compute_arrangement(&one_group(), 95.0);
        let kinds: Vec<_> = arrangement
            .placements()
            .into_iter()
            .map(|p| (p.item.to_string(), p.display))
            .collect();
        assert_eq!(
            kinds,
            [
                ("title".to_string(), DisplayKind::Inline),
                ("group1".to_string(), DisplayKind::CollapsedGroup),
                ("a".to_string(), DisplayKind::WithinGroup),
                ("b".to_string(), DisplayKind::WithinGroup),
            ]
        );
    }

    #[test]
    fn arrangement_serializes_with_tagged_slots() {
        let arrangement = compute_arrangement(&one_group(), 95.0);
        let json = serde_json::to_value(&arrangement).unwrap();
        assert_eq!(json["tier"], "grouped");
        assert_eq!(json["slots"][1]["slot"], "collapsed_group");
        assert_eq!(json["slots"][1]["children"][0], "a");
    }
}
