// ABOUTME: Pure derivation of the category-grouped shopping list view and progress
// ABOUTME: Recomputed from the flat list on every read, never cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use plateit_core::models::{IngredientCategory, ShoppingListEntry};
use serde::Serialize;

/// A displayed row: the entry plus its position in the flat list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedEntry {
    /// Index of this entry in the flat list at derivation time
    pub original_index: usize,
    /// The entry itself
    #[serde(flatten)]
    pub entry: ShoppingListEntry,
}

/// All entries of one category, in flat-list order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Category of every entry in `items`
    pub category: IngredientCategory,
    /// Entries in flat-list order
    pub items: Vec<GroupedEntry>,
}

/// The flat list partitioned into the five fixed categories
///
/// Groups always appear in the order Produce, Meat, Dairy, Pantry, Other,
/// and all five are present even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedShoppingList {
    groups: Vec<CategoryGroup>,
}

impl GroupedShoppingList {
    /// Entries for one category
    #[must_use]
    pub fn get(&self, category: IngredientCategory) -> &[GroupedEntry] {
        self.groups
            .get(category.display_rank())
            .map_or(&[], |group| group.items.as_slice())
    }

    /// Every group, empty ones included, in display order
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Only the groups that have something to render
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().filter(|group| !group.items.is_empty())
    }

    /// Total entries across all groups
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

/// Partition a flat list into category groups
///
/// Every entry lands in exactly one group. Entries whose category was
/// missing or unrecognized when parsed are already `Other` and are grouped
/// there.
#[must_use]
pub fn group_by_category(entries: &[ShoppingListEntry]) -> GroupedShoppingList {
    let mut groups: Vec<CategoryGroup> = IngredientCategory::DISPLAY_ORDER
        .iter()
        .map(|&category| CategoryGroup {
            category,
            items: Vec::new(),
        })
        .collect();

    for (original_index, entry) in entries.iter().enumerate() {
        // DISPLAY_ORDER covers every variant, so the rank is always in bounds
        if let Some(group) = groups.get_mut(entry.category.display_rank()) {
            group.items.push(GroupedEntry {
                original_index,
                entry: entry.clone(),
            });
        }
    }

    GroupedShoppingList { groups }
}

/// Percentage of checked entries, 0 for an empty list
#[must_use]
pub fn progress_percent(total: usize, checked: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (checked.min(total) as f64 / total as f64) * 100.0
}

/// Everything the shopping list view needs, derived in one pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListSummary {
    /// Number of entries
    pub total: usize,
    /// Number of checked entries
    pub checked: usize,
    /// Number of entries still to buy
    pub unchecked: usize,
    /// Checked percentage in [0, 100]
    pub progress: f64,
    /// Category groups in display order
    pub groups: GroupedShoppingList,
}

impl ShoppingListSummary {
    /// Derive the summary for a flat list
    #[must_use]
    pub fn derive(entries: &[ShoppingListEntry]) -> Self {
        let total = entries.len();
        let checked = entries.iter().filter(|entry| entry.checked).count();
        Self {
            total,
            checked,
            unchecked: total - checked,
            progress: progress_percent(total, checked),
            groups: group_by_category(entries),
        }
    }
}
