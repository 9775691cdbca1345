use std::collections::BTreeMap;

use serde::Serialize;

use crate::item::{Category, Item, MaxHealthRegistry};
use crate::spatial::ExclusionZone;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryOptions {
    /// Count loot still inside unopened ancient vaults.
    pub include_sealed: bool,
    /// Count biocoded gear, which cannot be traded.
    pub include_biocoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub name: String,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub rows: Vec<CountRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub groups: Vec<CategoryGroup>,
    pub sealed_skipped: i32,
    pub biocoded_skipped: i32,
}

impl InventoryReport {
    pub fn total(&self) -> i32 {
        self.groups
            .iter()
            .flat_map(|group| group.rows.iter())
            .map(|row| row.count)
            .sum()
    }

    pub fn count_of(&self, category: &Category, name: &str) -> Option<i32> {
        self.groups
            .iter()
            .find(|group| &group.category == category)?
            .rows
            .iter()
            .find(|row| row.name == name)
            .map(|row| row.count)
    }
}

/// Groups items by category then display name, summing stack counts.
pub fn build_inventory(
    items: &[Item],
    zone: &ExclusionZone,
    registry: &MaxHealthRegistry,
    options: InventoryOptions,
) -> InventoryReport {
    let mut grouped: BTreeMap<Category, BTreeMap<String, i32>> = BTreeMap::new();
    let mut report = InventoryReport::default();

    for item in items {
        let sealed = item.position.is_some_and(|pos| zone.contains(pos));
        if sealed && !options.include_sealed {
            report.sealed_skipped += item.count;
            continue;
        }
        if item.biocoded && !options.include_biocoded {
            report.biocoded_skipped += item.count;
            continue;
        }
        *grouped
            .entry(item.category.clone())
            .or_default()
            .entry(item.display_name(registry))
            .or_default() += item.count;
    }

    report.groups = grouped
        .into_iter()
        .map(|(category, rows)| CategoryGroup {
            category,
            rows: rows
                .into_iter()
                .map(|(name, count)| CountRow { name, count })
                .collect(),
        })
        .collect();
    report
}
