use super::Category;
use crate::rules::{Pattern, Rule};

/// How the leading part of a def name decides category and base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameSplit {
    /// Any meat collapses to a single "Meat" line.
    Meat,
    /// Raw food: drop a leading `Raw`.
    RawFood,
    /// `Category_Name`, split once on the first underscore.
    Underscore,
}

#[rustfmt::skip]
pub(crate) const NAME_RULES: &[Rule<NameSplit>] = &[
    Rule::new(Pattern::Prefix("Meat_"), NameSplit::Meat),
    Rule::new(Pattern::Prefix("Raw"),   NameSplit::RawFood),
    Rule::new(Pattern::Prefix("Egg"),   NameSplit::RawFood),
    Rule::new(Pattern::Contains("_"),   NameSplit::Underscore),
];

/// Base-name prefixes that carry their own category (`MealFine`, `BlocksGranite`).
#[rustfmt::skip]
pub(crate) const TRUNCATED_PREFIXES: &[(&str, Category)] = &[
    ("Blocks",     Category::Blocks),
    ("Grenade",    Category::Grenade),
    ("Meal",       Category::Meal),
    ("Medicine",   Category::Medicine),
    ("Unfinished", Category::Unfinished),
    ("Wool",       Category::Wool),
];

/// Base names forced into a category after prefix truncation.
#[rustfmt::skip]
pub(crate) const FORCED_CATEGORIES: &[(&str, Category)] = &[
    // Ores and refined metals
    ("Steel",               Category::Ores),
    ("Plasteel",            Category::Ores),
    ("Gold",                Category::Ores),
    ("Silver",              Category::Ores),
    ("Uranium",             Category::Ores),
    ("Jade",                Category::Ores),

    // Drugs
    ("Beer",                Category::Drugs),
    ("SmokeleafJoint",      Category::Drugs),
    ("PsychiteTea",         Category::Drugs),
    ("Yayo",                Category::Drugs),
    ("Flake",               Category::Drugs),
    ("GoJuice",             Category::Drugs),
    ("WakeUp",              Category::Drugs),
    ("Penoxycyline",        Category::Drugs),
    ("Luciferium",          Category::Drugs),
    ("Ambrosia",            Category::Drugs),

    // Medicine inputs
    ("Neutroamine",         Category::Medicine),

    // Textiles count as wool
    ("Cloth",               Category::Wool),
    ("Synthread",           Category::Wool),
    ("DevilstrandCloth",    Category::Wool),
    ("Hyperweave",          Category::Wool),

    // Food that is neither raw nor a meal by name
    ("Milk",                Category::RawFood),
    ("InsectJelly",         Category::RawFood),
    ("Hay",                 Category::RawFood),
    ("Pemmican",            Category::Meal),
    ("Kibble",              Category::Meal),
];

/// Material aliases shown in qualifiers.
#[rustfmt::skip]
const MATERIAL_ALIASES: &[(&str, &str)] = &[
    ("WoodLog", "Wood"),
];

const BLOCKS_PREFIX: &str = "Blocks";

pub(crate) fn truncated_prefix(base_name: &str) -> Option<(&'static str, Category)> {
    TRUNCATED_PREFIXES
        .iter()
        .find(|(prefix, _)| base_name.starts_with(prefix) && base_name.len() > prefix.len())
        .map(|(prefix, category)| (*prefix, category.clone()))
}

pub(crate) fn forced_category(base_name: &str) -> Option<Category> {
    FORCED_CATEGORIES
        .iter()
        .find(|(name, _)| *name == base_name)
        .map(|(_, category)| category.clone())
}

/// Normalizes a `stuff` def for display: aliases, and stone blocks show only the stone.
pub fn normalize_material(raw: &str) -> String {
    if let Some((_, alias)) = MATERIAL_ALIASES.iter().find(|(from, _)| *from == raw) {
        return (*alias).to_string();
    }
    match raw.strip_prefix(BLOCKS_PREFIX) {
        Some(stone) if !stone.is_empty() => stone.to_string(),
        _ => raw.to_string(),
    }
}
