mod catalog;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::record::Record;
use crate::rules::first_match;
use crate::spatial::{Position, record_position};

use catalog::NameSplit;
pub use catalog::normalize_material;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    RawFood,
    Meal,
    Drugs,
    Medicine,
    Ores,
    Wool,
    Blocks,
    Grenade,
    Apparel,
    Gun,
    MeleeWeapon,
    Unfinished,
    Tainted,
    Misc,
    Other(String),
}

impl Category {
    /// Maps the category half of a `Category_Name` def.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Raw Food" => Self::RawFood,
            "Meal" => Self::Meal,
            "Drugs" => Self::Drugs,
            "Medicine" => Self::Medicine,
            "Ores" => Self::Ores,
            "Wool" => Self::Wool,
            "Blocks" => Self::Blocks,
            "Grenade" => Self::Grenade,
            "Apparel" => Self::Apparel,
            "Gun" => Self::Gun,
            "MeleeWeapon" => Self::MeleeWeapon,
            "Unfinished" => Self::Unfinished,
            "Tainted" => Self::Tainted,
            "Misc" => Self::Misc,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::RawFood => "Raw Food",
            Self::Meal => "Meal",
            Self::Drugs => "Drugs",
            Self::Medicine => "Medicine",
            Self::Ores => "Ores",
            Self::Wool => "Wool",
            Self::Blocks => "Blocks",
            Self::Grenade => "Grenade",
            Self::Apparel => "Apparel",
            Self::Gun => "Gun",
            Self::MeleeWeapon => "MeleeWeapon",
            Self::Unfinished => "Unfinished",
            Self::Tainted => "Tainted",
            Self::Misc => "Misc",
            Self::Other(name) => name,
        }
    }

    /// Categories whose items carry material, quality and a tracked condition.
    pub fn bears_quality(&self) -> bool {
        matches!(
            self,
            Self::Apparel | Self::Gun | Self::MeleeWeapon | Self::Misc
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub category: Category,
    pub base_name: String,
    pub material: Option<String>,
    pub quality: Option<String>,
    pub qualifiers: Vec<String>,
    pub health: i32,
    pub biocoded: bool,
    pub tainted: bool,
    pub position: Option<Position>,
    pub count: i32,
}

impl Item {
    /// Grouping key shared by inventory rows and the max-health registry.
    pub fn display_key(&self) -> String {
        match &self.material {
            Some(material) => format!("{material} {}", self.base_name),
            None => self.base_name.clone(),
        }
    }

    /// Health as a percentage of the best exemplar seen this run.
    pub fn condition_percent(&self, registry: &MaxHealthRegistry) -> Option<i32> {
        if self.health <= 0 {
            return None;
        }
        let max = registry
            .max_for(&self.display_key())
            .filter(|max| *max > 0)?;
        i32::try_from(i64::from(self.health) * 100 / i64::from(max)).ok()
    }

    pub fn display_name(&self, registry: &MaxHealthRegistry) -> String {
        if self.qualifiers.is_empty() {
            return self.base_name.clone();
        }
        let mut inner = self.qualifiers.join(", ");
        if let Some(percent) = self.condition_percent(registry) {
            inner.push_str(&format!(" {percent}%"));
        }
        format!("{} ({inner})", self.base_name)
    }
}

/// Highest exact-multiple-of-5 health seen per display key during one run.
///
/// Damaged items report arbitrary values, so only multiples of 5 are
/// trusted as a cap. Values only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaxHealthRegistry {
    maxima: BTreeMap<String, i32>,
}

impl MaxHealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: &str, health: i32) {
        if health % 5 != 0 {
            return;
        }
        self.maxima
            .entry(key.to_string())
            .and_modify(|max| *max = (*max).max(health))
            .or_insert(health);
    }

    pub fn max_for(&self, key: &str) -> Option<i32> {
        self.maxima.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.maxima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty()
    }
}

/// Splits a def name into category and base name, before any overrides.
fn split_def(def: &str) -> (Category, String) {
    match first_match(catalog::NAME_RULES, def) {
        Some(NameSplit::Meat) => (Category::RawFood, "Meat".to_string()),
        Some(NameSplit::RawFood) => (
            Category::RawFood,
            def.strip_prefix("Raw").unwrap_or(def).to_string(),
        ),
        Some(NameSplit::Underscore) => match def.split_once('_') {
            Some((category, name)) => (Category::from_name(category), name.to_string()),
            None => (Category::Misc, def.to_string()),
        },
        None => (Category::Misc, def.to_string()),
    }
}

/// Category and base name for a def, honouring truncation, the forced
/// table, and the corpse override.
pub fn categorize(def: &str, tainted: bool) -> (Category, String) {
    let (mut category, mut base_name) = split_def(def);

    if let Some((prefix, truncated)) = catalog::truncated_prefix(&base_name) {
        category = truncated;
        base_name = base_name[prefix.len()..].to_string();
    }
    if let Some(forced) = catalog::forced_category(&base_name) {
        category = forced;
    }
    if tainted {
        category = Category::Tainted;
    }
    (category, base_name)
}

fn stack_count(record: &Record<'_, '_>) -> i32 {
    match record.resolve(&["stackCount"]) {
        None => 1,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(raw, record = ?record, "unparseable stack count");
            0
        }),
    }
}

/// Classifies one storable record, recording its health in `registry`
/// when the category tracks condition.
pub fn classify(record: &Record<'_, '_>, registry: &mut MaxHealthRegistry) -> Item {
    let def = record.get_or(&["def"], "");
    let tainted = record.flag(&["wornByCorpse"]);
    let (category, mut base_name) = categorize(def, tainted);

    let mut qualifiers = Vec::new();
    if category == Category::Unfinished {
        if let Some(recipe) = record.resolve(&["recipe"]) {
            base_name = recipe.rsplit('_').next().unwrap_or(recipe).to_string();
        }
        if let Some(creator) = record.resolve(&["creatorName"]) {
            qualifiers.push(creator.to_string());
        }
    }

    let mut material = None;
    let mut quality = None;
    if category.bears_quality() {
        material = record.resolve(&["stuff"]).map(normalize_material);
        quality = record.resolve(&["quality"]).map(str::to_string);
        qualifiers.extend(material.iter().cloned());
        qualifiers.extend(quality.iter().cloned());
    }

    let item = Item {
        category,
        base_name,
        material,
        quality,
        qualifiers,
        health: record.parse(&["health"]).unwrap_or(0),
        biocoded: record.flag(&["biocoded"]),
        tainted,
        position: record_position(record),
        count: stack_count(record),
    };

    if item.category.bears_quality() {
        registry.observe(&item.display_key(), item.health);
    }
    item
}
