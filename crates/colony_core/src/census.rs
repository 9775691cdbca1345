use crate::person::{HUMAN_DEF, is_person};
use crate::record::Record;

pub const THING_TAG: &str = "thing";
pub const HYDROPONICS_DEF: &str = "HydroponicsBasin";

const STORABLE_CLASSES: &[&str] = &[
    "Thing",
    "ThingWithComps",
    "Medicine",
    "Apparel",
    "UnfinishedThing",
    "Book",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThingKind {
    Storable,
    Minified,
    Person,
    Animal,
    Wildlife,
    Plant,
    Hydroponics,
    Workbench,
    Corpse,
    Other,
}

fn is_human_corpse(record: &Record<'_, '_>) -> bool {
    record
        .list(&["innerContainer", "innerList"])
        .iter()
        .any(|inner| inner.resolve(&["def"]) == Some(HUMAN_DEF))
}

// Unowned references are written as the literal `null`.
fn has_faction(record: &Record<'_, '_>) -> bool {
    record
        .resolve(&["faction"])
        .is_some_and(|faction| faction != "null")
}

pub fn kind_of(record: &Record<'_, '_>) -> ThingKind {
    let class = record.class().unwrap_or("");
    match class {
        "Pawn" if is_person(record) => ThingKind::Person,
        "Pawn" if record.resolve(&["def"]) == Some(HUMAN_DEF) => ThingKind::Other,
        "Pawn" if has_faction(record) => ThingKind::Animal,
        "Pawn" => ThingKind::Wildlife,
        "Plant" => ThingKind::Plant,
        "MinifiedThing" => ThingKind::Minified,
        "Corpse" if is_human_corpse(record) => ThingKind::Corpse,
        _ if STORABLE_CLASSES.contains(&class) => ThingKind::Storable,
        _ if class.starts_with("Building") => {
            if record.resolve(&["def"]) == Some(HYDROPONICS_DEF) {
                ThingKind::Hydroponics
            } else if record.child("billStack").is_some() {
                ThingKind::Workbench
            } else {
                ThingKind::Other
            }
        }
        _ => ThingKind::Other,
    }
}

/// Map things grouped by kind, in document order.
#[derive(Debug, Default)]
pub struct Census<'a, 'input> {
    pub all: Vec<Record<'a, 'input>>,
    pub storables: Vec<Record<'a, 'input>>,
    pub minified: Vec<Record<'a, 'input>>,
    pub persons: Vec<Record<'a, 'input>>,
    pub animals: Vec<Record<'a, 'input>>,
    pub wildlife: Vec<Record<'a, 'input>>,
    pub plants: Vec<Record<'a, 'input>>,
    pub basins: Vec<Record<'a, 'input>>,
    pub workbenches: Vec<Record<'a, 'input>>,
    pub corpses: Vec<Record<'a, 'input>>,
}

impl<'a, 'input> Census<'a, 'input> {
    pub fn take(root: Record<'a, 'input>) -> Self {
        let mut census = Self::default();
        for thing in root.descendants(THING_TAG) {
            census.all.push(thing);
            let bucket = match kind_of(&thing) {
                ThingKind::Storable => &mut census.storables,
                ThingKind::Minified => &mut census.minified,
                ThingKind::Person => &mut census.persons,
                ThingKind::Animal => &mut census.animals,
                ThingKind::Wildlife => &mut census.wildlife,
                ThingKind::Plant => &mut census.plants,
                ThingKind::Hydroponics => &mut census.basins,
                ThingKind::Workbench => &mut census.workbenches,
                ThingKind::Corpse => &mut census.corpses,
                ThingKind::Other => continue,
            };
            bucket.push(thing);
        }
        tracing::debug!(
            things = census.all.len(),
            storables = census.storables.len(),
            persons = census.persons.len(),
            plants = census.plants.len(),
            "indexed save"
        );
        census
    }
}
