mod equipment;
mod injuries;
mod skills;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::item::{Item, MaxHealthRegistry};
use crate::record::Record;
use crate::snapshot::SnapshotStore;

pub use equipment::{Slot, apparel_slot, armor_points, combat_info, is_ranged, load_equipment};
pub use injuries::{Condition, Injury, body_part_name, classify_condition};
pub use skills::{
    Passion, Skill, SkillLevel, SkillName, baseline_levels, load_skills, xp_threshold,
};

pub(crate) const HUMAN_DEF: &str = "Human";
const COLONIST_KIND: &str = "Colonist";
const PRISONER_STATUS: &str = "Prisoner";
const MOOD_NEED: &str = "Need_Mood";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub name: String,
    pub skills: BTreeMap<SkillName, Skill>,
    pub permanent_injuries: Vec<Injury>,
    pub temporary_injuries: Vec<Injury>,
    pub missing_body_parts: BTreeSet<String>,
    pub mood: Option<f64>,
    pub captivity_resistance: Option<f64>,
    pub equipment: BTreeMap<Slot, Item>,
}

impl Person {
    pub fn armor_level(&self) -> i32 {
        self.equipment.values().map(armor_points).sum()
    }

    pub fn combat_info(&self) -> String {
        combat_info(&self.skills, self.equipment.get(&Slot::Weapon))
    }

    /// The most severe temporary injury, if any.
    pub fn worst_injury(&self) -> Option<&Injury> {
        self.temporary_injuries
            .iter()
            .max_by(|a, b| a.severity.total_cmp(&b.severity))
    }

    pub fn temporary_injury_count(&self) -> usize {
        self.temporary_injuries.len()
    }

    pub fn is_prisoner(&self) -> bool {
        self.captivity_resistance.is_some()
    }
}

fn is_prisoner_record(record: &Record<'_, '_>) -> bool {
    record.resolve(&["guest", "guestStatus"]) == Some(PRISONER_STATUS)
}

/// A human pawn that is one of ours or held captive.
pub fn is_person(record: &Record<'_, '_>) -> bool {
    record.class() == Some("Pawn")
        && record.resolve(&["def"]) == Some(HUMAN_DEF)
        && (record.resolve(&["kindDef"]) == Some(COLONIST_KIND) || is_prisoner_record(record))
}

pub fn person_name(record: &Record<'_, '_>) -> String {
    record
        .resolve(&["name", "nick"])
        .or_else(|| record.resolve(&["name", "first"]))
        .or_else(|| record.resolve(&["id"]))
        .unwrap_or("Unnamed")
        .to_string()
}

fn mood_level(record: &Record<'_, '_>) -> Option<f64> {
    let needs = record.list(&["needs", "needs"]);
    let mood = needs
        .iter()
        .find(|need| need.class() == Some(MOOD_NEED) || need.resolve(&["def"]) == Some("Mood"))
        .or_else(|| needs.first())?;
    mood.parse(&["curLevel"])
}

pub fn load_person(
    record: &Record<'_, '_>,
    registry: &mut MaxHealthRegistry,
    store: &dyn SnapshotStore,
) -> Person {
    let name = person_name(record);
    let prior = store.load(&name);
    let skills = load_skills(record, &name, prior.as_deref());

    let mut permanent_injuries = Vec::new();
    let mut temporary_injuries = Vec::new();
    let mut missing_body_parts = BTreeSet::new();
    for hediff in record.list(&["healthTracker", "hediffSet", "hediffs"]) {
        match classify_condition(&hediff) {
            Condition::Excluded => {}
            Condition::Permanent {
                injury,
                unmapped_part,
            } => {
                missing_body_parts.extend(unmapped_part);
                permanent_injuries.push(injury);
            }
            Condition::Temporary(injury) => temporary_injuries.push(injury),
        }
    }

    let (mood, captivity_resistance) = if is_prisoner_record(record) {
        (None, Some(record.parse(&["guest", "resistance"]).unwrap_or(0.0)))
    } else {
        (mood_level(record), None)
    };

    Person {
        name,
        skills,
        permanent_injuries,
        temporary_injuries,
        missing_body_parts,
        mood,
        captivity_resistance,
        equipment: load_equipment(record, registry),
    }
}

/// Loads every person against the baselines as they stood before the pass,
/// then stores the new levels. Two persons sharing a name never see each
/// other's levels as a baseline; the later one's levels are the ones kept.
pub fn load_persons(
    records: &[Record<'_, '_>],
    registry: &mut MaxHealthRegistry,
    store: &mut dyn SnapshotStore,
) -> Vec<Person> {
    let persons: Vec<Person> = records
        .iter()
        .map(|record| load_person(record, registry, &*store))
        .collect();
    for person in &persons {
        store.save(&person.name, baseline_levels(&person.skills));
    }
    persons
}
