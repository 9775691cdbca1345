use std::collections::BTreeMap;

use serde::Serialize;

use crate::item::MaxHealthRegistry;
use crate::person::{Person, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadoutRow {
    pub name: String,
    pub slots: BTreeMap<Slot, String>,
    pub armor_level: i32,
    pub combat_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentReport {
    pub rows: Vec<LoadoutRow>,
}

/// One loadout row per person, slot contents as display names.
pub fn build_equipment(persons: &[Person], registry: &MaxHealthRegistry) -> EquipmentReport {
    let rows = persons
        .iter()
        .map(|person| LoadoutRow {
            name: person.name.clone(),
            slots: person
                .equipment
                .iter()
                .map(|(slot, item)| (*slot, item.display_name(registry)))
                .collect(),
            armor_level: person.armor_level(),
            combat_info: person.combat_info(),
        })
        .collect();
    EquipmentReport { rows }
}
