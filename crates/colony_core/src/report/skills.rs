use serde::Serialize;

use crate::person::{Person, Skill, SkillName};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub name: String,
    /// One cell per skill in [`SkillName::ALL`] order; `None` when the save
    /// has no entry for that skill.
    pub cells: Vec<Option<Skill>>,
    pub mood: Option<f64>,
    pub captivity_resistance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillsReport {
    pub rows: Vec<SkillRow>,
}

pub fn build_skills(persons: &[Person]) -> SkillsReport {
    let rows = persons
        .iter()
        .map(|person| SkillRow {
            name: person.name.clone(),
            cells: SkillName::ALL
                .iter()
                .map(|skill| person.skills.get(skill).cloned())
                .collect(),
            mood: person.mood,
            captivity_resistance: person.captivity_resistance,
        })
        .collect();
    SkillsReport { rows }
}
