use serde::Serialize;

use crate::person::{Person, SkillName};

pub const DEFAULT_TOP: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRanking {
    pub skill: SkillName,
    pub entries: Vec<RankEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingReport {
    pub skills: Vec<SkillRanking>,
}

/// Best `top` persons per skill by level plus progress toward the next
/// level. Ties keep input order; incapable persons are left out.
pub fn build_ranking(persons: &[Person], top: usize) -> RankingReport {
    let skills = SkillName::ALL
        .iter()
        .map(|&skill| {
            let mut entries: Vec<RankEntry> = persons
                .iter()
                .filter_map(|person| {
                    let score = person.skills.get(&skill)?.score()?;
                    Some(RankEntry {
                        name: person.name.clone(),
                        score,
                    })
                })
                .collect();
            entries.sort_by(|a, b| b.score.total_cmp(&a.score));
            entries.truncate(top);
            SkillRanking { skill, entries }
        })
        .collect();
    RankingReport { skills }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::person::{Passion, Skill, SkillLevel};

    fn person(name: &str, cooking: SkillLevel, xp_fraction: f64) -> Person {
        let skill = Skill {
            name: SkillName::Cooking,
            level: cooking,
            passion: Passion::None,
            xp_fraction,
            delta: None,
        };
        Person {
            name: name.to_string(),
            skills: BTreeMap::from([(SkillName::Cooking, skill)]),
            permanent_injuries: Vec::new(),
            temporary_injuries: Vec::new(),
            missing_body_parts: BTreeSet::new(),
            mood: None,
            captivity_resistance: None,
            equipment: BTreeMap::new(),
        }
    }

    fn cooking(report: &RankingReport) -> Vec<&str> {
        report
            .skills
            .iter()
            .find(|ranking| ranking.skill == SkillName::Cooking)
            .map(|ranking| ranking.entries.iter().map(|e| e.name.as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn ranks_by_level_plus_progress() {
        let persons = vec![
            person("Ace", SkillLevel::Level(8), 0.9),
            person("Bea", SkillLevel::Level(9), 0.1),
            person("Cal", SkillLevel::Level(8), 0.2),
        ];
        let report = build_ranking(&persons, 2);
        assert_eq!(cooking(&report), vec!["Bea", "Ace"]);
        assert_eq!(report.skills.len(), SkillName::ALL.len());
    }

    #[test]
    fn ties_keep_input_order_and_incapable_is_skipped() {
        let persons = vec![
            person("Ace", SkillLevel::Level(5), 0.5),
            person("Bea", SkillLevel::Incapable, 0.0),
            person("Cal", SkillLevel::Level(5), 0.5),
        ];
        let report = build_ranking(&persons, DEFAULT_TOP);
        assert_eq!(cooking(&report), vec!["Ace", "Cal"]);
    }
}
