use std::collections::BTreeSet;

use serde::Serialize;

use crate::person::{Injury, Person};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjuryRow {
    pub name: String,
    pub permanent: Vec<Injury>,
    pub temporary: Vec<Injury>,
    pub worst: Option<Injury>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InjuriesReport {
    pub rows: Vec<InjuryRow>,
    /// Body-part indices the part table has no name for, across everyone.
    pub unmapped_parts: BTreeSet<String>,
}

/// Persons with at least one recorded injury or condition.
pub fn build_injuries(persons: &[Person]) -> InjuriesReport {
    let mut report = InjuriesReport::default();
    for person in persons {
        report
            .unmapped_parts
            .extend(person.missing_body_parts.iter().cloned());
        if person.permanent_injuries.is_empty() && person.temporary_injuries.is_empty() {
            continue;
        }
        report.rows.push(InjuryRow {
            name: person.name.clone(),
            permanent: person.permanent_injuries.clone(),
            temporary: person.temporary_injuries.clone(),
            worst: person.worst_injury().cloned(),
        });
    }
    if !report.unmapped_parts.is_empty() {
        tracing::info!(parts = ?report.unmapped_parts, "unmapped body part indices");
    }
    report
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn injury(label: &str, severity: f64) -> Injury {
        Injury {
            label: label.to_string(),
            severity,
        }
    }

    fn person(name: &str, temporary: Vec<Injury>, unmapped: &[&str]) -> Person {
        Person {
            name: name.to_string(),
            skills: BTreeMap::new(),
            permanent_injuries: Vec::new(),
            temporary_injuries: temporary,
            missing_body_parts: unmapped.iter().map(|s| s.to_string()).collect(),
            mood: None,
            captivity_resistance: None,
            equipment: BTreeMap::new(),
        }
    }

    #[test]
    fn healthy_persons_are_omitted_but_unmapped_parts_collected() {
        let persons = vec![
            person("Ace", vec![injury("Cut", 2.0), injury("Burn", 7.0)], &[]),
            person("Bea", Vec::new(), &["61"]),
        ];
        let report = build_injuries(&persons);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].name, "Ace");
        assert_eq!(report.rows[0].worst, Some(injury("Burn", 7.0)));
        assert_eq!(report.unmapped_parts.iter().collect::<Vec<_>>(), vec!["61"]);
    }
}
