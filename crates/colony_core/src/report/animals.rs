use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeciesRow {
    pub species: String,
    pub count: usize,
    /// Given names, for tamed animals only.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpeciesReport {
    pub rows: Vec<SpeciesRow>,
}

impl SpeciesReport {
    pub fn get(&self, species: &str) -> Option<&SpeciesRow> {
        self.rows.iter().find(|row| row.species == species)
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }
}

fn animal_name<'a>(record: &Record<'a, '_>) -> Option<&'a str> {
    record
        .resolve(&["name", "name"])
        .or_else(|| record.resolve(&["name", "nick"]))
}

/// Counts pawns per species, collecting given names when `with_names` is set.
pub fn build_species(pawns: &[Record<'_, '_>], with_names: bool) -> SpeciesReport {
    let mut grouped: BTreeMap<&str, SpeciesRow> = BTreeMap::new();
    for pawn in pawns {
        let species = pawn.get_or(&["def"], "Unknown");
        let row = grouped.entry(species).or_insert_with(|| SpeciesRow {
            species: species.to_string(),
            ..SpeciesRow::default()
        });
        row.count += 1;
        if with_names {
            if let Some(name) = animal_name(pawn) {
                row.names.push(name.to_string());
            }
        }
    }

    let mut rows: Vec<SpeciesRow> = grouped.into_values().collect();
    for row in &mut rows {
        row.names.sort();
    }
    SpeciesReport { rows }
}
