use serde::Serialize;

use crate::person::person_name;
use crate::record::Record;
use crate::spatial::{Position, record_position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadPawn {
    pub name: String,
    pub kind: Option<String>,
    pub faction: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadPawnsReport {
    pub pawns: Vec<DeadPawn>,
}

/// Lists the humans held by corpse records, placed where the corpse lies.
pub fn build_dead_pawns(corpses: &[Record<'_, '_>]) -> DeadPawnsReport {
    let pawns = corpses
        .iter()
        .flat_map(|corpse| {
            let position = record_position(corpse);
            corpse
                .list(&["innerContainer", "innerList"])
                .into_iter()
                .map(move |inner| DeadPawn {
                    name: person_name(&inner),
                    kind: inner.resolve(&["kindDef"]).map(str::to_string),
                    faction: inner
                        .resolve(&["faction"])
                        .filter(|f| *f != "null")
                        .map(str::to_string),
                    position,
                })
        })
        .collect();
    DeadPawnsReport { pawns }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    #[test]
    fn corpses_list_their_pawn() {
        let xml = r#"
<things>
  <thing Class="Corpse"><pos>(40, 0, 41)</pos><innerContainer><innerList>
    <li Class="Pawn"><def>Human</def><kindDef>Pirate</kindDef><faction>Faction_12</faction><name><first>Rex</first><nick>Fang</nick></name></li>
  </innerList></innerContainer></thing>
</things>"#;
        let doc = Document::parse(xml).expect("fixture xml should parse");
        let corpses = Record::new(doc.root_element()).descendants("thing");
        let report = build_dead_pawns(&corpses);

        assert_eq!(
            report.pawns,
            vec![DeadPawn {
                name: "Fang".into(),
                kind: Some("Pirate".into()),
                faction: Some("Faction_12".into()),
                position: Some(Position::new(40, 41)),
            }]
        );
    }
}
