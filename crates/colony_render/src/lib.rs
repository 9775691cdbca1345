use std::fmt::Write as _;

use colony_core::core_api::{Report, ReportKind};
use colony_core::person::{Injury, Skill, SkillName, Slot};
use colony_core::report::{
    DeadPawnsReport, EquipmentReport, HarvestReport, InjuriesReport, InventoryReport, Location,
    QueueReport, QueueRow, RankingReport, SkillsReport, SpeciesReport,
};
use colony_core::spatial::Position;
use serde_json::{Map as JsonMap, Value as JsonValue};

const CELL_WIDTH: usize = 26;
const NAME_WIDTH: usize = 14;
const SKILL_WIDTH: usize = 9;
const RANK_LABEL_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderOptions {
    pub verbose: bool,
    /// Cells per line for list-style reports.
    pub columns: usize,
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            columns: 3,
        }
    }
}

pub fn render_text(report: &Report, options: TextRenderOptions) -> String {
    let mut out = String::new();
    writeln!(&mut out, " ::: {} :::", title(report.kind()))
        .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    match report {
        Report::Inventory(inventory) => write_inventory(&mut out, inventory, options),
        Report::Equipment(equipment) => write_equipment(&mut out, equipment, options),
        Report::Skills(skills) => write_skills(&mut out, skills),
        Report::Animals(species) | Report::Wildlife(species) => {
            write_species(&mut out, species, options)
        }
        Report::Harvest(harvest) => write_harvest(&mut out, harvest, options),
        Report::Injuries(injuries) => write_injuries(&mut out, injuries, options),
        Report::ProductionQueue(queue) => write_queue(&mut out, queue, options),
        Report::TopSkills(ranking) => write_ranking(&mut out, ranking),
        Report::DeadPawns(dead) => write_dead_pawns(&mut out, dead),
    }
    out
}

pub fn render_json(report: &Report) -> JsonValue {
    let data = match report {
        Report::Inventory(inventory) => inventory_to_json(inventory),
        Report::Equipment(equipment) => equipment_to_json(equipment),
        Report::Skills(skills) => skills_to_json(skills),
        Report::Animals(species) | Report::Wildlife(species) => species_to_json(species),
        Report::Harvest(harvest) => harvest_to_json(harvest),
        Report::Injuries(injuries) => injuries_to_json(injuries),
        Report::ProductionQueue(queue) => queue_to_json(queue),
        Report::TopSkills(ranking) => ranking_to_json(ranking),
        Report::DeadPawns(dead) => dead_pawns_to_json(dead),
    };
    let mut m = JsonMap::new();
    m.insert(
        "report".to_string(),
        JsonValue::String(report.kind().as_str().to_string()),
    );
    m.insert("data".to_string(), data);
    JsonValue::Object(m)
}

/// Level, passion marker and bracketed delta: `8++[+2]`, `--`.
pub fn skill_cell(skill: &Skill) -> String {
    let mut cell = format!("{}{}", skill.level, skill.passion.marker());
    if let Some(delta) = skill.delta {
        write!(&mut cell, "[{delta:+}]").expect("writing to String cannot fail");
    }
    cell
}

fn title(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Inventory => "Inventory",
        ReportKind::Equipment => "Equipment",
        ReportKind::Skills => "Skills",
        ReportKind::Animals => "Animals",
        ReportKind::Wildlife => "Wildlife",
        ReportKind::Harvest => "Harvest",
        ReportKind::Injuries => "Injuries",
        ReportKind::ProductionQueue => "Production Queue",
        ReportKind::TopSkills => "Top Skills",
        ReportKind::DeadPawns => "Dead Pawns",
    }
}

fn skill_abbreviation(skill: SkillName) -> &'static str {
    match skill {
        SkillName::Shooting => "Shoot",
        SkillName::Melee => "Melee",
        SkillName::Construction => "Const",
        SkillName::Mining => "Mine",
        SkillName::Cooking => "Cook",
        SkillName::Plants => "Plant",
        SkillName::Animals => "Anim",
        SkillName::Crafting => "Craft",
        SkillName::Artistic => "Art",
        SkillName::Medicine => "Med",
        SkillName::Social => "Social",
        SkillName::Intellectual => "Intel",
    }
}

fn write_cells(out: &mut String, cells: &[String], options: TextRenderOptions) {
    if cells.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
        return;
    }
    for chunk in cells.chunks(options.columns.max(1)) {
        let mut line = String::from("  ");
        for cell in chunk {
            write!(
                &mut line,
                "{:<w$}",
                fit_column(cell, CELL_WIDTH - 1),
                w = CELL_WIDTH
            )
            .expect("writing to String cannot fail");
        }
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn write_inventory(out: &mut String, inventory: &InventoryReport, options: TextRenderOptions) {
    if inventory.groups.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
    }
    for group in &inventory.groups {
        writeln!(out, " {}", group.category).expect("writing to String cannot fail");
        let cells: Vec<String> = group
            .rows
            .iter()
            .map(|row| format!("{}x {}", row.count, row.name))
            .collect();
        write_cells(out, &cells, options);
        writeln!(out).expect("writing to String cannot fail");
    }
    if options.verbose {
        writeln!(
            out,
            " Skipped: {} sealed, {} biocoded",
            inventory.sealed_skipped, inventory.biocoded_skipped
        )
        .expect("writing to String cannot fail");
    }
}

fn write_equipment(out: &mut String, equipment: &EquipmentReport, options: TextRenderOptions) {
    if equipment.rows.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
    }
    for row in &equipment.rows {
        writeln!(
            out,
            " {:<n$} Armor: {:<3} {}",
            fit_column(&row.name, NAME_WIDTH),
            row.armor_level,
            row.combat_info,
            n = NAME_WIDTH
        )
        .expect("writing to String cannot fail");
        let cells: Vec<String> = Slot::ALL
            .iter()
            .filter_map(|slot| {
                let item = row.slots.get(slot)?;
                Some(format!("{slot}: {item}"))
            })
            .collect();
        write_cells(out, &cells, options);
        writeln!(out).expect("writing to String cannot fail");
    }
}

fn mood_cell(mood: Option<f64>, resistance: Option<f64>) -> String {
    match (mood, resistance) {
        (_, Some(resistance)) => format!("R {resistance:.1}"),
        (Some(mood), None) => format!("{:.0}%", mood * 100.0),
        (None, None) => String::new(),
    }
}

fn write_skills(out: &mut String, skills: &SkillsReport) {
    let mut header = format!(" {:<n$}", "", n = NAME_WIDTH);
    for skill in SkillName::ALL {
        write!(&mut header, "{:<w$}", skill_abbreviation(skill), w = SKILL_WIDTH)
            .expect("writing to String cannot fail");
    }
    header.push_str("Mood");
    writeln!(out, "{header}").expect("writing to String cannot fail");

    for row in &skills.rows {
        let mut line = format!(" {:<n$}", fit_column(&row.name, NAME_WIDTH - 1), n = NAME_WIDTH);
        for cell in &row.cells {
            let text = cell.as_ref().map(skill_cell).unwrap_or_default();
            write!(&mut line, "{text:<w$}", w = SKILL_WIDTH)
                .expect("writing to String cannot fail");
        }
        line.push_str(&mood_cell(row.mood, row.captivity_resistance));
        writeln!(out, "{}", line.trim_end()).expect("writing to String cannot fail");
    }
}

fn write_species(out: &mut String, species: &SpeciesReport, options: TextRenderOptions) {
    let cells: Vec<String> = species
        .rows
        .iter()
        .map(|row| format!("{}x {}", row.count, row.species))
        .collect();
    write_cells(out, &cells, options);

    if options.verbose {
        for row in species.rows.iter().filter(|row| !row.names.is_empty()) {
            writeln!(out, "  {}: {}", row.species, row.names.join(", "))
                .expect("writing to String cannot fail");
        }
    }
}

fn write_harvest(out: &mut String, harvest: &HarvestReport, options: TextRenderOptions) {
    let mut locations: Vec<Location> = harvest.rows.iter().map(|row| row.location).collect();
    locations.sort();
    locations.dedup();
    if locations.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
    }
    for location in locations {
        writeln!(out, " {location}").expect("writing to String cannot fail");
        let cells: Vec<String> = harvest
            .rows
            .iter()
            .filter(|row| row.location == location)
            .map(|row| format!("{}x {} ({})", row.count, row.crop, row.stage))
            .collect();
        write_cells(out, &cells, options);
        writeln!(out).expect("writing to String cannot fail");
    }
}

fn injury_text(injury: &Injury) -> String {
    format!("{} {:.2}", injury.label, injury.severity)
}

fn write_injuries(out: &mut String, injuries: &InjuriesReport, options: TextRenderOptions) {
    if injuries.rows.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
    }
    for row in &injuries.rows {
        let worst = row
            .worst
            .as_ref()
            .map(injury_text)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            " {:<n$} worst: {} ({} temporary)",
            fit_column(&row.name, NAME_WIDTH),
            worst,
            row.temporary.len(),
            n = NAME_WIDTH
        )
        .expect("writing to String cannot fail");

        let mut cells: Vec<String> = row.permanent.iter().map(|i| i.label.clone()).collect();
        if options.verbose {
            cells.extend(row.temporary.iter().map(injury_text));
        }
        if !cells.is_empty() {
            write_cells(out, &cells, options);
        }
    }
    if !injuries.unmapped_parts.is_empty() {
        writeln!(out).expect("writing to String cannot fail");
        let parts: Vec<&str> = injuries.unmapped_parts.iter().map(String::as_str).collect();
        writeln!(out, " Unmapped body parts: {}", parts.join(", "))
            .expect("writing to String cannot fail");
    }
}

fn write_queue(out: &mut String, queue: &QueueReport, options: TextRenderOptions) {
    let sections: [(&str, &[QueueRow]); 3] = [
        ("Target count", &queue.target),
        ("Repeat count", &queue.repeat),
        ("Forever", &queue.forever),
    ];
    for (heading, rows) in sections {
        writeln!(out, " {heading}").expect("writing to String cannot fail");
        let cells: Vec<String> = rows
            .iter()
            .map(|row| {
                if heading == "Forever" {
                    row.name.clone()
                } else {
                    format!("{}x {}", row.count, row.name)
                }
            })
            .collect();
        write_cells(out, &cells, options);
        writeln!(out).expect("writing to String cannot fail");
    }
}

fn write_ranking(out: &mut String, ranking: &RankingReport) {
    for skill in &ranking.skills {
        let entries: Vec<String> = skill
            .entries
            .iter()
            .map(|entry| format!("{} {:.2}", entry.name, entry.score))
            .collect();
        let entries = if entries.is_empty() {
            "-".to_string()
        } else {
            entries.join(", ")
        };
        writeln!(
            out,
            " {:<w$}{}",
            skill.skill.as_str(),
            entries,
            w = RANK_LABEL_WIDTH
        )
        .expect("writing to String cannot fail");
    }
}

fn write_dead_pawns(out: &mut String, dead: &DeadPawnsReport) {
    if dead.pawns.is_empty() {
        writeln!(out, "  none").expect("writing to String cannot fail");
    }
    for pawn in &dead.pawns {
        let mut line = format!(" {}", pawn.name);
        if let Some(kind) = &pawn.kind {
            write!(&mut line, " ({kind})").expect("writing to String cannot fail");
        }
        if let Some(position) = pawn.position {
            write!(&mut line, " at ({}, {})", position.x, position.y)
                .expect("writing to String cannot fail");
        }
        writeln!(out, "{line}").expect("writing to String cannot fail");
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out: String = value.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

fn optional_f64(value: Option<f64>) -> JsonValue {
    value.map(JsonValue::from).unwrap_or(JsonValue::Null)
}

fn optional_string(value: Option<&str>) -> JsonValue {
    value
        .map(|s| JsonValue::String(s.to_string()))
        .unwrap_or(JsonValue::Null)
}

fn position_to_json(position: Option<Position>) -> JsonValue {
    match position {
        Some(position) => {
            let mut m = JsonMap::new();
            m.insert("x".to_string(), JsonValue::from(position.x));
            m.insert("y".to_string(), JsonValue::from(position.y));
            JsonValue::Object(m)
        }
        None => JsonValue::Null,
    }
}

fn injury_to_json(injury: &Injury) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("label".to_string(), JsonValue::String(injury.label.clone()));
    m.insert("severity".to_string(), JsonValue::from(injury.severity));
    JsonValue::Object(m)
}

fn inventory_to_json(inventory: &InventoryReport) -> JsonValue {
    let mut categories = JsonMap::new();
    for group in &inventory.groups {
        let mut rows = JsonMap::new();
        for row in &group.rows {
            rows.insert(row.name.clone(), JsonValue::from(row.count));
        }
        categories.insert(group.category.to_string(), JsonValue::Object(rows));
    }
    let mut m = JsonMap::new();
    m.insert("categories".to_string(), JsonValue::Object(categories));
    m.insert(
        "sealed_skipped".to_string(),
        JsonValue::from(inventory.sealed_skipped),
    );
    m.insert(
        "biocoded_skipped".to_string(),
        JsonValue::from(inventory.biocoded_skipped),
    );
    JsonValue::Object(m)
}

fn equipment_to_json(equipment: &EquipmentReport) -> JsonValue {
    JsonValue::Array(
        equipment
            .rows
            .iter()
            .map(|row| {
                let mut slots = JsonMap::new();
                for slot in Slot::ALL {
                    if let Some(item) = row.slots.get(&slot) {
                        slots.insert(slot.as_str().to_string(), JsonValue::String(item.clone()));
                    }
                }
                let mut m = JsonMap::new();
                m.insert("name".to_string(), JsonValue::String(row.name.clone()));
                m.insert("armor_level".to_string(), JsonValue::from(row.armor_level));
                m.insert(
                    "combat_info".to_string(),
                    JsonValue::String(row.combat_info.clone()),
                );
                m.insert("slots".to_string(), JsonValue::Object(slots));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn skill_to_json(skill: &Skill) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "level".to_string(),
        match skill.level.value() {
            Some(level) => JsonValue::from(level),
            None => JsonValue::String("incapable".to_string()),
        },
    );
    m.insert(
        "passion".to_string(),
        JsonValue::String(format!("{:?}", skill.passion).to_lowercase()),
    );
    m.insert("xp_fraction".to_string(), JsonValue::from(skill.xp_fraction));
    m.insert(
        "delta".to_string(),
        skill.delta.map(JsonValue::from).unwrap_or(JsonValue::Null),
    );
    JsonValue::Object(m)
}

fn skills_to_json(skills: &SkillsReport) -> JsonValue {
    JsonValue::Array(
        skills
            .rows
            .iter()
            .map(|row| {
                let mut cells = JsonMap::new();
                for (skill, cell) in SkillName::ALL.iter().zip(&row.cells) {
                    if let Some(cell) = cell {
                        cells.insert(skill.as_str().to_string(), skill_to_json(cell));
                    }
                }
                let mut m = JsonMap::new();
                m.insert("name".to_string(), JsonValue::String(row.name.clone()));
                m.insert("skills".to_string(), JsonValue::Object(cells));
                m.insert("mood".to_string(), optional_f64(row.mood));
                m.insert(
                    "captivity_resistance".to_string(),
                    optional_f64(row.captivity_resistance),
                );
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn species_to_json(species: &SpeciesReport) -> JsonValue {
    JsonValue::Array(
        species
            .rows
            .iter()
            .map(|row| {
                let mut m = JsonMap::new();
                m.insert("species".to_string(), JsonValue::String(row.species.clone()));
                m.insert("count".to_string(), JsonValue::from(row.count));
                if !row.names.is_empty() {
                    m.insert(
                        "names".to_string(),
                        JsonValue::Array(
                            row.names.iter().cloned().map(JsonValue::String).collect(),
                        ),
                    );
                }
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn harvest_to_json(harvest: &HarvestReport) -> JsonValue {
    JsonValue::Array(
        harvest
            .rows
            .iter()
            .map(|row| {
                let mut m = JsonMap::new();
                m.insert("crop".to_string(), JsonValue::String(row.crop.clone()));
                m.insert(
                    "location".to_string(),
                    JsonValue::String(row.location.to_string()),
                );
                m.insert(
                    "stage".to_string(),
                    JsonValue::String(row.stage.as_str().to_string()),
                );
                m.insert("count".to_string(), JsonValue::from(row.count));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn injuries_to_json(injuries: &InjuriesReport) -> JsonValue {
    let rows = injuries
        .rows
        .iter()
        .map(|row| {
            let mut m = JsonMap::new();
            m.insert("name".to_string(), JsonValue::String(row.name.clone()));
            m.insert(
                "permanent".to_string(),
                JsonValue::Array(row.permanent.iter().map(injury_to_json).collect()),
            );
            m.insert(
                "temporary".to_string(),
                JsonValue::Array(row.temporary.iter().map(injury_to_json).collect()),
            );
            m.insert(
                "worst".to_string(),
                row.worst.as_ref().map(injury_to_json).unwrap_or(JsonValue::Null),
            );
            JsonValue::Object(m)
        })
        .collect();

    let mut m = JsonMap::new();
    m.insert("persons".to_string(), JsonValue::Array(rows));
    m.insert(
        "unmapped_parts".to_string(),
        JsonValue::Array(
            injuries
                .unmapped_parts
                .iter()
                .cloned()
                .map(JsonValue::String)
                .collect(),
        ),
    );
    JsonValue::Object(m)
}

fn queue_rows_to_json(rows: &[QueueRow]) -> JsonValue {
    JsonValue::Array(
        rows.iter()
            .map(|row| {
                let mut m = JsonMap::new();
                m.insert("name".to_string(), JsonValue::String(row.name.clone()));
                m.insert("count".to_string(), JsonValue::from(row.count));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

fn queue_to_json(queue: &QueueReport) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("target".to_string(), queue_rows_to_json(&queue.target));
    m.insert("repeat".to_string(), queue_rows_to_json(&queue.repeat));
    m.insert("forever".to_string(), queue_rows_to_json(&queue.forever));
    JsonValue::Object(m)
}

fn ranking_to_json(ranking: &RankingReport) -> JsonValue {
    let mut m = JsonMap::new();
    for skill in &ranking.skills {
        let entries = skill
            .entries
            .iter()
            .map(|entry| {
                let mut e = JsonMap::new();
                e.insert("name".to_string(), JsonValue::String(entry.name.clone()));
                e.insert("score".to_string(), JsonValue::from(entry.score));
                JsonValue::Object(e)
            })
            .collect();
        m.insert(skill.skill.as_str().to_string(), JsonValue::Array(entries));
    }
    JsonValue::Object(m)
}

fn dead_pawns_to_json(dead: &DeadPawnsReport) -> JsonValue {
    JsonValue::Array(
        dead.pawns
            .iter()
            .map(|pawn| {
                let mut m = JsonMap::new();
                m.insert("name".to_string(), JsonValue::String(pawn.name.clone()));
                m.insert("kind".to_string(), optional_string(pawn.kind.as_deref()));
                m.insert(
                    "faction".to_string(),
                    optional_string(pawn.faction.as_deref()),
                );
                m.insert("position".to_string(), position_to_json(pawn.position));
                JsonValue::Object(m)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use colony_core::person::{Passion, SkillLevel};

    use super::*;

    #[test]
    fn fit_column_truncates_with_ellipsis() {
        assert_eq!(fit_column("Duster", 10), "Duster");
        assert_eq!(fit_column("DevilstrandCloth Duster", 10), "Devilst...");
        assert_eq!(fit_column("abcdef", 3), "abc");
    }

    #[test]
    fn skill_cell_shows_passion_and_signed_delta() {
        let mut skill = Skill {
            name: SkillName::Shooting,
            level: SkillLevel::Level(8),
            passion: Passion::Major,
            xp_fraction: 0.0,
            delta: Some(2),
        };
        assert_eq!(skill_cell(&skill), "8++[+2]");

        skill.passion = Passion::Minor;
        skill.delta = Some(-1);
        assert_eq!(skill_cell(&skill), "8+[-1]");

        skill.level = SkillLevel::Incapable;
        skill.passion = Passion::None;
        skill.delta = None;
        assert_eq!(skill_cell(&skill), "--");
    }

    #[test]
    fn mood_cell_prefers_resistance() {
        assert_eq!(mood_cell(Some(0.62), None), "62%");
        assert_eq!(mood_cell(None, Some(17.5)), "R 17.5");
        assert_eq!(mood_cell(None, None), "");
    }
}
