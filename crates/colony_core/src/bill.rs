use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::item::normalize_material;
use crate::record::Record;

pub const FOREVER_COUNT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RepeatMode {
    TargetCount,
    RepeatCount,
    Forever,
}

impl RepeatMode {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("TargetCount") => Self::TargetCount,
            Some("Forever") => Self::Forever,
            _ => Self::RepeatCount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::TargetCount => "TargetCount",
            Self::RepeatCount => "RepeatCount",
            Self::Forever => "Forever",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub recipe_id: String,
    pub repeat_mode: RepeatMode,
    pub count: i32,
    pub materials: Vec<String>,
    pub suspended: bool,
}

impl Bill {
    pub fn from_record(record: &Record<'_, '_>) -> Self {
        let repeat_mode = RepeatMode::from_raw(record.resolve(&["repeatMode"]));
        let count = match repeat_mode {
            RepeatMode::TargetCount => record.parse(&["targetCount"]).unwrap_or(0),
            RepeatMode::RepeatCount => record.parse(&["repeatCount"]).unwrap_or(0),
            RepeatMode::Forever => FOREVER_COUNT,
        };
        let materials = record
            .list(&["ingredientFilter", "allowedDefs"])
            .iter()
            .filter_map(|li| li.resolve(&[]))
            .map(str::to_string)
            .collect();

        Self {
            recipe_id: record.get_or(&["recipe"], "").to_string(),
            repeat_mode,
            count,
            materials,
            suspended: record.flag(&["suspended"]),
        }
    }

    /// Suspended and exhausted orders never appear in reports.
    pub fn is_active(&self) -> bool {
        !self.suspended && self.count != 0
    }

    fn is_apparel(&self) -> bool {
        self.recipe_id.contains("Apparel_")
    }

    pub fn display_name(&self) -> String {
        let name = recipe_display_name(&self.recipe_id);
        match self.materials.as_slice() {
            [material] if self.is_apparel() => format!("{} {name}", normalize_material(material)),
            _ => name,
        }
    }
}

impl PartialOrd for Bill {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bill {
    fn cmp(&self, other: &Self) -> Ordering {
        self.display_name()
            .cmp(&other.display_name())
            .then_with(|| self.recipe_id.cmp(&other.recipe_id))
            .then_with(|| self.count.cmp(&other.count))
            .then_with(|| self.materials.cmp(&other.materials))
            .then_with(|| self.suspended.cmp(&other.suspended))
            .then_with(|| self.repeat_mode.cmp(&other.repeat_mode))
    }
}

static ID_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*_").expect("valid regex"));
static STONE_BLOCKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Stone)?Blocks([A-Z]\w*)$").expect("valid regex"));
static MEAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Cook)?Meal([A-Z]\w*)$").expect("valid regex"));
static MAKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Make([A-Z])").expect("valid regex"));
static CAMEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

#[rustfmt::skip]
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ComponentIndustrial", "Component"),
    ("ComponentSpacer",     "AdvancedComponent"),
    ("ChemfuelFromWood",    "Chemfuel (Wood)"),
    ("ChemfuelFromOrganics", "Chemfuel (Organics)"),
];

/// Human name for a recipe id: `MealFine_CookMealFine` becomes `Fine Meal`.
pub fn recipe_display_name(recipe_id: &str) -> String {
    let mut name = ID_PREFIX_RE.replace(recipe_id, "").into_owned();
    name = STONE_BLOCKS_RE.replace(&name, "${1} Blocks").into_owned();
    name = MEAL_RE.replace(&name, "${1} Meal").into_owned();
    name = MAKE_RE.replace(&name, "${1}").into_owned();
    if let Some((_, expanded)) = ABBREVIATIONS.iter().find(|(short, _)| *short == name) {
        name = (*expanded).to_string();
    }
    CAMEL_RE.replace_all(&name, "${1} ${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn bill(xml: &str) -> Bill {
        let doc = Document::parse(xml).expect("fixture xml should parse");
        Bill::from_record(&Record::new(doc.root_element()))
    }

    #[test]
    fn recipe_names_follow_substitution_chain() {
        assert_eq!(recipe_display_name("MealFine_CookMealFine"), "Fine Meal");
        assert_eq!(recipe_display_name("CookMealSimple"), "Simple Meal");
        assert_eq!(recipe_display_name("Make_StoneBlocksGranite"), "Granite Blocks");
        assert_eq!(recipe_display_name("Make_ComponentIndustrial"), "Component");
        assert_eq!(recipe_display_name("ComponentSpacer"), "Advanced Component");
        assert_eq!(recipe_display_name("ButcherCorpseFlesh"), "Butcher Corpse Flesh");
        assert_eq!(recipe_display_name("MakeKibble"), "Kibble");
    }

    #[test]
    fn repeat_mode_selects_count_field() {
        let repeat = bill(
            "<li><recipe>MealFine_CookMealFine</recipe><repeatMode>RepeatCount</repeatMode><repeatCount>5</repeatCount><targetCount>10</targetCount></li>",
        );
        assert_eq!(repeat.repeat_mode, RepeatMode::RepeatCount);
        assert_eq!(repeat.count, 5);
        assert_eq!(repeat.display_name(), "Fine Meal");
        assert!(repeat.is_active());

        let target = bill(
            "<li><recipe>Make_Apparel_Parka</recipe><repeatMode>TargetCount</repeatMode><repeatCount>5</repeatCount><targetCount>10</targetCount></li>",
        );
        assert_eq!(target.count, 10);

        let forever = bill("<li><recipe>ButcherCorpseFlesh</recipe><repeatMode>Forever</repeatMode></li>");
        assert_eq!(forever.count, FOREVER_COUNT);
        assert!(forever.is_active());
    }

    #[test]
    fn suspended_and_exhausted_bills_are_inactive() {
        let suspended = bill(
            "<li><recipe>CookMealSimple</recipe><suspended>True</suspended><repeatMode>Forever</repeatMode></li>",
        );
        assert!(!suspended.is_active());

        let exhausted = bill(
            "<li><recipe>CookMealSimple</recipe><repeatMode>RepeatCount</repeatMode><repeatCount>0</repeatCount></li>",
        );
        assert!(!exhausted.is_active());
    }

    #[test]
    fn single_material_apparel_names_the_material() {
        let single = bill(
            "<li><recipe>Make_Apparel_Parka</recipe><repeatMode>Forever</repeatMode><ingredientFilter><allowedDefs><li>DevilstrandCloth</li></allowedDefs></ingredientFilter></li>",
        );
        assert_eq!(single.materials, vec!["DevilstrandCloth".to_string()]);
        assert_eq!(single.display_name(), "DevilstrandCloth Parka");

        let many = bill(
            "<li><recipe>Make_Apparel_Parka</recipe><repeatMode>Forever</repeatMode><ingredientFilter><allowedDefs><li>Cloth</li><li>Synthread</li></allowedDefs></ingredientFilter></li>",
        );
        assert_eq!(many.display_name(), "Parka");
    }
}
