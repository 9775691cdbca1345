use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::skills::{Skill, SkillLevel, SkillName};
use crate::item::{Category, Item, MaxHealthRegistry, classify};
use crate::record::Record;
use crate::rules::{Pattern, Rule, all_matches, first_match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Head,
    SkinTop,
    SkinBottom,
    Belt,
    Middle,
    Outer,
    Weapon,
    Medicine,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Self::Head,
        Self::SkinTop,
        Self::SkinBottom,
        Self::Belt,
        Self::Middle,
        Self::Outer,
        Self::Weapon,
        Self::Medicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Head => "head",
            Self::SkinTop => "skin-top",
            Self::SkinBottom => "skin-bottom",
            Self::Belt => "belt",
            Self::Middle => "middle",
            Self::Outer => "outer",
            Self::Weapon => "weapon",
            Self::Medicine => "medicine",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[rustfmt::skip]
const APPAREL_SLOTS: &[Rule<Slot>] = &[
    Rule::new(Pattern::Contains("Helmet"), Slot::Head),
    Rule::new(Pattern::Contains("Hat"),    Slot::Head),
    Rule::new(Pattern::Contains("Tuque"),  Slot::Head),
    Rule::new(Pattern::Contains("Mask"),   Slot::Head),
    Rule::new(Pattern::Contains("Crown"),  Slot::Head),
    Rule::new(Pattern::Contains("Veil"),   Slot::Head),
    Rule::new(Pattern::Contains("Belt"),   Slot::Belt),
    Rule::new(Pattern::Contains("Pack"),   Slot::Belt),
    Rule::new(Pattern::Contains("Vest"),   Slot::Middle),
    Rule::new(Pattern::Contains("Jacket"), Slot::Middle),
    Rule::new(Pattern::Contains("Pants"),  Slot::SkinBottom),
    Rule::new(Pattern::Contains("Shirt"),  Slot::SkinTop),
    Rule::new(Pattern::Contains("Duster"), Slot::Outer),
    Rule::new(Pattern::Contains("Parka"),  Slot::Outer),
    Rule::new(Pattern::Contains("Armor"),  Slot::Outer),
    Rule::new(Pattern::Contains("Robe"),   Slot::Outer),
    Rule::new(Pattern::Contains("Cape"),   Slot::Outer),
    Rule::new(Pattern::Contains("Coat"),   Slot::Outer),
    Rule::new(Pattern::Prefix("Tribal"),   Slot::Outer),
];

#[rustfmt::skip]
const ARMOR_KEYWORDS: &[Rule<i32>] = &[
    Rule::new(Pattern::Contains("Flak"),   1),
    Rule::new(Pattern::Contains("Helmet"), 1),
    Rule::new(Pattern::Contains("Shield"), 1),
];

#[rustfmt::skip]
const HEAVY_ARMOR: &[Rule<i32>] = &[
    Rule::new(Pattern::Exact("PowerArmor"),      2),
    Rule::new(Pattern::Exact("ArmorRecon"),      2),
    Rule::new(Pattern::Exact("ArmorCataphract"), 2),
];

// (material, base name) pairs for coats that count as light armor.
#[rustfmt::skip]
const GOOD_COATS: &[(&str, &str)] = &[
    ("DevilstrandCloth", "Duster"),
    ("DevilstrandCloth", "Parka"),
    ("Synthread",        "Duster"),
    ("Synthread",        "Parka"),
];

#[rustfmt::skip]
const GREAT_COATS: &[(&str, &str)] = &[
    ("Hyperweave",      "Duster"),
    ("Hyperweave",      "Parka"),
    ("Leather_Thrumbo", "Duster"),
];

// Weapon families fired with the Shooting skill. Anything else held is swung.
#[rustfmt::skip]
const RANGED_FAMILIES: &[Rule<()>] = &[
    Rule::new(Pattern::Exact("Gun"),     ()),
    Rule::new(Pattern::Exact("Bow"),     ()),
    Rule::new(Pattern::Exact("Grenade"), ()),
];

pub fn apparel_slot(base_name: &str) -> Option<Slot> {
    first_match(APPAREL_SLOTS, base_name)
}

fn coat_bonus(item: &Item) -> i32 {
    let Some(material) = item.material.as_deref() else {
        return 0;
    };
    let pair = (material, item.base_name.as_str());
    if GREAT_COATS.contains(&pair) {
        2
    } else if GOOD_COATS.contains(&pair) {
        1
    } else {
        0
    }
}

/// Armor contribution of one equipped item.
pub fn armor_points(item: &Item) -> i32 {
    let keywords: i32 = all_matches(ARMOR_KEYWORDS, &item.base_name).iter().sum();
    let heavy = first_match(HEAVY_ARMOR, &item.base_name).unwrap_or(0);
    keywords + heavy + coat_bonus(item)
}

fn level_text(skills: &BTreeMap<SkillName, Skill>, name: SkillName) -> String {
    skills
        .get(&name)
        .map(|s| s.level)
        .unwrap_or(SkillLevel::Level(0))
        .to_string()
}

pub fn is_ranged(weapon: &Item) -> bool {
    first_match(RANGED_FAMILIES, weapon.category.as_str()).is_some()
}

pub fn combat_info(skills: &BTreeMap<SkillName, Skill>, weapon: Option<&Item>) -> String {
    let incapable = |name| skills.get(&name).is_some_and(|s: &Skill| s.level.is_incapable());
    if incapable(SkillName::Shooting) && incapable(SkillName::Melee) {
        return "(Non Violent)".to_string();
    }
    match weapon {
        Some(item) if is_ranged(item) => {
            format!("(Range - {})", level_text(skills, SkillName::Shooting))
        }
        Some(_) => format!("(Melee - {})", level_text(skills, SkillName::Melee)),
        None => "** UNARMED **".to_string(),
    }
}

fn medicine_item(record: &Record<'_, '_>, subtype: &str) -> Item {
    let count = record.parse(&["stackCount"]).unwrap_or(1);
    Item {
        category: Category::Medicine,
        base_name: subtype.to_string(),
        material: None,
        quality: None,
        qualifiers: vec![format!("x{count}")],
        health: 0,
        biocoded: false,
        tainted: false,
        position: None,
        count,
    }
}

/// Worn apparel, held weapon and carried medicine. Later items in the same
/// slot replace earlier ones.
pub fn load_equipment(
    pawn: &Record<'_, '_>,
    registry: &mut MaxHealthRegistry,
) -> BTreeMap<Slot, Item> {
    let mut slots = BTreeMap::new();

    for worn in pawn.list(&["apparel", "wornApparel", "innerList"]) {
        let item = classify(&worn, registry);
        match apparel_slot(&item.base_name) {
            Some(slot) => {
                slots.insert(slot, item);
            }
            None => tracing::warn!(apparel = %item.base_name, "no slot rule for apparel"),
        }
    }

    for held in pawn.list(&["equipment", "equipment", "innerList"]) {
        slots.insert(Slot::Weapon, classify(&held, registry));
    }

    for carried in pawn.list(&["inventory", "innerContainer", "innerList"]) {
        let def = carried.get_or(&["def"], "");
        if let Some(subtype) = def.strip_prefix("Medicine") {
            slots.insert(Slot::Medicine, medicine_item(&carried, subtype));
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::categorize;
    use crate::person::skills::Passion;

    fn item(def: &str, material: Option<&str>) -> Item {
        let (category, base_name) = categorize(def, false);
        Item {
            category,
            base_name,
            material: material.map(str::to_string),
            quality: None,
            qualifiers: Vec::new(),
            health: 100,
            biocoded: false,
            tainted: false,
            position: None,
            count: 1,
        }
    }

    fn skill(name: SkillName, level: SkillLevel) -> (SkillName, Skill) {
        (
            name,
            Skill {
                name,
                level,
                passion: Passion::None,
                xp_fraction: 0.0,
                delta: None,
            },
        )
    }

    #[test]
    fn slot_rules_first_match_wins() {
        assert_eq!(apparel_slot("PowerArmorHelmet"), Some(Slot::Head));
        assert_eq!(apparel_slot("PowerArmor"), Some(Slot::Outer));
        assert_eq!(apparel_slot("FlakVest"), Some(Slot::Middle));
        assert_eq!(apparel_slot("FlakPants"), Some(Slot::SkinBottom));
        assert_eq!(apparel_slot("CollarShirt"), Some(Slot::SkinTop));
        assert_eq!(apparel_slot("ShieldBelt"), Some(Slot::Belt));
        assert_eq!(apparel_slot("Duster"), Some(Slot::Outer));
        assert_eq!(apparel_slot("Bandolier"), None);
    }

    #[test]
    fn armor_points_combine_keywords_heavy_armor_and_coats() {
        assert_eq!(armor_points(&item("Apparel_FlakVest", None)), 1);
        assert_eq!(armor_points(&item("Apparel_PowerArmorHelmet", Some("Plasteel"))), 1);
        assert_eq!(armor_points(&item("Apparel_PowerArmor", None)), 2);
        assert_eq!(armor_points(&item("Apparel_Duster", Some("DevilstrandCloth"))), 1);
        assert_eq!(armor_points(&item("Apparel_Duster", Some("Hyperweave"))), 2);
        assert_eq!(armor_points(&item("Apparel_Duster", Some("Cloth"))), 0);
    }

    #[test]
    fn combat_info_depends_on_weapon_and_skills() {
        let skills: BTreeMap<_, _> = [
            skill(SkillName::Shooting, SkillLevel::Level(9)),
            skill(SkillName::Melee, SkillLevel::Level(4)),
        ]
        .into_iter()
        .collect();

        let rifle = item("Gun_AssaultRifle", None);
        let sword = item("MeleeWeapon_LongSword", Some("Steel"));
        let bow = item("Bow_Recurve", None);
        let molotov = item("Weapon_GrenadeMolotov", None);
        assert_eq!(bow.category, Category::Other("Bow".into()));
        assert_eq!(molotov.category, Category::Grenade);
        assert_eq!(combat_info(&skills, Some(&rifle)), "(Range - 9)");
        assert_eq!(combat_info(&skills, Some(&bow)), "(Range - 9)");
        assert_eq!(combat_info(&skills, Some(&molotov)), "(Range - 9)");
        assert_eq!(combat_info(&skills, Some(&sword)), "(Melee - 4)");
        assert_eq!(combat_info(&skills, None), "** UNARMED **");

        let pacifist: BTreeMap<_, _> = [
            skill(SkillName::Shooting, SkillLevel::Incapable),
            skill(SkillName::Melee, SkillLevel::Incapable),
        ]
        .into_iter()
        .collect();
        assert_eq!(combat_info(&pacifist, Some(&rifle)), "(Non Violent)");
    }
}
