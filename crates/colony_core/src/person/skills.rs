use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillName {
    Shooting,
    Melee,
    Construction,
    Mining,
    Cooking,
    Plants,
    Animals,
    Crafting,
    Artistic,
    Medicine,
    Social,
    Intellectual,
}

impl SkillName {
    /// Fixed order used by the snapshot store and the skills table.
    pub const ALL: [SkillName; 12] = [
        Self::Shooting,
        Self::Melee,
        Self::Construction,
        Self::Mining,
        Self::Cooking,
        Self::Plants,
        Self::Animals,
        Self::Crafting,
        Self::Artistic,
        Self::Medicine,
        Self::Social,
        Self::Intellectual,
    ];

    pub fn from_def(def: &str) -> Option<Self> {
        match def {
            "Shooting" => Some(Self::Shooting),
            "Melee" => Some(Self::Melee),
            "Construction" => Some(Self::Construction),
            "Mining" => Some(Self::Mining),
            "Cooking" => Some(Self::Cooking),
            // Pre-1.0 saves call it Growing.
            "Plants" | "Growing" => Some(Self::Plants),
            "Animals" => Some(Self::Animals),
            "Crafting" => Some(Self::Crafting),
            "Artistic" => Some(Self::Artistic),
            "Medicine" => Some(Self::Medicine),
            "Social" => Some(Self::Social),
            "Intellectual" => Some(Self::Intellectual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Shooting => "Shooting",
            Self::Melee => "Melee",
            Self::Construction => "Construction",
            Self::Mining => "Mining",
            Self::Cooking => "Cooking",
            Self::Plants => "Plants",
            Self::Animals => "Animals",
            Self::Crafting => "Crafting",
            Self::Artistic => "Artistic",
            Self::Medicine => "Medicine",
            Self::Social => "Social",
            Self::Intellectual => "Intellectual",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill level, or the incapable marker (`X` in saves and snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SkillLevel {
    Incapable,
    Level(i32),
}

impl SkillLevel {
    pub const INCAPABLE_MARK: &'static str = "X";

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(Self::INCAPABLE_MARK) {
            return Some(Self::Incapable);
        }
        raw.parse().ok().map(Self::Level)
    }

    pub fn value(&self) -> Option<i32> {
        match *self {
            Self::Incapable => None,
            Self::Level(level) => Some(level),
        }
    }

    pub fn is_incapable(&self) -> bool {
        matches!(self, Self::Incapable)
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Incapable => f.write_str("--"),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        match level {
            SkillLevel::Incapable => SkillLevel::INCAPABLE_MARK.to_string(),
            SkillLevel::Level(level) => level.to_string(),
        }
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        SkillLevel::parse(&raw).ok_or_else(|| format!("invalid skill level {raw:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Passion {
    #[default]
    None,
    Minor,
    Major,
}

impl Passion {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("Minor") => Self::Minor,
            Some("Major") => Self::Major,
            _ => Self::None,
        }
    }

    pub fn marker(&self) -> &'static str {
        match *self {
            Self::None => "",
            Self::Minor => "+",
            Self::Major => "++",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: SkillName,
    pub level: SkillLevel,
    pub passion: Passion,
    pub xp_fraction: f64,
    pub delta: Option<i32>,
}

impl Skill {
    fn incapable(name: SkillName) -> Self {
        Self {
            name,
            level: SkillLevel::Incapable,
            passion: Passion::None,
            xp_fraction: 0.0,
            delta: None,
        }
    }

    /// Fractional level used for ranking; incapable skills have none.
    pub fn score(&self) -> Option<f64> {
        self.level
            .value()
            .map(|level| f64::from(level) + self.xp_fraction)
    }
}

/// XP needed to go from each level to the next.
#[rustfmt::skip]
const XP_TO_NEXT_LEVEL: [f64; 20] = [
     1000.0,  2000.0,  3000.0,  4000.0,  5000.0,
     6000.0,  7000.0,  8000.0,  9000.0, 10000.0,
    12000.0, 14000.0, 16000.0, 18000.0, 20000.0,
    22000.0, 24000.0, 26000.0, 28000.0, 30000.0,
];

pub fn xp_threshold(level: i32) -> f64 {
    let index = usize::try_from(level).unwrap_or(0);
    XP_TO_NEXT_LEVEL[index.min(XP_TO_NEXT_LEVEL.len() - 1)]
}

/// Reads a pawn's skills and computes deltas against `prior`, the baseline
/// levels in [`SkillName::ALL`] order. Nothing is written back here.
pub fn load_skills(
    pawn: &Record<'_, '_>,
    name: &str,
    prior: Option<&[SkillLevel]>,
) -> BTreeMap<SkillName, Skill> {
    let mut skills = BTreeMap::new();

    for entry in pawn.list(&["skills", "skills"]) {
        let Some(def) = entry.resolve(&["def"]) else {
            continue;
        };
        let Some(skill_name) = SkillName::from_def(def) else {
            tracing::debug!(def, person = name, "skipping unknown skill");
            continue;
        };
        let previous = prior.and_then(|levels| levels.get(skill_name.index()).copied());

        let raw_level = entry.resolve(&["level"]);
        let marked_incapable = previous == Some(SkillLevel::Incapable)
            || raw_level.is_some_and(|raw| raw.eq_ignore_ascii_case(SkillLevel::INCAPABLE_MARK));
        if marked_incapable {
            skills.insert(skill_name, Skill::incapable(skill_name));
            continue;
        }

        let level: i32 = entry.parse(&["level"]).unwrap_or(0);
        let xp: f64 = entry.parse(&["xpSinceLastLevel"]).unwrap_or(0.0);
        let delta = match previous {
            Some(SkillLevel::Level(old)) if old != level => Some(level - old),
            _ => None,
        };

        skills.insert(
            skill_name,
            Skill {
                name: skill_name,
                level: SkillLevel::Level(level),
                passion: Passion::from_raw(entry.resolve(&["passion"])),
                xp_fraction: xp / xp_threshold(level),
                delta,
            },
        );
    }

    skills
}

/// Baseline levels to store for the next run. Skills missing from the save count as 0.
pub fn baseline_levels(skills: &BTreeMap<SkillName, Skill>) -> Vec<SkillLevel> {
    SkillName::ALL
        .iter()
        .map(|skill| {
            skills
                .get(skill)
                .map(|s| s.level)
                .unwrap_or(SkillLevel::Level(0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    const PAWN: &str = r#"
<thing Class="Pawn">
  <skills><skills>
    <li><def>Shooting</def><level>8</level><passion>Major</passion><xpSinceLastLevel>4500</xpSinceLastLevel></li>
    <li><def>Melee</def><level>X</level></li>
    <li><def>Construction</def><passion>Minor</passion></li>
    <li><def>Cooking</def><level>5</level></li>
    <li><def>Basketweaving</def><level>20</level></li>
  </skills></skills>
</thing>"#;

    fn load(prior: Option<&[SkillLevel]>) -> BTreeMap<SkillName, Skill> {
        let doc = Document::parse(PAWN).expect("fixture xml should parse");
        load_skills(&Record::new(doc.root_element()), "Alice", prior)
    }

    #[test]
    fn first_run_reports_no_deltas_and_builds_baseline() {
        let skills = load(None);

        let shooting = &skills[&SkillName::Shooting];
        assert_eq!(shooting.level, SkillLevel::Level(8));
        assert_eq!(shooting.passion, Passion::Major);
        assert!((shooting.xp_fraction - 0.5).abs() < 1e-9);
        assert_eq!(shooting.delta, None);

        let melee = &skills[&SkillName::Melee];
        assert_eq!(melee.level, SkillLevel::Incapable);
        assert_eq!(melee.passion, Passion::None);
        assert_eq!(melee.delta, None);
        assert_eq!(melee.level.to_string(), "--");

        assert_eq!(skills[&SkillName::Construction].level, SkillLevel::Level(0));
        assert_eq!(skills.len(), 4);

        let saved = baseline_levels(&skills);
        assert_eq!(saved.len(), SkillName::ALL.len());
        assert_eq!(saved[0], SkillLevel::Level(8));
        assert_eq!(saved[1], SkillLevel::Incapable);
        assert_eq!(saved[SkillName::Mining.index()], SkillLevel::Level(0));
    }

    #[test]
    fn deltas_only_for_changed_numeric_levels() {
        let mut baseline = vec![SkillLevel::Level(0); SkillName::ALL.len()];
        baseline[SkillName::Shooting.index()] = SkillLevel::Level(6);
        baseline[SkillName::Cooking.index()] = SkillLevel::Level(5);
        baseline[SkillName::Construction.index()] = SkillLevel::Incapable;

        let skills = load(Some(&baseline));

        assert_eq!(skills[&SkillName::Shooting].delta, Some(2));
        assert_eq!(skills[&SkillName::Cooking].delta, None);
        assert_eq!(skills[&SkillName::Construction].level, SkillLevel::Incapable);
        assert_eq!(skills[&SkillName::Construction].delta, None);
    }

    #[test]
    fn skill_levels_serialize_with_incapable_mark() {
        let encoded = serde_json::to_string(&vec![SkillLevel::Level(3), SkillLevel::Incapable])
            .expect("levels should serialize");
        assert_eq!(encoded, r#"["3","X"]"#);

        let decoded: Vec<SkillLevel> =
            serde_json::from_str(r#"["12","x"]"#).expect("levels should deserialize");
        assert_eq!(decoded, vec![SkillLevel::Level(12), SkillLevel::Incapable]);
    }

    #[test]
    fn xp_threshold_clamps_to_table() {
        assert_eq!(xp_threshold(0), 1000.0);
        assert_eq!(xp_threshold(10), 12000.0);
        assert_eq!(xp_threshold(25), 30000.0);
        assert_eq!(xp_threshold(-1), 1000.0);
    }
}
