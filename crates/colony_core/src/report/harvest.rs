use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::record::Record;
use crate::rules::{Pattern, Rule, first_match};
use crate::spatial::{
    Position, Quadrant, Rotation, hydroponics_footprint, quadrant, record_position,
};

const PLANT_PREFIX: &str = "Plant_";
const YOUNG_BELOW: f64 = 0.5;
const RIPE_AT: f64 = 1.0;

// Wild vegetation that is never sown; these would drown out the crops.
#[rustfmt::skip]
const WILD_PLANTS: &[Rule<()>] = &[
    Rule::new(Pattern::Prefix("Plant_Tree"),     ()),
    Rule::new(Pattern::Contains("Grass"),        ()),
    Rule::new(Pattern::Contains("Bush"),         ()),
    Rule::new(Pattern::Exact("Plant_Brambles"),  ()),
    Rule::new(Pattern::Exact("Plant_Dandelion"), ()),
    Rule::new(Pattern::Exact("Plant_Moss"),      ()),
    Rule::new(Pattern::Exact("Plant_Astragalus"), ()),
    Rule::new(Pattern::Prefix("Plant_Saguaro"),  ()),
    Rule::new(Pattern::Prefix("Plant_Pincushion"), ()),
    Rule::new(Pattern::Prefix("Plant_Shrub"),    ()),
    Rule::new(Pattern::Exact("Plant_Chokevine"), ()),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GrowthStage {
    Young,
    Maturing,
    Ripe,
}

impl GrowthStage {
    pub fn from_growth(growth: f64) -> Self {
        if growth < YOUNG_BELOW {
            Self::Young
        } else if growth < RIPE_AT {
            Self::Maturing
        } else {
            Self::Ripe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Young => "young",
            Self::Maturing => "maturing",
            Self::Ripe => "ripe",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a crop grows: inside a hydroponics basin or out in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Location {
    Basin,
    Field(Quadrant),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basin => f.write_str("hydroponics"),
            Self::Field(quadrant) => write!(f, "{quadrant}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestRow {
    pub crop: String,
    pub location: Location,
    pub stage: GrowthStage,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    pub rows: Vec<HarvestRow>,
}

impl HarvestReport {
    pub fn count(&self, crop: &str, location: Location, stage: GrowthStage) -> usize {
        self.rows
            .iter()
            .find(|row| row.crop == crop && row.location == location && row.stage == stage)
            .map_or(0, |row| row.count)
    }
}

/// Every cell covered by a hydroponics basin.
pub fn basin_cells(basins: &[Record<'_, '_>]) -> BTreeSet<Position> {
    basins
        .iter()
        .filter_map(|basin| {
            let position = record_position(basin)?;
            let rotation = Rotation::from_raw(basin.parse(&["rot"]));
            Some(hydroponics_footprint(position, rotation))
        })
        .flatten()
        .collect()
}

pub fn is_crop(def: &str) -> bool {
    def.starts_with(PLANT_PREFIX) && first_match(WILD_PLANTS, def).is_none()
}

/// Buckets crops by name, location and growth stage. Plants without a
/// usable position cannot be placed and are skipped.
pub fn build_harvest(plants: &[Record<'_, '_>], basins: &BTreeSet<Position>) -> HarvestReport {
    let mut grouped: BTreeMap<(String, Location, GrowthStage), usize> = BTreeMap::new();

    for plant in plants {
        let def = plant.get_or(&["def"], "");
        if !is_crop(def) {
            continue;
        }
        let Some(position) = record_position(plant) else {
            continue;
        };
        let location = if basins.contains(&position) {
            Location::Basin
        } else {
            Location::Field(quadrant(position.x, position.y))
        };
        let stage = GrowthStage::from_growth(plant.parse(&["growth"]).unwrap_or(0.0));
        let crop = def.trim_start_matches(PLANT_PREFIX).to_string();
        *grouped.entry((crop, location, stage)).or_default() += 1;
    }

    let rows = grouped
        .into_iter()
        .map(|((crop, location, stage), count)| HarvestRow {
            crop,
            location,
            stage,
            count,
        })
        .collect();
    HarvestReport { rows }
}
