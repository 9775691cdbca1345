use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;

/// Lower edge of the centre band on each axis.
pub const QUADRANT_LOW: i32 = 83;
/// Lower edge of the far band on each axis.
pub const QUADRANT_HIGH: i32 = 167;
/// Padding applied around sealed ancient containers.
pub const EXCLUSION_MARGIN: i32 = 5;

const ANCIENT_CASKET_DEF: &str = "AncientCryptosleepCasket";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("expected \"(x, elevation, y)\", got {0:?}")]
    Shape(String),
    #[error("invalid coordinate {component:?} in {raw:?}")]
    Component { raw: String, component: String },
}

/// Parses the game's `"(x, elevation, y)"` cell form. The middle component is discarded.
pub fn parse_position(text: &str) -> Result<Position, PositionError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| PositionError::Shape(trimmed.to_string()))?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [x, _, y] = parts.as_slice() else {
        return Err(PositionError::Shape(trimmed.to_string()));
    };

    let coord = |component: &str| {
        component
            .parse::<i32>()
            .map_err(|_| PositionError::Component {
                raw: trimmed.to_string(),
                component: component.to_string(),
            })
    };
    Ok(Position::new(coord(*x)?, coord(*y)?))
}

/// Reads `pos` from a record. Absent positions are `None`; malformed ones
/// are logged and also `None`, so the record drops out of spatial reports.
pub fn record_position(record: &Record<'_, '_>) -> Option<Position> {
    let raw = record.resolve(&["pos"])?;
    match parse_position(raw) {
        Ok(position) => Some(position),
        Err(e) => {
            tracing::warn!(record = ?record, "malformed position: {e}");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    NW,
    N,
    NE,
    W,
    C,
    E,
    SW,
    S,
    SE,
}

impl Quadrant {
    pub const ALL: [Quadrant; 9] = [
        Self::NW,
        Self::N,
        Self::NE,
        Self::W,
        Self::C,
        Self::E,
        Self::SW,
        Self::S,
        Self::SE,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::NW => "NW",
            Self::N => "N",
            Self::NE => "NE",
            Self::W => "W",
            Self::C => "C",
            Self::E => "E",
            Self::SW => "SW",
            Self::S => "S",
            Self::SE => "SE",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn band(value: i32) -> usize {
    if value < QUADRANT_LOW {
        0
    } else if value < QUADRANT_HIGH {
        1
    } else {
        2
    }
}

/// 3x3 bucketing of the map. `y` grows northwards.
pub fn quadrant(x: i32, y: i32) -> Quadrant {
    let column = band(x);
    let row = 2 - band(y);
    Quadrant::ALL[row * 3 + column]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// Area around still-sealed ancient containers. An empty zone matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExclusionZone {
    bounds: Option<Bounds>,
}

impl ExclusionZone {
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    pub fn from_positions(positions: &[Position]) -> Self {
        let Some(first) = positions.first() else {
            return Self::empty();
        };
        let mut bounds = Bounds {
            top: first.y,
            bottom: first.y,
            left: first.x,
            right: first.x,
        };
        for p in &positions[1..] {
            bounds.top = bounds.top.max(p.y);
            bounds.bottom = bounds.bottom.min(p.y);
            bounds.left = bounds.left.min(p.x);
            bounds.right = bounds.right.max(p.x);
        }
        bounds.top += EXCLUSION_MARGIN;
        bounds.bottom -= EXCLUSION_MARGIN;
        bounds.left -= EXCLUSION_MARGIN;
        bounds.right += EXCLUSION_MARGIN;
        Self {
            bounds: Some(bounds),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.bounds.is_some_and(|b| {
            position.x >= b.left
                && position.x <= b.right
                && position.y >= b.bottom
                && position.y <= b.top
        })
    }
}

/// Builds the zone from every ancient cryptosleep casket that still holds something.
pub fn exclusion_zone(records: &[Record<'_, '_>]) -> ExclusionZone {
    let positions: Vec<Position> = records
        .iter()
        .filter(|r| r.resolve(&["def"]) == Some(ANCIENT_CASKET_DEF))
        .filter(|r| !r.list(&["innerContainer", "innerList"]).is_empty())
        .filter_map(record_position)
        .collect();
    ExclusionZone::from_positions(&positions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Absent or unknown rotations count as north, as the game writes no `rot` for it.
    pub fn from_raw(raw: Option<i32>) -> Self {
        match raw {
            Some(1) => Self::East,
            Some(2) => Self::South,
            Some(3) => Self::West,
            _ => Self::North,
        }
    }
}

#[rustfmt::skip]
const BASIN_OFFSETS: [[(i32, i32); 4]; 4] = [
    [(0, -1), (0, 0), (0, 1), (0, 2)],   // north
    [(-1, 0), (0, 0), (1, 0), (2, 0)],   // east
    [(0, -2), (0, -1), (0, 0), (0, 1)],  // south
    [(-2, 0), (-1, 0), (0, 0), (1, 0)],  // west
];

/// The four cells a hydroponics basin occupies.
pub fn hydroponics_footprint(position: Position, rotation: Rotation) -> [Position; 4] {
    let offsets = match rotation {
        Rotation::North => BASIN_OFFSETS[0],
        Rotation::East => BASIN_OFFSETS[1],
        Rotation::South => BASIN_OFFSETS[2],
        Rotation::West => BASIN_OFFSETS[3],
    };
    offsets.map(|(dx, dy)| Position::new(position.x + dx, position.y + dy))
}
