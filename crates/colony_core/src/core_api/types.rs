use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::report::{
    DeadPawnsReport, EquipmentReport, HarvestReport, InjuriesReport, InventoryReport, QueueReport,
    RankingReport, SkillsReport, SpeciesReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Inventory,
    Equipment,
    Skills,
    Animals,
    Wildlife,
    Harvest,
    Injuries,
    ProductionQueue,
    TopSkills,
    DeadPawns,
}

impl ReportKind {
    pub const ALL: [ReportKind; 10] = [
        Self::Inventory,
        Self::Equipment,
        Self::Skills,
        Self::Animals,
        Self::Wildlife,
        Self::Harvest,
        Self::Injuries,
        Self::ProductionQueue,
        Self::TopSkills,
        Self::DeadPawns,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Inventory => "inventory",
            Self::Equipment => "equipment",
            Self::Skills => "skills",
            Self::Animals => "animals",
            Self::Wildlife => "wildlife",
            Self::Harvest => "harvest",
            Self::Injuries => "injuries",
            Self::ProductionQueue => "production-queue",
            Self::TopSkills => "top-skills",
            Self::DeadPawns => "dead-pawns",
        }
    }

    /// Reports whose run updates the stored skill baselines.
    pub fn records_skills(&self) -> bool {
        matches!(self, Self::Skills | Self::TopSkills)
    }

    /// Reports that need persons loaded.
    pub fn needs_persons(&self) -> bool {
        matches!(
            self,
            Self::Equipment | Self::Skills | Self::Injuries | Self::TopSkills
        )
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| format!("unknown report {raw:?}"))
    }
}

/// The typed result of one report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", content = "data", rename_all = "kebab-case")]
pub enum Report {
    Inventory(InventoryReport),
    Equipment(EquipmentReport),
    Skills(SkillsReport),
    Animals(SpeciesReport),
    Wildlife(SpeciesReport),
    Harvest(HarvestReport),
    Injuries(InjuriesReport),
    ProductionQueue(QueueReport),
    TopSkills(RankingReport),
    DeadPawns(DeadPawnsReport),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Inventory(_) => ReportKind::Inventory,
            Self::Equipment(_) => ReportKind::Equipment,
            Self::Skills(_) => ReportKind::Skills,
            Self::Animals(_) => ReportKind::Animals,
            Self::Wildlife(_) => ReportKind::Wildlife,
            Self::Harvest(_) => ReportKind::Harvest,
            Self::Injuries(_) => ReportKind::Injuries,
            Self::ProductionQueue(_) => ReportKind::ProductionQueue,
            Self::TopSkills(_) => ReportKind::TopSkills,
            Self::DeadPawns(_) => ReportKind::DeadPawns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReportKind;

    #[test]
    fn report_names_round_trip() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>(), Ok(kind));
        }
        assert!("payroll".parse::<ReportKind>().is_err());
    }
}
