mod animals;
mod dead;
mod equipment;
mod harvest;
mod injuries;
mod inventory;
mod queue;
mod ranking;
mod skills;

pub use animals::{SpeciesReport, SpeciesRow, build_species};
pub use dead::{DeadPawn, DeadPawnsReport, build_dead_pawns};
pub use equipment::{EquipmentReport, LoadoutRow, build_equipment};
pub use harvest::{
    GrowthStage, HarvestReport, HarvestRow, Location, basin_cells, build_harvest, is_crop,
};
pub use injuries::{InjuriesReport, InjuryRow, build_injuries};
pub use inventory::{CategoryGroup, CountRow, InventoryOptions, InventoryReport, build_inventory};
pub use queue::{QueueReport, QueueRow, build_queue};
pub use ranking::{DEFAULT_TOP, RankEntry, RankingReport, SkillRanking, build_ranking};
pub use skills::{SkillRow, SkillsReport, build_skills};
