use roxmltree::Document;

use crate::bill::Bill;
use crate::census::Census;
use crate::item::{Item, MaxHealthRegistry, classify};
use crate::person::{Person, load_persons};
use crate::record::Record;
use crate::report::{
    DEFAULT_TOP, DeadPawnsReport, EquipmentReport, HarvestReport, InjuriesReport,
    InventoryOptions, InventoryReport, QueueReport, RankingReport, SkillsReport, SpeciesReport,
    basin_cells, build_dead_pawns, build_equipment, build_harvest, build_injuries,
    build_inventory, build_queue, build_ranking, build_skills, build_species,
};
use crate::snapshot::SnapshotStore;
use crate::spatial::{exclusion_zone, record_position};

use super::error::{CoreError, CoreErrorCode};
use super::types::{Report, ReportKind};

const SAVE_ROOT: &str = "savegame";

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub inventory: InventoryOptions,
    /// Entries per skill in the top-skills ranking.
    pub top: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            inventory: InventoryOptions::default(),
            top: DEFAULT_TOP,
        }
    }
}

/// One parsed save. Every report call makes its own pass over the things,
/// with a fresh max-health registry.
#[derive(Debug)]
pub struct Session<'input> {
    document: Document<'input>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_str<'input>(&self, text: &'input str) -> Result<Session<'input>, CoreError> {
        let document = Document::parse(text).map_err(|e| {
            CoreError::new(CoreErrorCode::Parse, format!("failed to parse save: {e}"))
        })?;
        let root = document.root_element().tag_name().name();
        if !root.eq_ignore_ascii_case(SAVE_ROOT) {
            tracing::warn!(root, "document root is not a savegame element");
        }
        Ok(Session { document })
    }
}

impl<'input> Session<'input> {
    fn root(&self) -> Record<'_, 'input> {
        Record::new(self.document.root_element())
    }

    fn census(&self) -> Census<'_, 'input> {
        Census::take(self.root())
    }

    /// Game version recorded in the save header, if any.
    pub fn game_version(&self) -> Option<&str> {
        self.root().resolve(&["meta", "gameVersion"])
    }

    fn classify_items(
        &self,
        census: &Census<'_, 'input>,
        registry: &mut MaxHealthRegistry,
    ) -> Vec<Item> {
        let mut items: Vec<Item> = census
            .storables
            .iter()
            .map(|record| classify(record, registry))
            .collect();

        for minified in &census.minified {
            let inner = minified.list(&["innerContainer", "innerList"]);
            let Some(thing) = inner.first() else {
                tracing::debug!(record = ?minified, "minified thing with nothing inside");
                continue;
            };
            let mut item = classify(thing, registry);
            item.count = 1;
            item.position = record_position(minified);
            items.push(item);
        }
        items
    }

    pub fn inventory(&self, options: InventoryOptions) -> InventoryReport {
        let census = self.census();
        let mut registry = MaxHealthRegistry::new();
        let items = self.classify_items(&census, &mut registry);
        let zone = exclusion_zone(&census.all);
        tracing::info!(
            items = items.len(),
            tracked = registry.len(),
            sealed_zone = !zone.is_empty(),
            "classified inventory"
        );
        build_inventory(&items, &zone, &registry, options)
    }

    /// All colonists and prisoners, in document order.
    pub fn persons(&self, store: &mut dyn SnapshotStore) -> Vec<Person> {
        let census = self.census();
        let mut registry = MaxHealthRegistry::new();
        load_persons(&census.persons, &mut registry, store)
    }

    pub fn equipment(&self, store: &mut dyn SnapshotStore) -> EquipmentReport {
        let census = self.census();
        let mut registry = MaxHealthRegistry::new();
        // Stored gear also sets the condition maxima worn gear is measured against.
        self.classify_items(&census, &mut registry);
        let persons = load_persons(&census.persons, &mut registry, store);
        build_equipment(&persons, &registry)
    }

    pub fn skills(&self, store: &mut dyn SnapshotStore) -> SkillsReport {
        build_skills(&self.persons(store))
    }

    pub fn injuries(&self, store: &mut dyn SnapshotStore) -> InjuriesReport {
        build_injuries(&self.persons(store))
    }

    pub fn top_skills(&self, store: &mut dyn SnapshotStore, top: usize) -> RankingReport {
        build_ranking(&self.persons(store), top)
    }

    pub fn animals(&self) -> SpeciesReport {
        build_species(&self.census().animals, true)
    }

    pub fn wildlife(&self) -> SpeciesReport {
        build_species(&self.census().wildlife, false)
    }

    pub fn harvest(&self) -> HarvestReport {
        let census = self.census();
        build_harvest(&census.plants, &basin_cells(&census.basins))
    }

    pub fn bills(&self) -> Vec<Bill> {
        self.census()
            .workbenches
            .iter()
            .flat_map(|bench| bench.list(&["billStack", "bills"]))
            .map(|record| Bill::from_record(&record))
            .collect()
    }

    pub fn production_queue(&self) -> QueueReport {
        build_queue(&self.bills())
    }

    pub fn dead_pawns(&self) -> DeadPawnsReport {
        build_dead_pawns(&self.census().corpses)
    }

    pub fn run(
        &self,
        kind: ReportKind,
        options: &RunOptions,
        store: &mut dyn SnapshotStore,
    ) -> Report {
        tracing::debug!(report = %kind, "running report");
        match kind {
            ReportKind::Inventory => Report::Inventory(self.inventory(options.inventory)),
            ReportKind::Equipment => Report::Equipment(self.equipment(store)),
            ReportKind::Skills => Report::Skills(self.skills(store)),
            ReportKind::Animals => Report::Animals(self.animals()),
            ReportKind::Wildlife => Report::Wildlife(self.wildlife()),
            ReportKind::Harvest => Report::Harvest(self.harvest()),
            ReportKind::Injuries => Report::Injuries(self.injuries(store)),
            ReportKind::ProductionQueue => Report::ProductionQueue(self.production_queue()),
            ReportKind::TopSkills => Report::TopSkills(self.top_skills(store, options.top)),
            ReportKind::DeadPawns => Report::DeadPawns(self.dead_pawns()),
        }
    }
}
