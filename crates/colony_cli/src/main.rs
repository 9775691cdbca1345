use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colony_core::config::AppConfig;
use colony_core::core_api::{Engine, ReportKind, RunOptions};
use colony_core::report::{DEFAULT_TOP, InventoryOptions};
use colony_core::snapshot::{JsonSnapshotStore, MemorySnapshotStore};
use colony_render::{TextRenderOptions, render_json, render_text};
use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const APP_NAME: &str = "colony-report";
const CONFIG_FILE: &str = "config.toml";
const SNAPSHOT_FILE: &str = "skills.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportArg {
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

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Inventory => ReportKind::Inventory,
            ReportArg::Equipment => ReportKind::Equipment,
            ReportArg::Skills => ReportKind::Skills,
            ReportArg::Animals => ReportKind::Animals,
            ReportArg::Wildlife => ReportKind::Wildlife,
            ReportArg::Harvest => ReportKind::Harvest,
            ReportArg::Injuries => ReportKind::Injuries,
            ReportArg::ProductionQueue => ReportKind::ProductionQueue,
            ReportArg::TopSkills => ReportKind::TopSkills,
            ReportArg::DeadPawns => ReportKind::DeadPawns,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Save file path or scenario name from the config file.
    #[arg(value_name = "SAVE")]
    save: Option<String>,
    #[arg(value_enum, default_value_t = ReportArg::Inventory)]
    report: ReportArg,
    #[arg(long)]
    json: bool,
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    snapshots: Option<PathBuf>,
    /// Entries per skill for the top-skills report.
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,
    /// Count items inside unopened ancient vaults.
    #[arg(long = "include-sealed")]
    include_sealed: bool,
    #[arg(long = "include-biocoded")]
    include_biocoded: bool,
    /// Do not update stored skill baselines.
    #[arg(long = "no-save")]
    no_save: bool,
    #[arg(long, default_value_t = 3)]
    columns: usize,
    #[arg(long = "list-scenarios", conflicts_with = "rebuild_config")]
    list_scenarios: bool,
    /// Drop scenarios whose save is gone and add new saves by file name.
    #[arg(long = "rebuild-config")]
    rebuild_config: bool,
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.save.is_none() && !cli.list_scenarios && !cli.rebuild_config {
        eprintln!("a SAVE path or scenario name is required");
        process::exit(2);
    }

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

fn config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
        None => PathBuf::from(format!("{APP_NAME}.toml")),
    }
}

fn snapshots_path(cli: &Cli, config: &AppConfig) -> PathBuf {
    if let Some(path) = cli.snapshots.clone().or_else(|| config.snapshots.clone()) {
        return path;
    }
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(SNAPSHOT_FILE),
        None => PathBuf::from(SNAPSHOT_FILE),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = config_path(cli);
    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    if cli.list_scenarios {
        for name in config.scenario_names() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.rebuild_config {
        return rebuild_config(&mut config, &config_path);
    }

    let Some(save) = cli.save.as_deref() else {
        return Ok(());
    };
    let save_path = config.resolve_save(save);
    run_report(cli, &config, &save_path)
}

fn rebuild_config(config: &mut AppConfig, path: &Path) -> Result<()> {
    let summary = config.rebuild()?;
    config
        .save(path)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    for name in &summary.added {
        println!("added: {name}");
    }
    for name in &summary.removed {
        println!("removed: {name}");
    }
    Ok(())
}

fn run_report(cli: &Cli, config: &AppConfig, save_path: &Path) -> Result<()> {
    let kind = ReportKind::from(cli.report);
    let text = fs::read_to_string(save_path)
        .with_context(|| format!("failed to read save {}", save_path.display()))?;
    let session = Engine::new()
        .open_str(&text)
        .with_context(|| format!("failed to open save {}", save_path.display()))?;
    if let Some(version) = session.game_version() {
        tracing::debug!(version, "opened save");
    }

    let options = RunOptions {
        inventory: InventoryOptions {
            include_sealed: cli.include_sealed,
            include_biocoded: cli.include_biocoded,
        },
        top: cli.top,
    };

    let report = if kind.needs_persons() {
        let path = snapshots_path(cli, config);
        let mut store = JsonSnapshotStore::open(&path)
            .with_context(|| format!("failed to open snapshots {}", path.display()))?;
        let report = session.run(kind, &options, &mut store);
        if kind.records_skills() && !cli.no_save {
            store.flush()?;
        }
        report
    } else {
        let mut store = MemorySnapshotStore::default();
        session.run(kind, &options, &mut store)
    };

    if cli.json {
        let value = render_json(&report);
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("failed to encode report")?
        );
    } else {
        let text = render_text(
            &report,
            TextRenderOptions {
                verbose: cli.verbose,
                columns: cli.columns,
            },
        );
        print!("{text}");
    }
    Ok(())
}
