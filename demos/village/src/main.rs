//! village — a scripted village exercising every coordination path.
//!
//! Six workers at their job sites; over a few hundred ticks the script
//! builds chests and a crafting table, stocks tools, breaks a chest, and
//! drops a training dummy, a banner and a beacon near the new guards.
//!
//! ```text
//! cargo run -p village -- [config.json] [output_dir]
//! RUST_LOG=debug cargo run -p village      # every pairing decision
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vc_behavior::ConversionRecord;
use vc_core::{Biome, BlockBox, BlockKind, BlockPos, EngineConfig, Item, Tick};
use vc_engine::{CoordinationObserver, Engine, EngineBuilder, PlacementOutcome, PopulationCounts, WorkItem};
use vc_output::{CsvWriter, PopulationLogObserver};
use vc_world::{GridWorld, GridWorldBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64 = 42;
const TOTAL_TICKS:           u64 = 400;
const SNAPSHOT_INTERVAL:     u64 = 50;
const SWEEP_INTERVAL:        u64 = 100;

fn at(x: i32, z: i32) -> BlockPos {
    BlockPos::new(x, 64, z)
}

// ── Script ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum ScriptEvent {
    Place(BlockPos, BlockKind),
    Remove(BlockPos),
    Stock(BlockPos, Item, u32),
}

fn script() -> BTreeMap<u64, Vec<ScriptEvent>> {
    use ScriptEvent::*;
    let events = [
        (5,   Place(at(12, 0), BlockKind::Chest)),         // butcher
        (8,   Place(at(22, 0), BlockKind::Chest)),         // stonecutter
        (12,  Place(at(30, 2), BlockKind::CraftingTable)), // toolsmith
        (20,  Stock(at(12, 0), Item::Axe, 1)),
        (25,  Stock(at(2, 0), Item::Wheat, 16)),
        (30,  Place(at(42, 0), BlockKind::Barrel)),        // fletcher
        (31,  Stock(at(42, 0), Item::Bow, 1)),
        (40,  Remove(at(22, 0))),
        (60,  Place(at(45, 5), BlockKind::TrainingDummy)),
        (150, Place(at(12, 3), BlockKind::Banner)),
        (160, Place(at(14, 8), BlockKind::Beacon)),
    ];
    let mut by_tick: BTreeMap<u64, Vec<ScriptEvent>> = BTreeMap::new();
    for (tick, event) in events {
        by_tick.entry(tick).or_default().push(event);
    }
    by_tick
}

/// Apply one event to the world and report it to the engine, as the host
/// world's block callbacks would.
fn apply(engine: &mut Engine<GridWorld>, event: ScriptEvent) -> Result<()> {
    match event {
        ScriptEvent::Place(pos, kind) => {
            engine.world.set_block(pos, kind);
            engine.on_block_placed(pos);
        }
        ScriptEvent::Remove(pos) => {
            engine.world.remove_block(pos);
            engine.on_block_removed(pos);
        }
        ScriptEvent::Stock(pos, item, n) => {
            engine.world.insert_item(pos, item, n).with_context(|| format!("stocking {pos}"))?;
        }
    }
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn build_world() -> Result<GridWorld> {
    let mut world = GridWorldBuilder::new(Biome::Plains)
        .biome(BlockBox::new(at(35, -20), at(60, 20)), Biome::Savanna)
        .block(at(0, 0), BlockKind::Composter)
        .block(at(2, 0), BlockKind::Chest)
        .block(at(10, 0), BlockKind::Smoker)
        .block(at(20, 0), BlockKind::Stonecutter)
        .block(at(30, 0), BlockKind::SmithingTable)
        .block(at(32, 0), BlockKind::Chest)
        .block(at(40, 0), BlockKind::FletchingTable)
        .block(at(50, 0), BlockKind::Lectern)
        .build();

    for job in [at(0, 0), at(10, 0), at(20, 0), at(30, 0), at(40, 0), at(50, 0)] {
        world.spawn_worker(job.offset(0, 0, 1), job)?;
    }
    Ok(world)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts what happened and forwards to the CSV log when one is configured.
struct DemoObserver {
    log:         Option<PopulationLogObserver<CsvWriter>>,
    pairings:    usize,
    conversions: Vec<ConversionRecord>,
    last:        Option<PopulationCounts>,
}

impl DemoObserver {
    fn new(log: Option<PopulationLogObserver<CsvWriter>>) -> Self {
        Self { log, pairings: 0, conversions: Vec::new(), last: None }
    }
}

impl CoordinationObserver for DemoObserver {
    fn on_work_item(&mut self, _tick: Tick, _item: &WorkItem, outcomes: &[PlacementOutcome]) {
        self.pairings += outcomes
            .iter()
            .filter(|o| match o {
                PlacementOutcome::ChestPaired { outcome, .. }
                | PlacementOutcome::CraftingPaired { outcome, .. } => outcome.is_paired(),
                _ => false,
            })
            .count();
    }

    fn on_conversion(&mut self, tick: Tick, record: &ConversionRecord) {
        println!(
            "  {tick}: {} {} → guard {} with {} at {}",
            record.profession, record.source, record.derived, record.item, record.pos
        );
        self.conversions.push(record.clone());
        if let Some(log) = &mut self.log {
            log.on_conversion(tick, record);
        }
    }

    fn on_snapshot(&mut self, counts: &PopulationCounts) {
        self.last = Some(counts.clone());
        if let Some(log) = &mut self.log {
            log.on_snapshot(counts);
        }
    }

    fn on_end(&mut self, final_tick: Tick) {
        if let Some(log) = &mut self.log {
            log.on_end(final_tick);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => EngineConfig {
            seed: SEED,
            conversion_sweep_interval_ticks: SWEEP_INTERVAL,
            snapshot_interval_ticks: SNAPSHOT_INTERVAL,
            total_ticks: TOTAL_TICKS,
            ..EngineConfig::default()
        },
    };
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map(PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    println!("=== village — behavior coordination demo ===");
    println!(
        "Ticks: {}  |  Sweep every: {}  |  Seed: {}",
        config.total_ticks, config.conversion_sweep_interval_ticks, config.seed
    );

    let world = build_world()?;
    let mut engine = EngineBuilder::new(config, world)
        .discover(BlockBox::new(at(-16, -16), at(66, 16)))
        .build()?;

    let log = match &output_dir {
        Some(dir) => Some(PopulationLogObserver::new(CsvWriter::new(dir)?)),
        None => None,
    };
    let mut observer = DemoObserver::new(log);

    let started = Instant::now();
    let mut script = script();
    let mut unit_runs = 0usize;
    while engine.clock.current_tick < engine.config.end_tick() {
        let now = engine.clock.current_tick.0;
        for event in script.remove(&now).unwrap_or_default() {
            apply(&mut engine, event)?;
        }
        // Stand in for each villager's goal selector.
        for agent in engine.state.units.agents() {
            unit_runs += engine.run_ready_units(agent).len();
        }
        engine.tick(&mut observer);
    }
    let final_tick = engine.clock.current_tick;
    observer.on_end(final_tick);
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "run finished");

    let counts = engine.population();
    println!();
    println!("Final tick:     {final_tick}");
    println!("Pairings:       {}", observer.pairings);
    println!("Conversions:    {}", observer.conversions.len());
    println!("Guards:         {}", counts.guards);
    for (profession, n) in &counts.villagers {
        println!("  {:<13} {n}", profession.to_string());
    }
    println!("Live units:     {}", counts.units);
    println!("Unit runs:      {unit_runs}");
    println!("Listeners:      {}", counts.listeners);
    if let Some(last) = &observer.last {
        println!("Last snapshot:  {}", last.tick);
    }

    if let Some(mut log) = observer.log.take() {
        if let Some(e) = log.take_error() {
            eprintln!("output error: {e}");
        }
        if let Some(dir) = &output_dir {
            println!("Logs written to {}", dir.display());
        }
    }
    Ok(())
}
