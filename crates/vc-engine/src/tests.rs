//! Integration tests for vc-engine.

use vc_behavior::{ConversionRecord, PairingOutcome, UnitKind};
use vc_core::{AgentId, AgentKind, Biome, BlockBox, BlockKind, BlockPos, EngineConfig, Item, PoiKind, Tick};
use vc_world::{AgentLifecycle, GridWorld, GridWorldBuilder, SpatialWorldQuery, StorageAccess};

use crate::{
    CoordinationObserver, Engine, EngineBuilder, NoopObserver, PlacementOutcome, PopulationCounts, WorkItem,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(x: i32, z: i32) -> BlockPos {
    BlockPos::new(x, 64, z)
}

fn test_config() -> EngineConfig {
    EngineConfig {
        seed: 7,
        conversion_sweep_interval_ticks: 100,
        snapshot_interval_ticks: 0,
        total_ticks: 300,
        ..EngineConfig::default()
    }
}

/// Engine over a world with `job` at (0,0) and one worker holding it.
fn engine_with(job: BlockKind) -> (Engine<GridWorld>, AgentId) {
    let mut world = GridWorldBuilder::new(Biome::Plains).block(p(0, 0), job).build();
    let agent = world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
    let engine = EngineBuilder::new(test_config(), world).build().unwrap();
    (engine, agent)
}

/// Place a block in the world and report it the way the world would.
fn place(engine: &mut Engine<GridWorld>, pos: BlockPos, kind: BlockKind) {
    engine.world.set_block(pos, kind);
    engine.on_block_placed(pos);
}

fn remove(engine: &mut Engine<GridWorld>, pos: BlockPos) {
    engine.world.remove_block(pos);
    engine.on_block_removed(pos);
}

fn step(engine: &mut Engine<GridWorld>) {
    engine.tick(&mut NoopObserver);
}

fn goal_count(engine: &Engine<GridWorld>, agent: AgentId) -> usize {
    engine.world.goals_of(agent).map_or(0, |g| g.len())
}

fn item_count(engine: &Engine<GridWorld>, pos: BlockPos, item: Item) -> u32 {
    let storage = engine.world.inventory_at(pos).unwrap();
    engine.world.item_count(storage, item)
}

#[derive(Default)]
struct Recorder {
    work:        Vec<(Tick, WorkItem, Vec<PlacementOutcome>)>,
    conversions: Vec<(Tick, ConversionRecord)>,
    snapshots:   Vec<PopulationCounts>,
    ended:       Option<Tick>,
}

impl CoordinationObserver for Recorder {
    fn on_work_item(&mut self, tick: Tick, item: &WorkItem, outcomes: &[PlacementOutcome]) {
        self.work.push((tick, item.clone(), outcomes.to_vec()));
    }

    fn on_conversion(&mut self, tick: Tick, record: &ConversionRecord) {
        self.conversions.push((tick, record.clone()));
    }

    fn on_snapshot(&mut self, counts: &PopulationCounts) {
        self.snapshots.push(counts.clone());
    }

    fn on_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── Work queue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod work_queue {
    use super::*;
    use crate::WorkQueue;

    #[test]
    fn drains_due_items_in_push_order() {
        let mut q = WorkQueue::new();
        q.push(Tick(1), WorkItem::Placed { pos: p(1, 0) });
        q.push(Tick(0), WorkItem::Removed { pos: p(0, 0) });
        q.push(Tick(1), WorkItem::Placed { pos: p(2, 0) });
        q.push(Tick(5), WorkItem::Placed { pos: p(5, 0) });

        let due = q.drain_due(Tick(1));
        assert_eq!(
            due,
            vec![
                WorkItem::Removed { pos: p(0, 0) },
                WorkItem::Placed { pos: p(1, 0) },
                WorkItem::Placed { pos: p(2, 0) },
            ]
        );
        assert_eq!(q.len(), 1);
        assert!(q.drain_due(Tick(4)).is_empty());
        assert_eq!(q.drain_due(Tick(5)), vec![WorkItem::Placed { pos: p(5, 0) }]);
        assert!(q.is_empty());
    }

    #[test]
    fn callbacks_only_enqueue() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);

        assert_eq!(engine.pending_work(), 1);
        assert_eq!(engine.state.units.unit_count(agent), 0);
        assert_eq!(engine.world.total_listener_count(), 0);

        step(&mut engine);
        assert_eq!(engine.pending_work(), 0);
        assert_eq!(engine.state.units.unit_count(agent), 1);
    }

    #[test]
    fn placement_reads_the_block_at_handling_time() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        // Broken again before the engine got to it.
        engine.world.remove_block(p(2, 0));

        let mut rec = Recorder::default();
        engine.tick(&mut rec);
        assert_eq!(rec.work[0].2, vec![PlacementOutcome::Ignored]);
        assert_eq!(engine.state.units.unit_count(agent), 0);
    }
}

// ── Pairing scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod pairing {
    use super::*;

    #[test]
    fn stonecutter_chest_within_and_beyond_threshold() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        let unit = engine.state.units.get(agent, UnitKind::Craft).unwrap();
        assert_eq!(unit.targets().storage, p(2, 0));
        assert_eq!(engine.world.listener_count(p(2, 0)), 1);

        remove(&mut engine, p(2, 0));
        place(&mut engine, p(5, 0), BlockKind::Chest);
        let mut rec = Recorder::default();
        engine.tick(&mut rec);

        assert_eq!(engine.state.units.unit_count(agent), 0);
        assert_eq!(goal_count(&engine, agent), 0);
        assert!(engine.state.listeners.registration(agent).is_none());
        assert_eq!(engine.world.total_listener_count(), 0);
        assert_eq!(rec.work[1].2, vec![PlacementOutcome::NoAgentInRange { pos: p(5, 0) }]);
    }

    #[test]
    fn repeated_placement_events_register_once() {
        let (mut engine, agent) = engine_with(BlockKind::Composter);
        place(&mut engine, p(2, 0), BlockKind::Barrel);
        for _ in 0..3 {
            engine.on_block_placed(p(2, 0));
        }
        step(&mut engine);
        step(&mut engine);
        engine.on_block_placed(p(2, 0));
        step(&mut engine);

        assert_eq!(engine.state.units.unit_count(agent), 1);
        assert_eq!(goal_count(&engine, agent), 1);
        assert_eq!(engine.world.listener_count(p(2, 0)), 1);
    }

    #[test]
    fn nearest_job_site_wins_the_chest() {
        let (mut engine, near) = engine_with(BlockKind::Stonecutter);
        engine.world.set_block(p(4, 0), BlockKind::Composter);
        let far = engine.world.spawn_worker(p(4, 1), p(4, 0)).unwrap();

        place(&mut engine, p(1, 0), BlockKind::Chest);
        step(&mut engine);
        assert_eq!(engine.state.units.unit_count(near), 1);
        assert_eq!(engine.state.units.unit_count(far), 0);
    }

    #[test]
    fn artisan_chest_then_crafting_shares_three_coordinates() {
        let (mut engine, agent) = engine_with(BlockKind::SmithingTable);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        place(&mut engine, p(0, 2), BlockKind::CraftingTable);
        step(&mut engine);

        let distribute = *engine.state.units.get(agent, UnitKind::Distribute).unwrap().targets();
        let craft = *engine.state.units.get(agent, UnitKind::Craft).unwrap().targets();
        assert_eq!(distribute, craft);
        assert_eq!((craft.job_site, craft.storage, craft.crafting), (p(0, 0), p(2, 0), Some(p(0, 2))));
        assert_eq!(goal_count(&engine, agent), 2);
        assert_eq!(engine.world.listener_count(p(2, 0)), 1);
    }

    #[test]
    fn same_tick_chest_and_crafting_end_consistent() {
        let (mut engine, agent) = engine_with(BlockKind::BrewingStand);
        place(&mut engine, p(0, 2), BlockKind::CraftingTable);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        // The crafting event ran first and found the chest already standing;
        // the chest event then kept the recorded crafting surface.
        assert_eq!(engine.state.units.unit_count(agent), 2);
        let distribute = *engine.state.units.get(agent, UnitKind::Distribute).unwrap().targets();
        let craft = *engine.state.units.get(agent, UnitKind::Craft).unwrap().targets();
        assert_eq!(distribute, craft);
    }

    #[test]
    fn crafting_table_before_chest_still_gets_craft_unit() {
        let (mut engine, agent) = engine_with(BlockKind::SmithingTable);
        place(&mut engine, p(0, 2), BlockKind::CraftingTable);
        step(&mut engine);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        let distribute = *engine.state.units.get(agent, UnitKind::Distribute).unwrap().targets();
        let craft = *engine.state.units.get(agent, UnitKind::Craft).unwrap().targets();
        assert_eq!(distribute, craft);
        assert_eq!(craft.crafting, Some(p(0, 2)));
        assert_eq!(goal_count(&engine, agent), 2);
    }

    #[test]
    fn worker_far_from_its_job_site_still_pairs() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        engine.world.move_agent(agent, p(40, 40)).unwrap();
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        assert_eq!(engine.state.units.unit_count(agent), 1);
    }

    #[test]
    fn crafting_without_storage_waits() {
        let (mut engine, agent) = engine_with(BlockKind::SmithingTable);
        let mut rec = Recorder::default();
        place(&mut engine, p(0, 2), BlockKind::CraftingTable);
        engine.tick(&mut rec);
        assert_eq!(rec.work[0].2, vec![PlacementOutcome::AwaitingStorage { agent }]);
        assert!(engine.state.is_clean(agent));
    }

    #[test]
    fn job_site_claim_pairs_existing_structures() {
        let world = GridWorldBuilder::new(Biome::Plains)
            .block(p(0, 0), BlockKind::SmithingTable)
            .block(p(-2, 0), BlockKind::Chest)
            .block(p(0, -3), BlockKind::CraftingTable)
            .build();
        let mut engine = EngineBuilder::new(test_config(), world).build().unwrap();
        let agent = engine.world.spawn_worker(p(1, 1), p(0, 0)).unwrap();
        engine.on_job_site_claimed(agent);
        step(&mut engine);

        let craft = engine.state.units.get(agent, UnitKind::Craft).unwrap().targets();
        assert_eq!(craft.storage, p(-2, 0));
        assert_eq!(craft.crafting, Some(p(0, -3)));
        assert_eq!(engine.world.agent(agent).unwrap().paired_crafting, Some(p(0, -3)));
    }

    #[test]
    fn region_load_pairs_what_is_already_built() {
        let mut world = GridWorldBuilder::new(Biome::Plains)
            .block(p(0, 0), BlockKind::SmithingTable)
            .block(p(0, 2), BlockKind::CraftingTable)
            .block(p(2, 0), BlockKind::Chest)
            .build();
        let agent = world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
        let mut engine = EngineBuilder::new(test_config(), world)
            .discover(BlockBox::around(p(0, 0), 16))
            .build()
            .unwrap();
        assert_eq!(engine.pending_work(), 1);

        step(&mut engine);
        assert_eq!(engine.state.units.unit_count(agent), 2);
        let craft = engine.state.units.get(agent, UnitKind::Craft).unwrap().targets();
        assert_eq!(craft.storage, p(2, 0));
    }
}

// ── Invalidation ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod invalidation {
    use super::*;

    #[test]
    fn dead_agent_is_swept_within_one_tick() {
        let (mut engine, agent) = engine_with(BlockKind::Smoker);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        assert_eq!(engine.state.listeners.len(), 1);

        engine.world.kill_agent(agent).unwrap();
        let summary = engine.tick(&mut NoopObserver);
        assert_eq!(summary.swept, 1);
        assert!(engine.state.is_clean(agent));
        assert_eq!(engine.world.total_listener_count(), 0);
        assert!(engine.state.candidates.is_empty());
    }

    #[test]
    fn broken_job_block_tears_down_pairing() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        remove(&mut engine, p(0, 0));
        let mut rec = Recorder::default();
        engine.tick(&mut rec);

        assert!(matches!(
            rec.work[0].2.as_slice(),
            [PlacementOutcome::Revalidated { outcome: PairingOutcome::Invalidated(_), .. }]
        ));
        assert!(engine.state.is_clean(agent));
        assert_eq!(engine.world.total_listener_count(), 0);
        assert_eq!(engine.world.agent(agent).unwrap().paired_storage, None);
    }

    #[test]
    fn broken_crafting_table_keeps_storage_unit() {
        let (mut engine, agent) = engine_with(BlockKind::SmithingTable);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        place(&mut engine, p(0, 2), BlockKind::CraftingTable);
        step(&mut engine);
        assert_eq!(engine.state.units.unit_count(agent), 2);

        remove(&mut engine, p(0, 2));
        step(&mut engine);
        assert!(engine.state.units.get(agent, UnitKind::Craft).is_none());
        assert_eq!(engine.state.units.get(agent, UnitKind::Distribute).unwrap().targets().crafting, None);
        assert_eq!(goal_count(&engine, agent), 1);
    }

    /// Farmer paired at a composter (0,0) with a chest at (2,0); a second
    /// job block at (20,0) with its own chest at (22,0).
    fn farmer_with_second_site(second: BlockKind) -> (Engine<GridWorld>, AgentId) {
        let mut world = GridWorldBuilder::new(Biome::Plains)
            .block(p(0, 0), BlockKind::Composter)
            .block(p(2, 0), BlockKind::Chest)
            .block(p(20, 0), second)
            .block(p(22, 0), BlockKind::Chest)
            .build();
        let agent = world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
        let mut engine = EngineBuilder::new(test_config(), world).build().unwrap();
        engine.on_job_site_claimed(agent);
        step(&mut engine);
        assert!(engine.state.units.get(agent, UnitKind::Harvest).is_some());
        (engine, agent)
    }

    fn reclaim(engine: &mut Engine<GridWorld>, agent: AgentId, job: BlockPos) {
        engine.world.claim_poi(agent, PoiKind::JobSite, job).unwrap();
        engine.on_job_site_claimed(agent);
        step(engine);
    }

    #[test]
    fn new_job_site_replaces_old_units() {
        let (mut engine, agent) = farmer_with_second_site(BlockKind::SmithingTable);
        reclaim(&mut engine, agent, p(20, 0));

        let units: Vec<(UnitKind, BlockPos)> =
            engine.state.units.units_of(agent).iter().map(|u| (u.kind(), u.targets().job_site)).collect();
        assert_eq!(units, vec![(UnitKind::Distribute, p(20, 0))]);
        assert_eq!(goal_count(&engine, agent), 1);
        assert_eq!(engine.world.listener_count(p(2, 0)), 0);
        assert_eq!(engine.world.listener_count(p(22, 0)), 1);
    }

    #[test]
    fn new_reactive_job_site_tears_everything_down() {
        let (mut engine, agent) = farmer_with_second_site(BlockKind::Lectern);
        reclaim(&mut engine, agent, p(20, 0));

        assert!(engine.state.is_clean(agent));
        assert_eq!(engine.world.total_listener_count(), 0);
        assert_eq!(goal_count(&engine, agent), 0);
        assert_eq!(engine.world.agent(agent).unwrap().paired_storage, None);
    }

    #[test]
    fn replaced_chest_gets_a_fresh_listener() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        let first = engine.state.listeners.registration(agent).unwrap().storage;

        remove(&mut engine, p(2, 0));
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        let second = engine.state.listeners.registration(agent).unwrap().storage;
        assert_ne!(first, second);
        assert_eq!(engine.world.total_listener_count(), 1);
        assert_eq!(engine.state.units.unit_count(agent), 1);
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod conversion {
    use vc_core::Capability;

    use super::*;

    #[test]
    fn butcher_with_axe_becomes_guard_at_sweep() {
        let (mut engine, agent) = engine_with(BlockKind::Smoker);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine); // tick 0: paired, sweep finds no axe

        engine.world.insert_item(p(2, 0), Item::Axe, 1).unwrap();
        assert!(engine.state.candidates.contains(agent));

        let mut rec = Recorder::default();
        engine.run_ticks(98, &mut rec); // ticks 1..=98
        assert!(rec.conversions.is_empty());
        engine.run_ticks(2, &mut rec); // ticks 99, 100

        assert_eq!(rec.conversions.len(), 1);
        let (tick, record) = &rec.conversions[0];
        assert_eq!(*tick, Tick(100));
        assert_eq!(record.source, agent);
        assert!(engine.world.agent(agent).is_none());

        let guard = engine.world.agent(record.derived).unwrap();
        assert_eq!(guard.kind, AgentKind::Guard);
        assert_eq!(guard.equipment.main_hand, Some(Item::Axe));
        assert_eq!(item_count(&engine, p(2, 0), Item::Axe), 0);
        assert_eq!(engine.world.claim_holder(p(0, 0)), None);
        assert!(engine.state.is_clean(agent));
        assert_eq!(engine.world.total_listener_count(), 0);
    }

    #[test]
    fn repeated_inventory_changes_queue_one_candidate() {
        let (mut engine, agent) = engine_with(BlockKind::Grindstone);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        for _ in 0..5 {
            engine.world.insert_item(p(2, 0), Item::IronIngot, 1).unwrap();
        }
        assert_eq!(engine.state.candidates.len(), 1);
        assert!(engine.state.candidates.contains(agent));
    }

    #[test]
    fn no_item_means_no_conversion() {
        let (mut engine, agent) = engine_with(BlockKind::Smoker);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        engine.world.insert_item(p(2, 0), Item::Beef, 4).unwrap();
        let mut rec = Recorder::default();
        engine.run_ticks(201, &mut rec);

        assert!(rec.conversions.is_empty());
        assert!(engine.world.is_alive(agent));
        assert_eq!(item_count(&engine, p(2, 0), Item::Beef), 4);
        assert_eq!(engine.state.units.unit_count(agent), 1);
    }

    #[test]
    fn fletcher_needs_training_dummy_and_inherits_its_capability() {
        let (mut engine, agent) = engine_with(BlockKind::FletchingTable);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        engine.world.insert_item(p(2, 0), Item::Bow, 1).unwrap();
        let mut rec = Recorder::default();
        engine.run_ticks(101, &mut rec); // sweeps at 0 and 100

        assert!(rec.conversions.is_empty());
        assert!(engine.state.candidates.contains(agent));

        place(&mut engine, p(6, 6), BlockKind::TrainingDummy);
        engine.run_ticks(100, &mut rec); // sweep at 200

        assert_eq!(rec.conversions.len(), 1);
        let guard = engine.world.agent(rec.conversions[0].1.derived).unwrap();
        assert!(guard.capabilities.contains(Capability::Trained));
        assert!(!guard.capabilities.contains(Capability::Regeneration));
    }

    #[test]
    fn modifier_flags_guards_in_range_once() {
        let (mut engine, _) = engine_with(BlockKind::Lectern);
        let near = engine.world.spawn_agent(vc_world::Agent::guard(p(10, 0)));
        let far = engine.world.spawn_agent(vc_world::Agent::guard(p(40, 0)));

        let mut rec = Recorder::default();
        place(&mut engine, p(0, 5), BlockKind::Beacon);
        engine.tick(&mut rec);
        engine.on_block_placed(p(0, 5));
        engine.tick(&mut rec);

        assert_eq!(
            rec.work[0].2,
            vec![PlacementOutcome::ModifierApplied { capability: Capability::Regeneration, flagged: vec![near] }]
        );
        assert_eq!(
            rec.work[1].2,
            vec![PlacementOutcome::ModifierApplied { capability: Capability::Regeneration, flagged: vec![] }]
        );
        assert!(engine.world.agent(near).unwrap().capabilities.contains(Capability::Regeneration));
        assert!(engine.world.agent(far).unwrap().capabilities.is_empty());
    }

    #[test]
    fn banner_rallies_nearest_guard() {
        let (mut engine, _) = engine_with(BlockKind::Lectern);
        let a = engine.world.spawn_agent(vc_world::Agent::guard(p(3, 3)));
        let b = engine.world.spawn_agent(vc_world::Agent::guard(p(1, 1)));

        place(&mut engine, p(0, 0).offset(0, 1, 0), BlockKind::Banner);
        step(&mut engine);
        assert_eq!(engine.world.agent(b).unwrap().rally_point, Some(p(0, 0).offset(0, 1, 0)));
        assert_eq!(engine.world.agent(a).unwrap().rally_point, None);
    }
}

// ── Builder and run loop ──────────────────────────────────────────────────────

#[cfg(test)]
mod running {
    use vc_behavior::ProfessionBehavior;
    use vc_core::Profession;

    use super::*;
    use crate::EngineError;

    #[test]
    fn ready_units_run_then_wait_for_cooldown_or_change() {
        let (mut engine, agent) = engine_with(BlockKind::Stonecutter);
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);

        let craft = engine.state.units.get(agent, UnitKind::Craft).unwrap().id();
        assert_eq!(engine.run_ready_units(agent), vec![craft]);
        assert!(engine.run_ready_units(agent).is_empty());

        engine.world.insert_item(p(2, 0), Item::Wheat, 1).unwrap();
        assert_eq!(engine.run_ready_units(agent), vec![craft]);
        assert_eq!(engine.state.units.get(agent, UnitKind::Craft).unwrap().runs(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig { conversion_sweep_interval_ticks: 0, ..test_config() };
        let result = EngineBuilder::new(config, GridWorld::default()).build();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn behavior_override_must_match_profession() {
        let librarian = ProfessionBehavior::for_profession(Profession::Librarian).unwrap();
        let result = EngineBuilder::new(test_config(), GridWorld::default())
            .behavior(Profession::Farmer, librarian)
            .build();
        assert!(matches!(result, Err(EngineError::BehaviorMismatch { .. })));
    }

    #[test]
    fn behavior_override_changes_dispatch() {
        let mut world = GridWorldBuilder::new(Biome::Plains).block(p(0, 0), BlockKind::Composter).build();
        let agent = world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
        let mut engine = EngineBuilder::new(test_config(), world)
            .behavior(Profession::Farmer, ProfessionBehavior::Reactive { profession: Profession::Farmer })
            .build()
            .unwrap();
        place(&mut engine, p(2, 0), BlockKind::Chest);
        step(&mut engine);
        assert!(engine.state.is_clean(agent));
    }

    #[test]
    fn run_stops_at_end_tick_and_snapshots() {
        let mut world = GridWorldBuilder::new(Biome::Plains).block(p(0, 0), BlockKind::Composter).build();
        world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
        world.spawn_agent(vc_world::Agent::guard(p(5, 5)));
        let config = EngineConfig { total_ticks: 50, snapshot_interval_ticks: 20, ..test_config() };
        let mut engine = EngineBuilder::new(config, world).build().unwrap();

        let mut rec = Recorder::default();
        engine.run(&mut rec);

        assert_eq!(rec.ended, Some(Tick(50)));
        let ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(20), Tick(40)]);
        let last = rec.snapshots.last().unwrap();
        assert_eq!(last.guards, 1);
        assert_eq!(last.villager_total(), 1);
        assert_eq!(last.villagers.get(&vc_core::Profession::Farmer), Some(&1));
    }
}
