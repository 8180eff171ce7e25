//! `GridWorld` — an in-memory world implementing every coordination seam.
//!
//! # Data layout
//!
//! - Blocks live in a sparse `BTreeMap<BlockPos, BlockKind>`; absent = air.
//!   Ordered so box scans are deterministic.
//! - Each storage block maps to an [`Inventory`] with its own `StorageId`;
//!   replacing the block drops the inventory together with its listeners.
//! - Agents live in a `BTreeMap<AgentId, Agent>` plus an R-tree (via `rstar`)
//!   over their positions for box queries.
//! - Point-of-interest claims are a `BTreeMap<BlockPos, (PoiKind, AgentId)>`
//!   mirrored on the claiming agent's `job_site` / `home` / `meeting_point`.

use std::collections::BTreeMap;

use rstar::{RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::debug;

use vc_core::{
    AgentId, Biome, BlockBox, BlockKind, BlockPos, Item, ListenerId, PoiKind, StorageId, UnitId,
};

use crate::query::{AgentLifecycle, GoalScheduler, SpatialWorldQuery, StorageAccess};
use crate::{Agent, ChangeListener, GoalSelector, Inventory, WorldError, WorldResult};

// ── R-tree agent entry ────────────────────────────────────────────────────────

/// Entry stored in the agent index: the agent's block position and id.
#[derive(Clone, Debug, PartialEq)]
struct AgentEntry {
    point: [i32; 3],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[i32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// Sparse block world with inventories, agents and claims.
///
/// Construct with [`GridWorldBuilder`][crate::GridWorldBuilder] or
/// [`GridWorld::new`].
pub struct GridWorld {
    blocks:        BTreeMap<BlockPos, BlockKind>,
    default_biome: Biome,
    /// Later regions win over earlier ones.
    biome_regions: Vec<(BlockBox, Biome)>,

    storage_at:    BTreeMap<BlockPos, StorageId>,
    inventories:   FxHashMap<StorageId, Inventory>,
    next_storage:  StorageId,
    next_listener: ListenerId,

    agents:        BTreeMap<AgentId, Agent>,
    agent_index:   RTree<AgentEntry>,
    next_agent:    AgentId,

    claims:        BTreeMap<BlockPos, (PoiKind, AgentId)>,
    goals:         FxHashMap<AgentId, GoalSelector>,
}

impl GridWorld {
    /// An empty world where every position has `default_biome`.
    pub fn new(default_biome: Biome) -> Self {
        Self {
            blocks:        BTreeMap::new(),
            default_biome,
            biome_regions: Vec::new(),
            storage_at:    BTreeMap::new(),
            inventories:   FxHashMap::default(),
            next_storage:  StorageId(0),
            next_listener: ListenerId(0),
            agents:        BTreeMap::new(),
            agent_index:   RTree::new(),
            next_agent:    AgentId(0),
            claims:        BTreeMap::new(),
            goals:         FxHashMap::default(),
        }
    }

    // ── Blocks ────────────────────────────────────────────────────────────

    /// Place `kind` at `pos`, replacing whatever was there.
    ///
    /// A replaced storage loses its inventory (and every listener on it); a
    /// new storage gets a fresh identity even at the same coordinate.  A
    /// claimed point of interest whose block changes is released.
    pub fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        if let Some(old) = self.storage_at.remove(&pos) {
            self.inventories.remove(&old);
        }
        if let Some((_, holder)) = self.claims.remove(&pos) {
            if let Some(agent) = self.agents.get_mut(&holder) {
                forget_claim(agent, pos);
            }
        }

        if kind == BlockKind::Air {
            self.blocks.remove(&pos);
            return;
        }
        self.blocks.insert(pos, kind);

        if kind.is_storage() {
            let id = self.next_storage;
            self.next_storage = id.next();
            self.storage_at.insert(pos, id);
            self.inventories.insert(id, Inventory::new(id));
        }
    }

    /// Equivalent to `set_block(pos, BlockKind::Air)`.
    pub fn remove_block(&mut self, pos: BlockPos) {
        self.set_block(pos, BlockKind::Air);
    }

    /// Override the biome for every position inside `region`.
    pub fn set_biome_region(&mut self, region: BlockBox, biome: Biome) {
        self.biome_regions.push((region, biome));
    }

    // ── Inventories ───────────────────────────────────────────────────────

    /// Add items to the storage at `pos`, firing its change listeners.
    pub fn insert_item(&mut self, pos: BlockPos, item: Item, n: u32) -> WorldResult<()> {
        let id = self.storage_at.get(&pos).copied().ok_or(WorldError::NoStorage(pos))?;
        let inventory = self.inventories.get_mut(&id).ok_or(WorldError::NoStorage(pos))?;
        inventory.insert(item, n);
        Ok(())
    }

    /// Number of listeners installed on the storage at `pos` (0 if none).
    pub fn listener_count(&self, pos: BlockPos) -> usize {
        self.storage_at
            .get(&pos)
            .and_then(|id| self.inventories.get(id))
            .map_or(0, Inventory::listener_count)
    }

    /// Total listeners across every inventory in the world.
    pub fn total_listener_count(&self) -> usize {
        self.inventories.values().map(Inventory::listener_count).sum()
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Spawn a villager already holding the job site at `job_site`.
    pub fn spawn_worker(&mut self, pos: BlockPos, job_site: BlockPos) -> WorldResult<AgentId> {
        let profession = self.block_at(job_site).job_profession().unwrap_or_default();
        let id = self.spawn_agent(Agent::villager(pos, profession));
        self.claim_poi(id, PoiKind::JobSite, job_site)?;
        Ok(id)
    }

    /// Teleport an agent, keeping the spatial index in sync.
    pub fn move_agent(&mut self, id: AgentId, pos: BlockPos) -> WorldResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(WorldError::UnknownAgent(id))?;
        self.agent_index.remove(&AgentEntry { point: agent.pos.to_array(), id });
        agent.pos = pos;
        self.agent_index.insert(AgentEntry { point: pos.to_array(), id });
        Ok(())
    }

    /// Mark an agent dead without removing it from the world.
    pub fn kill_agent(&mut self, id: AgentId) -> WorldResult<()> {
        let agent = self.agents.get_mut(&id).ok_or(WorldError::UnknownAgent(id))?;
        agent.alive = false;
        Ok(())
    }

    /// Claim a point of interest for `id`.  Re-claiming one's own POI is a
    /// no-op; a POI held by someone else is an error.
    pub fn claim_poi(&mut self, id: AgentId, kind: PoiKind, pos: BlockPos) -> WorldResult<()> {
        if let Some(&(_, holder)) = self.claims.get(&pos) {
            if holder != id {
                return Err(WorldError::ClaimTaken { pos, holder });
            }
        }
        let agent = self.agents.get_mut(&id).ok_or(WorldError::UnknownAgent(id))?;
        let slot = match kind {
            PoiKind::JobSite      => &mut agent.job_site,
            PoiKind::Home         => &mut agent.home,
            PoiKind::MeetingPoint => &mut agent.meeting_point,
        };
        if let Some(previous) = slot.replace(pos) {
            if previous != pos {
                self.claims.remove(&previous);
            }
        }
        self.claims.insert(pos, (kind, id));
        Ok(())
    }

    /// Points of interest currently claimed by `id`.
    pub fn claims_of(&self, id: AgentId) -> Vec<(PoiKind, BlockPos)> {
        self.claims
            .iter()
            .filter(|(_, (_, holder))| *holder == id)
            .map(|(&pos, &(kind, _))| (kind, pos))
            .collect()
    }

    /// The goal selector of `id`, if the agent has ever had a goal.
    pub fn goals_of(&self, id: AgentId) -> Option<&GoalSelector> {
        self.goals.get(&id)
    }

    /// Number of agents present (alive or not).
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new(Biome::default())
    }
}

/// Clear whichever claim slot of `agent` points at `pos`.
fn forget_claim(agent: &mut Agent, pos: BlockPos) {
    for slot in [&mut agent.job_site, &mut agent.home, &mut agent.meeting_point] {
        if *slot == Some(pos) {
            *slot = None;
        }
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl SpatialWorldQuery for GridWorld {
    fn block_at(&self, pos: BlockPos) -> BlockKind {
        self.blocks.get(&pos).copied().unwrap_or_default()
    }

    fn blocks_in_box(&self, bbox: &BlockBox) -> Vec<(BlockPos, BlockKind)> {
        // Sparse world: filter the occupied set rather than walking the volume.
        self.blocks
            .range(bbox.min..=bbox.max)
            .filter(|(pos, _)| bbox.contains(**pos))
            .map(|(&pos, &kind)| (pos, kind))
            .collect()
    }

    fn entities_in_box(&self, bbox: &BlockBox, filter: &dyn Fn(&Agent) -> bool) -> Vec<AgentId> {
        let envelope = AABB::from_corners(bbox.min.to_array(), bbox.max.to_array());
        let mut ids: Vec<AgentId> = self
            .agent_index
            .locate_in_envelope(&envelope)
            .filter_map(|entry| self.agents.get(&entry.id))
            .filter(|agent| filter(agent))
            .map(|agent| agent.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    fn biome_at(&self, pos: BlockPos) -> Biome {
        self.biome_regions
            .iter()
            .rev()
            .find(|(region, _)| region.contains(pos))
            .map_or(self.default_biome, |&(_, biome)| biome)
    }
}

impl StorageAccess for GridWorld {
    fn inventory_at(&self, pos: BlockPos) -> Option<StorageId> {
        self.storage_at.get(&pos).copied()
    }

    fn item_count(&self, storage: StorageId, item: Item) -> u32 {
        self.inventories.get(&storage).map_or(0, |inv| inv.count(item))
    }

    fn extract_item(&mut self, storage: StorageId, item: Item, count: u32) -> bool {
        self.inventories
            .get_mut(&storage)
            .is_some_and(|inv| inv.extract(item, count))
    }

    fn add_change_listener(&mut self, storage: StorageId, listener: ChangeListener) -> Option<ListenerId> {
        let inventory = self.inventories.get_mut(&storage)?;
        let id = self.next_listener;
        self.next_listener = id.next();
        inventory.add_listener(id, listener);
        Some(id)
    }

    fn remove_change_listener(&mut self, storage: StorageId, id: ListenerId) -> bool {
        self.inventories
            .get_mut(&storage)
            .is_some_and(|inv| inv.remove_listener(id))
    }
}

impl GoalScheduler for GridWorld {
    fn register_goal(&mut self, agent: AgentId, priority: u8, unit: UnitId) -> bool {
        if !self.agents.contains_key(&agent) {
            return false;
        }
        self.goals.entry(agent).or_default().add(priority, unit)
    }

    fn unregister_goal(&mut self, agent: AgentId, unit: UnitId) -> bool {
        self.goals.get_mut(&agent).is_some_and(|g| g.remove(unit))
    }
}

impl AgentLifecycle for GridWorld {
    fn spawn_agent(&mut self, mut agent: Agent) -> AgentId {
        let id = self.next_agent;
        self.next_agent = id.next();
        agent.id = id;

        // Claims carried in by the record are honoured only if still free.
        let wanted = [
            (PoiKind::JobSite, agent.job_site.take()),
            (PoiKind::Home, agent.home.take()),
            (PoiKind::MeetingPoint, agent.meeting_point.take()),
        ];
        self.agent_index.insert(AgentEntry { point: agent.pos.to_array(), id });
        self.agents.insert(id, agent);
        for (kind, pos) in wanted {
            if let Some(pos) = pos {
                if let Err(e) = self.claim_poi(id, kind, pos) {
                    debug!(agent = %id, ?kind, %pos, error = %e, "claim not honoured on spawn");
                }
            }
        }
        id
    }

    fn discard_agent(&mut self, id: AgentId) -> bool {
        let Some(agent) = self.agents.remove(&id) else {
            return false;
        };
        self.agent_index.remove(&AgentEntry { point: agent.pos.to_array(), id });
        self.goals.remove(&id);
        true
    }

    fn claim_holder(&self, pos: BlockPos) -> Option<AgentId> {
        self.claims.get(&pos).map(|&(_, holder)| holder)
    }

    fn release_claims(&mut self, id: AgentId) -> usize {
        let held: Vec<BlockPos> = self
            .claims
            .iter()
            .filter(|(_, (_, holder))| *holder == id)
            .map(|(&pos, _)| pos)
            .collect();
        for pos in &held {
            self.claims.remove(pos);
        }
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.job_site = None;
            agent.home = None;
            agent.meeting_point = None;
        }
        held.len()
    }
}
