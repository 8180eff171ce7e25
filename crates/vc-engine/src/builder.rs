//! Fluent builder for constructing an [`Engine`].

use vc_behavior::{AgentConversionService, CoordState, ProfessionBehavior};
use vc_core::{BlockBox, EngineConfig, Profession};
use vc_world::World;

use crate::{Engine, EngineError, EngineResult, JobBlockPairingCoordinator, WorkItem, WorkQueue};

/// Fluent builder for [`Engine<W>`].
///
/// # Optional inputs
///
/// | Method               | Default                               |
/// |----------------------|---------------------------------------|
/// | `.behavior(p, b)`    | `ProfessionBehavior::for_profession`  |
/// | `.discover(bbox)`    | nothing queued                        |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, world)
///     .discover(BlockBox::around(BlockPos::new(0, 64, 0), 32))
///     .build()?;
/// engine.run(&mut NoopObserver);
/// ```
pub struct EngineBuilder<W: World> {
    config:    EngineConfig,
    world:     W,
    overrides: Vec<(Profession, ProfessionBehavior)>,
    regions:   Vec<BlockBox>,
}

impl<W: World> EngineBuilder<W> {
    pub fn new(config: EngineConfig, world: W) -> Self {
        Self { config, world, overrides: Vec::new(), regions: Vec::new() }
    }

    /// Use `behavior` for workers of `profession`.
    pub fn behavior(mut self, profession: Profession, behavior: ProfessionBehavior) -> Self {
        self.overrides.push((profession, behavior));
        self
    }

    /// Queue a region load for the first tick, pairing whatever already
    /// stands in `bbox`.
    pub fn discover(mut self, bbox: BlockBox) -> Self {
        self.regions.push(bbox);
        self
    }

    /// Validate inputs and return a ready-to-run [`Engine`].
    pub fn build(self) -> EngineResult<Engine<W>> {
        self.config.validate()?;

        let mut coordinator = JobBlockPairingCoordinator::new();
        for (profession, behavior) in self.overrides {
            if behavior.profession() != profession {
                return Err(EngineError::BehaviorMismatch { profession, behavior: behavior.profession() });
            }
            coordinator.set_behavior(profession, behavior);
        }

        let clock = self.config.make_clock();
        let mut work = WorkQueue::new();
        for bbox in self.regions {
            work.push(clock.current_tick, WorkItem::RegionLoaded { bbox });
        }

        Ok(Engine {
            conversions: AgentConversionService::new(self.config.seed),
            clock,
            config: self.config,
            world: self.world,
            state: CoordState::new(),
            coordinator,
            work,
        })
    }
}
