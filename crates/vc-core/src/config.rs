//! Engine configuration.
//!
//! Loaded from JSON by the application and passed to `EngineBuilder`.
//! Pairing distances are policy constants in `vc-behavior::pairing`, not
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, SimClock, Tick};

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World seed used for deterministic variant selection.
    pub seed: u64,

    /// Simulation steps per simulated second.
    pub ticks_per_second: u32,

    /// Run the conversion sweep every N ticks.  Default: 100 (5 s at 20 t/s).
    pub conversion_sweep_interval_ticks: u64,

    /// Emit a population snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Ticks simulated by `Engine::run`.
    pub total_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks_per_second: SimClock::DEFAULT_TICKS_PER_SECOND,
            conversion_sweep_interval_ticks: 100,
            snapshot_interval_ticks: 1_200,
            total_ticks: 24_000,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.ticks_per_second == 0 {
            return Err(CoreError::Config("ticks_per_second must be positive".into()));
        }
        if self.conversion_sweep_interval_ticks == 0 {
            return Err(CoreError::Config(
                "conversion_sweep_interval_ticks must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The tick at which `Engine::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_second)
    }
}
