//! Plain data row types written by output backends.

use vc_behavior::ConversionRecord;
use vc_core::{Profession, Tick};
use vc_engine::PopulationCounts;

/// Population at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationRow {
    pub tick:       u64,
    /// Live villagers, indexed like [`Profession::ALL`].
    pub villagers:  [u64; Profession::ALL.len()],
    pub guards:     u64,
    pub units:      u64,
    pub listeners:  u64,
    pub candidates: u64,
}

impl From<&PopulationCounts> for PopulationRow {
    fn from(counts: &PopulationCounts) -> Self {
        Self {
            tick:       counts.tick.0,
            villagers:  Profession::ALL.map(|p| counts.villagers.get(&p).copied().unwrap_or(0) as u64),
            guards:     counts.guards as u64,
            units:      counts.units as u64,
            listeners:  counts.listeners as u64,
            candidates: counts.candidates as u64,
        }
    }
}

/// One completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRow {
    pub tick:       u64,
    pub source:     u32,
    pub derived:    u32,
    pub profession: &'static str,
    pub kind:       &'static str,
    pub item:       &'static str,
    pub x:          i32,
    pub y:          i32,
    pub z:          i32,
    pub variant:    u8,
}

impl ConversionRow {
    pub fn new(tick: Tick, record: &ConversionRecord) -> Self {
        Self {
            tick:       tick.0,
            source:     record.source.0,
            derived:    record.derived.0,
            profession: record.profession.as_str(),
            kind:       record.kind.as_str(),
            item:       record.item.as_str(),
            x:          record.pos.x,
            y:          record.pos.y,
            z:          record.pos.z,
            variant:    record.variant,
        }
    }
}
