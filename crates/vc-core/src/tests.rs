//! Unit tests for vc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StorageId, UnitId};

    #[test]
    fn next_is_monotonic() {
        assert_eq!(AgentId(4).next(), AgentId(5));
        assert!(UnitId(0) < UnitId(0).next());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StorageId::default(), StorageId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{BlockBox, BlockPos};

    #[test]
    fn squared_distance() {
        let a = BlockPos::new(0, 64, 0);
        assert_eq!(a.distance_sq(BlockPos::new(2, 64, 0)), 4);
        assert_eq!(a.distance_sq(BlockPos::new(1, 65, 1)), 3);
    }

    #[test]
    fn within_is_inclusive() {
        let a = BlockPos::new(0, 0, 0);
        assert!(a.within(BlockPos::new(3, 0, 0), 3.0));
        assert!(!a.within(BlockPos::new(3, 1, 0), 3.0));
        assert!(!a.within(BlockPos::new(5, 0, 0), 3.0));
    }

    #[test]
    fn box_around_and_contains() {
        let b = BlockBox::around(BlockPos::new(10, 10, 10), 2);
        assert!(b.contains(BlockPos::new(8, 12, 10)));
        assert!(!b.contains(BlockPos::new(7, 10, 10)));
        assert_eq!(b.volume(), 125);
    }

    #[test]
    fn box_normalises_corners() {
        let b = BlockBox::new(BlockPos::new(5, 0, -1), BlockPos::new(1, 3, -4));
        assert_eq!(b.min, BlockPos::new(1, 0, -4));
        assert_eq!(b.max, BlockPos::new(5, 3, -1));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(10).offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn every_interval() {
        assert!(Tick(0).is_every(100));
        assert!(Tick(200).is_every(100));
        assert!(!Tick(150).is_every(100));
        assert!(!Tick(0).is_every(0), "zero interval never fires");
    }

    #[test]
    fn clock_seconds() {
        let mut clock = SimClock::default();
        for _ in 0..45 {
            clock.advance();
        }
        assert_eq!(clock.elapsed_secs(), 2);
        assert_eq!(clock.ticks_for_secs(5), 100);
    }
}

#[cfg(test)]
mod rng {
    use crate::{BlockPos, PositionRng};

    #[test]
    fn same_position_same_draws() {
        let pos = BlockPos::new(12, 70, -40);
        let mut a = PositionRng::new(9, pos);
        let mut b = PositionRng::new(9, pos);
        for _ in 0..50 {
            assert_eq!(a.gen_range(0u32..1000), b.gen_range(0u32..1000));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = PositionRng::new(0, BlockPos::default());
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod vocab {
    use crate::{BlockKind, Capability, CapabilitySet, Profession};

    #[test]
    fn job_block_round_trips_through_profession() {
        for p in Profession::ALL {
            if let Some(block) = p.job_block() {
                assert_eq!(block.job_profession(), Some(p), "{p}");
            }
        }
        assert_eq!(Profession::Unemployed.job_block(), None);
    }

    #[test]
    fn storage_blocks() {
        assert!(BlockKind::Chest.is_storage());
        assert!(BlockKind::Barrel.is_storage());
        assert!(!BlockKind::CraftingTable.is_storage());
    }

    #[test]
    fn capability_insert_is_idempotent() {
        let mut caps = CapabilitySet::default();
        assert!(caps.is_empty());
        assert!(caps.insert(Capability::Trained));
        assert!(!caps.insert(Capability::Trained));
        assert!(caps.contains(Capability::Trained));
        assert!(!caps.contains(Capability::Regeneration));
    }
}

#[cfg(test)]
mod config {
    use crate::EngineConfig;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.conversion_sweep_interval_ticks, 100);
        assert_eq!(cfg.ticks_per_second, 20);
    }

    #[test]
    fn zero_sweep_interval_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "conversion_sweep_interval_ticks": 0 }"#);
        assert!(err.is_err());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ seed: "),
            Err(crate::CoreError::Parse(_))
        ));
    }
}
