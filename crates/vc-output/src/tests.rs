//! Integration tests for vc-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{ConversionRow, PopulationRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn population_row(tick: u64) -> PopulationRow {
        let mut villagers = [0; 11];
        villagers[1] = 3; // farmers
        PopulationRow { tick, villagers, guards: 2, units: 4, listeners: 3, candidates: 1 }
    }

    fn conversion_row(tick: u64) -> ConversionRow {
        ConversionRow {
            tick,
            source:     4,
            derived:    9,
            profession: "butcher",
            kind:       "guard",
            item:       "axe",
            x:          1,
            y:          64,
            z:          -2,
            variant:    1,
        }
    }

    fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created_in_new_directory() {
        let dir = tmp();
        let out = dir.path().join("nested");
        let _w = CsvWriter::new(&out).unwrap();
        assert!(out.join("population.csv").exists());
        assert!(out.join("conversions.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("population.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(&headers[..6], ["tick", "guards", "units", "listeners", "candidates", "unemployed"]);
        assert_eq!(headers.len(), 16);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("conversions.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "source", "derived", "profession", "kind", "item", "x", "y", "z", "variant"]);
    }

    #[test]
    fn population_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_population(&population_row(0)).unwrap();
        w.write_population(&population_row(20)).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir.path().join("population.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "20"); // tick
        assert_eq!(&rows[1][1], "2"); // guards
        assert_eq!(&rows[1][6], "3"); // farmer
    }

    #[test]
    fn conversion_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_conversion(&conversion_row(100)).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir.path().join("conversions.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "100");
        assert_eq!(&rows[0][3], "butcher");
        assert_eq!(&rows[0][8], "-2");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use vc_core::{Biome, BlockKind, BlockPos, EngineConfig, Item};
    use vc_engine::{CoordinationObserver, EngineBuilder, PopulationCounts};
    use vc_world::GridWorldBuilder;

    use crate::{ConversionRow, CsvWriter, OutputError, OutputResult, OutputWriter, PopulationLogObserver, PopulationRow};

    fn p(x: i32, z: i32) -> BlockPos {
        BlockPos::new(x, 64, z)
    }

    /// Writer whose every write fails.
    struct BrokenWriter {
        attempts: usize,
    }

    impl OutputWriter for BrokenWriter {
        fn write_population(&mut self, _row: &PopulationRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_conversion(&mut self, _row: &ConversionRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn engine_run_logs_snapshots_and_conversions() {
        let dir = TempDir::new().unwrap();
        let mut world = GridWorldBuilder::new(Biome::Plains)
            .block(p(0, 0), BlockKind::Smoker)
            .block(p(2, 0), BlockKind::Chest)
            .build();
        world.spawn_worker(p(0, 1), p(0, 0)).unwrap();
        world.insert_item(p(2, 0), Item::Axe, 1).unwrap();

        let config = EngineConfig {
            conversion_sweep_interval_ticks: 10,
            snapshot_interval_ticks: 10,
            total_ticks: 25,
            ..EngineConfig::default()
        };
        let mut engine = EngineBuilder::new(config, world)
            .discover(vc_core::BlockBox::around(p(0, 0), 8))
            .build()
            .unwrap();

        let mut obs = PopulationLogObserver::new(CsvWriter::new(dir.path()).unwrap());
        engine.run(&mut obs);
        assert!(obs.take_error().is_none());
        // Snapshots at 0, 10, 20 and one conversion at tick 0.
        assert_eq!(obs.rows_written(), 4);

        let mut rdr = csv::Reader::from_path(dir.path().join("conversions.csv")).unwrap();
        let conversions: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(conversions.len(), 1);
        assert_eq!(&conversions[0][3], "butcher");
        assert_eq!(&conversions[0][5], "axe");

        let mut rdr = csv::Reader::from_path(dir.path().join("population.csv")).unwrap();
        let population: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(population.len(), 3);
        assert_eq!(&population[2][1], "1"); // guards
    }

    #[test]
    fn first_error_is_kept_and_writes_continue() {
        let mut obs = PopulationLogObserver::new(BrokenWriter { attempts: 0 });
        obs.on_snapshot(&PopulationCounts::default());
        obs.on_snapshot(&PopulationCounts::default());

        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
        assert_eq!(obs.into_writer().attempts, 2);
    }
}
