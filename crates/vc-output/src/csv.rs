//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `population.csv` — one row per snapshot, one column per profession
//! - `conversions.csv` — one row per conversion

use std::fs::File;
use std::path::Path;

use csv::Writer;

use vc_core::Profession;

use crate::writer::OutputWriter;
use crate::{ConversionRow, OutputResult, PopulationRow};

/// Writes logs to two CSV files.
pub struct CsvWriter {
    population:  Writer<File>,
    conversions: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create the output directory if needed, open (or truncate) both files
    /// and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut population = Writer::from_path(dir.join("population.csv"))?;
        let mut header = vec!["tick", "guards", "units", "listeners", "candidates"];
        header.extend(Profession::ALL.iter().map(|p| p.as_str()));
        population.write_record(&header)?;

        let mut conversions = Writer::from_path(dir.join("conversions.csv"))?;
        conversions.write_record([
            "tick", "source", "derived", "profession", "kind", "item", "x", "y", "z", "variant",
        ])?;

        Ok(Self { population, conversions, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_population(&mut self, row: &PopulationRow) -> OutputResult<()> {
        let mut record = vec![
            row.tick.to_string(),
            row.guards.to_string(),
            row.units.to_string(),
            row.listeners.to_string(),
            row.candidates.to_string(),
        ];
        record.extend(row.villagers.iter().map(u64::to_string));
        self.population.write_record(&record)?;
        Ok(())
    }

    fn write_conversion(&mut self, row: &ConversionRow) -> OutputResult<()> {
        self.conversions.write_record(&[
            row.tick.to_string(),
            row.source.to_string(),
            row.derived.to_string(),
            row.profession.to_owned(),
            row.kind.to_owned(),
            row.item.to_owned(),
            row.x.to_string(),
            row.y.to_string(),
            row.z.to_string(),
            row.variant.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.population.flush()?;
        self.conversions.flush()?;
        Ok(())
    }
}
