//! CSV result writer.
//!
//! Writes `<strategy>.csv` per result set into one output directory. A failure
//! on one file is logged and the remaining strategies are still written.

use crate::domain::error::ScreenerError;
use crate::domain::growth::Growth;
use crate::domain::result::ResultRowSet;
use crate::ports::result_port::ResultSinkPort;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub struct CsvResultWriter {
    output_dir: PathBuf,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    stock: &'a str,
    base: f64,
    target: f64,
    growth_pct: String,
}

impl CsvResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_one(&self, name: &str, set: &ResultRowSet) -> Result<PathBuf, ScreenerError> {
        let path = self.output_dir.join(format!("{name}.csv"));
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(|e| output_error(&path, e))?;

        wtr.write_record(set.headers())
            .map_err(|e| output_error(&path, e))?;
        for row in &set.rows {
            wtr.serialize(CsvRow {
                stock: &row.stock,
                base: row.base,
                target: row.target,
                growth_pct: format_growth(row.growth_pct),
            })
            .map_err(|e| output_error(&path, e))?;
        }
        wtr.flush()?;
        Ok(path)
    }
}

impl ResultSinkPort for CsvResultWriter {
    fn save_results(
        &self,
        results: &BTreeMap<String, ResultRowSet>,
    ) -> Result<Vec<PathBuf>, ScreenerError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ScreenerError::Output {
            reason: format!("failed to create {}: {}", self.output_dir.display(), e),
        })?;

        let mut written = Vec::with_capacity(results.len());
        for (name, set) in results {
            match self.write_one(name, set) {
                Ok(path) => {
                    info!(strategy = %name, rows = set.len(), "wrote {}", path.display());
                    written.push(path);
                }
                Err(e) => error!(strategy = %name, error = %e, "failed to save result"),
            }
        }
        Ok(written)
    }
}

fn format_growth(growth: Growth) -> String {
    match growth {
        Growth::Finite(g) => format!("{g:.2}"),
        other => other.to_string(),
    }
}

fn output_error(path: &Path, e: csv::Error) -> ScreenerError {
    ScreenerError::Output {
        reason: format!("{}: {}", path.display(), e),
    }
}
