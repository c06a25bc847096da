//! INI strategy loader.
//!
//! Every `*.ini` file in the active directory defines one strategy, named
//! after the file stem. Files that fail to parse are logged and skipped.

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    CRITERIA_SECTION, parse_growth_fraction, require, validate_criterion_config,
};
use crate::domain::criterion::{Criteria, Criterion, CriterionKind, QoQGrowth};
use crate::domain::error::ScreenerError;
use crate::ports::config_port::ConfigPort;
use crate::ports::strategy_port::StrategyLoaderPort;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct IniStrategyLoader {
    active_dir: PathBuf,
}

impl IniStrategyLoader {
    pub fn new(active_dir: impl Into<PathBuf>) -> Self {
        Self {
            active_dir: active_dir.into(),
        }
    }

    pub fn active_dir(&self) -> &Path {
        &self.active_dir
    }

    /// Strategy files in the active directory, sorted by path.
    pub fn strategy_files(&self) -> Result<Vec<PathBuf>, ScreenerError> {
        let entries = fs::read_dir(&self.active_dir).map_err(|e| ScreenerError::StrategySource {
            reason: format!(
                "failed to read directory {}: {}",
                self.active_dir.display(),
                e
            ),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScreenerError::StrategySource {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            let is_ini = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"));
            if is_ini && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl StrategyLoaderPort for IniStrategyLoader {
    fn load_active_criteria(&self) -> Result<Criteria, ScreenerError> {
        let mut criteria = Criteria::new();
        for path in self.strategy_files()? {
            let Some(name) = strategy_name(&path) else {
                continue;
            };
            match load_strategy_file(&path) {
                Ok(criterion) => {
                    if criteria.insert(name.clone(), criterion).is_some() {
                        warn!(
                            strategy = %name,
                            "duplicate strategy name, {} replaces the earlier file",
                            path.display()
                        );
                    }
                }
                Err(e) => warn!(strategy = %name, error = %e, "skipping strategy file"),
            }
        }
        info!(
            count = criteria.len(),
            "loaded active strategies from {}",
            self.active_dir.display()
        );
        Ok(criteria)
    }
}

fn strategy_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}

/// Parse a single strategy file.
pub fn load_strategy_file(path: &Path) -> Result<Criterion, ScreenerError> {
    let config = FileConfigAdapter::from_file(path).map_err(|e| ScreenerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    build_criterion(&config)
}

/// Build a criterion from the `[criteria]` section.
pub fn build_criterion(config: &dyn ConfigPort) -> Result<Criterion, ScreenerError> {
    let kind = validate_criterion_config(config)?;
    match kind {
        CriterionKind::QoQGrowth => Ok(Criterion::QoQGrowth(QoQGrowth {
            metric: require(config, CRITERIA_SECTION, "metric")?,
            base_period: require(config, CRITERIA_SECTION, "base_quarter")?,
            target_period: require(config, CRITERIA_SECTION, "target_quarter")?,
            min_growth_fraction: parse_growth_fraction(config, CRITERIA_SECTION, "min_growth_pct")?,
        })),
    }
}
