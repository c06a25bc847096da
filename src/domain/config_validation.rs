//! Configuration validation.
//!
//! Checks screener and strategy files before anything is loaded.

use crate::domain::criterion::CriterionKind;
use crate::domain::error::ScreenerError;
use crate::domain::financial_data::Metric;
use crate::ports::config_port::ConfigPort;

pub const CRITERIA_SECTION: &str = "criteria";

pub fn validate_screener_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_data_source(config)?;
    validate_strategy_dir(config)?;
    Ok(())
}

pub fn validate_criterion_config(config: &dyn ConfigPort) -> Result<CriterionKind, ScreenerError> {
    if !config.has_section(CRITERIA_SECTION) {
        return Err(ScreenerError::ConfigMissing {
            section: CRITERIA_SECTION.to_string(),
            key: "type".to_string(),
        });
    }
    let kind: CriterionKind = require(config, CRITERIA_SECTION, "type")?.parse()?;
    match kind {
        CriterionKind::QoQGrowth => {
            require(config, CRITERIA_SECTION, "metric")?;
            require(config, CRITERIA_SECTION, "base_quarter")?;
            require(config, CRITERIA_SECTION, "target_quarter")?;
            parse_growth_fraction(config, CRITERIA_SECTION, "min_growth_pct")?;
        }
    }
    Ok(kind)
}

/// A required, non-blank string value.
pub fn require(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, ScreenerError> {
    config
        .get_trimmed(section, key)
        .ok_or_else(|| ScreenerError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

/// A required finite number.
pub fn parse_growth_fraction(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<f64, ScreenerError> {
    let raw = require(config, section, key)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ScreenerError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("'{raw}' is not a finite number"),
        }),
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    if config.get_trimmed("data", "dir").is_some() {
        return Ok(());
    }
    for metric in Metric::ALL {
        if config.get_trimmed("data", metric.key()).is_none() {
            return Err(ScreenerError::ConfigMissing {
                section: "data".to_string(),
                key: metric.key().to_string(),
            });
        }
    }
    Ok(())
}

fn validate_strategy_dir(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    require(config, "strategies", "active_dir").map(|_| ())
}
