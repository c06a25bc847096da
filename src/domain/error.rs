//! Domain error types.

/// Top-level error type for quantscreen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("financial data error: {reason}")]
    DataSource { reason: String },

    #[error("strategy source error: {reason}")]
    StrategySource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown criteria type '{kind}'")]
    UnknownCriterionKind { kind: String },

    #[error("unknown metric '{metric}'")]
    UnknownMetric { metric: String },

    #[error("unknown period '{period}' in {metric}")]
    UnknownPeriod { metric: String, period: String },

    #[error("no evaluator registered for criteria type '{kind}'")]
    UnsupportedKind { kind: String },

    #[error("evaluator for '{expected}' received a '{found}' criterion")]
    CriterionMismatch { expected: String, found: String },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) | ScreenerError::Output { .. } => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::DataSource { .. } => 3,
            ScreenerError::StrategySource { .. } | ScreenerError::UnknownCriterionKind { .. } => 4,
            ScreenerError::UnknownMetric { .. }
            | ScreenerError::UnknownPeriod { .. }
            | ScreenerError::UnsupportedKind { .. }
            | ScreenerError::CriterionMismatch { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
