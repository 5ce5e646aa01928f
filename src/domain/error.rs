//! Domain error types.
//!
//! The indicator and signal core has no fatal paths; its degeneracies degrade
//! to missing values and "no signal". These errors belong to the boundaries:
//! configuration, data loading, and report writing.

/// Top-level error type for bandsqueeze.
#[derive(Debug, thiserror::Error)]
pub enum BandsqueezeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error for {ticker}: {reason}")]
    Data { ticker: String, reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BandsqueezeError> for std::process::ExitCode {
    fn from(err: &BandsqueezeError) -> Self {
        let code: u8 = match err {
            BandsqueezeError::Io(_) => 1,
            BandsqueezeError::ConfigParse { .. } | BandsqueezeError::ConfigInvalid { .. } => 2,
            BandsqueezeError::Data { .. } | BandsqueezeError::NoData { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
