//! Strategy parameter set.
//!
//! Missing keys fall back to their documented defaults and are never an
//! error; explicitly supplied values are validated once at construction.

use crate::domain::error::BandsqueezeError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_WIDTH: f64 = 2.0;
pub const DEFAULT_BANDWIDTH_WINDOW: usize = 125;
pub const DEFAULT_PREP_BUY_WINDOW: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    /// Moving-average / standard-deviation lookback.
    pub window: usize,
    /// Band multiplier around the moving average.
    pub width: f64,
    /// Lookback for bandwidth extrema.
    pub bandwidth_window: usize,
    /// Reserved; accepted but not consumed by the current rule set.
    pub prep_buy_window: usize,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            window: DEFAULT_WINDOW,
            width: DEFAULT_WIDTH,
            bandwidth_window: DEFAULT_BANDWIDTH_WINDOW,
            prep_buy_window: DEFAULT_PREP_BUY_WINDOW,
        }
    }
}

impl StrategyParams {
    /// Read the `[strategy]` section, substituting defaults for absent keys.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BandsqueezeError> {
        let params = StrategyParams {
            window: read_window(config, "window", DEFAULT_WINDOW)?,
            width: config.get_double("strategy", "width", DEFAULT_WIDTH),
            bandwidth_window: read_window(config, "bandwidth_window", DEFAULT_BANDWIDTH_WINDOW)?,
            prep_buy_window: read_window(config, "prep_buy_window", DEFAULT_PREP_BUY_WINDOW)?,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), BandsqueezeError> {
        if self.window == 0 {
            return Err(invalid("window", "window must be positive"));
        }
        if self.width <= 0.0 || !self.width.is_finite() {
            return Err(invalid("width", "width must be a positive number"));
        }
        if self.bandwidth_window == 0 {
            return Err(invalid("bandwidth_window", "bandwidth_window must be positive"));
        }
        if self.prep_buy_window == 0 {
            return Err(invalid("prep_buy_window", "prep_buy_window must be positive"));
        }
        Ok(())
    }

    /// Bars before which every signal-relevant indicator is still undefined.
    pub fn warmup(&self) -> usize {
        self.window.max(self.bandwidth_window)
    }
}

fn read_window(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
) -> Result<usize, BandsqueezeError> {
    let value = config.get_int("strategy", key, default as i64);
    usize::try_from(value).map_err(|_| invalid(key, "must be a non-negative integer"))
}

fn invalid(key: &str, reason: &str) -> BandsqueezeError {
    BandsqueezeError::ConfigInvalid {
        section: "strategy".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
