//! Strategy runner: one indicator pass and one signal pass per instrument.

use crate::domain::indicator::IndicatorSet;
use crate::domain::params::StrategyParams;
use crate::domain::portfolio::Portfolio;
use crate::domain::signal::{generate_signals, PositionState};
use tracing::{debug, warn};

/// Per-run outcome. An instrument ending with an open position is reportable
/// but non-fatal; there is no more data to act on, so no close is forced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub tickers_run: usize,
    pub open_at_end: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StrategyRunner {
    params: StrategyParams,
}

impl StrategyRunner {
    pub fn new(params: StrategyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    /// Annotate every registered instrument in place.
    ///
    /// Each instrument gets one indicator pass and one signal pass, in bar
    /// order; instruments are independent of each other.
    pub fn run(&self, portfolio: &mut Portfolio) -> RunSummary {
        let mut summary = RunSummary::default();

        for data in portfolio.iter_mut() {
            let indicators = IndicatorSet::compute(&data.bars, &self.params);
            let signals = generate_signals(&indicators);

            debug!(
                ticker = %data.ticker,
                bars = data.bar_count(),
                opens = signals.open_signal.iter().filter(|v| **v != 0.0).count(),
                closes = signals.close_signal.iter().filter(|v| **v != 0.0).count(),
                "annotated instrument"
            );

            if signals.final_state != PositionState::Flat {
                warn!(
                    ticker = %data.ticker,
                    state = ?signals.final_state,
                    "instrument ended with open position"
                );
                summary.open_at_end.push(data.ticker.clone());
            }

            data.indicators = Some(indicators);
            data.signals = Some(signals);
            summary.tickers_run += 1;
        }

        summary
    }
}
