//! Per-instrument series: bars plus the columns a run attaches to them.

use crate::domain::indicator::IndicatorSet;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::SignalColumns;

/// One instrument's ordered bar series. Bars are read-only after loading;
/// the indicator and signal columns are appended exactly once per run.
#[derive(Debug, Clone)]
pub struct TickerData {
    pub ticker: String,
    pub bars: Vec<OhlcvBar>,
    pub indicators: Option<IndicatorSet>,
    pub signals: Option<SignalColumns>,
}

impl TickerData {
    pub fn new(ticker: String, bars: Vec<OhlcvBar>) -> Self {
        Self {
            ticker,
            bars,
            indicators: None,
            signals: None,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// True once a run has attached both column sets.
    pub fn is_annotated(&self) -> bool {
        self.indicators.is_some() && self.signals.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::StrategyParams;
    use crate::domain::signal::generate_signals;
    use chrono::NaiveDate;

    fn make_bars(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn new_ticker_data_is_unannotated() {
        let td = TickerData::new("HES".into(), make_bars(&[100.0, 101.0]));
        assert_eq!(td.ticker, "HES");
        assert_eq!(td.bar_count(), 2);
        assert!(!td.is_annotated());
    }

    #[test]
    fn annotation_keeps_column_alignment() {
        let mut td = TickerData::new("HAL".into(), make_bars(&[100.0, 101.0, 102.0, 103.0]));
        let set = IndicatorSet::compute(&td.bars, &StrategyParams::default());
        let signals = generate_signals(&set);
        td.indicators = Some(set);
        td.signals = Some(signals);

        assert!(td.is_annotated());
        assert_eq!(td.indicators.as_ref().unwrap().len(), td.bar_count());
        assert_eq!(td.signals.as_ref().unwrap().len(), td.bar_count());
    }
}
