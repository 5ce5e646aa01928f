//! Instrument registry: ticker to series mapping.
//!
//! An explicit registry owned by the runner and passed by reference, rather
//! than process-wide shared state. Instruments are processed independently;
//! iteration order does not affect correctness.

use crate::domain::ticker_data::TickerData;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    data: BTreeMap<String, TickerData>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one instrument's series, replacing any previous entry.
    pub fn insert(&mut self, data: TickerData) {
        self.data.insert(data.ticker.clone(), data);
    }

    pub fn get(&self, ticker: &str) -> Option<&TickerData> {
        self.data.get(ticker)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerData> {
        self.data.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TickerData> {
        self.data.values_mut()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn sample(ticker: &str) -> TickerData {
        TickerData::new(
            ticker.to_string(),
            vec![OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.5,
                volume: 1000.0,
            }],
        )
    }

    #[test]
    fn insert_and_get() {
        let mut portfolio = Portfolio::new();
        portfolio.insert(sample("HES"));
        portfolio.insert(sample("MRO"));

        assert_eq!(portfolio.len(), 2);
        assert!(portfolio.get("HES").is_some());
        assert!(portfolio.get("XOM").is_none());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut portfolio = Portfolio::new();
        portfolio.insert(sample("HES"));
        let mut replacement = sample("HES");
        replacement.bars.clear();
        portfolio.insert(replacement);

        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio.get("HES").unwrap().bar_count(), 0);
    }

    #[test]
    fn tickers_are_unique_and_sorted() {
        let mut portfolio = Portfolio::new();
        portfolio.insert(sample("MRO"));
        portfolio.insert(sample("HAL"));
        portfolio.insert(sample("HAL"));

        let tickers: Vec<&str> = portfolio.tickers().collect();
        assert_eq!(tickers, vec!["HAL", "MRO"]);
    }
}
