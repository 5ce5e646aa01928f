//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// Per-bar intraday intensity:
    /// (2*close - high - low) / ((high - low) * volume).
    ///
    /// Returns `None` for a degenerate bar (zero range or zero volume);
    /// the value is missing rather than an infinity.
    pub fn intraday_intensity(&self) -> Option<f64> {
        let range = self.high - self.low;
        if range == 0.0 || self.volume == 0.0 {
            return None;
        }
        let raw = (2.0 * self.close - self.high - self.low) / (range * self.volume);
        raw.is_finite().then_some(raw)
    }
}
