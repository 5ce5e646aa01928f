//! Rolling Bollinger-band indicator pipeline.
//!
//! Columns are computed top to bottom in dependency order; each depends only
//! on columns above it, so a single pass over the series is enough. Every
//! cell is `Option<f64>`: `None` covers both insufficient history and the
//! numeric degeneracies (zero-width band, zero range, zero volume), and
//! propagates through dependent columns.

use crate::domain::ohlcv::OhlcvBar;
use crate::domain::params::StrategyParams;
use crate::domain::rolling::{diff, finite, rolling_max, rolling_mean, rolling_min, rolling_std};

/// Fixed lookback for the intraday intensity smoothing.
pub const INTENSITY_WINDOW: usize = 20;
/// Fixed lookback for the relative volume indicator.
pub const VOLUME_WINDOW: usize = 50;
/// Trailing memory of the recent-squeeze flag.
pub const THIN_BAND_MEMORY: usize = 5;
/// A band thinner than this multiple of its rolling minimum counts as a squeeze touch.
pub const THIN_BAND_RATIO: f64 = 1.1;
/// A band wider than this fraction of its rolling maximum counts as expanded.
pub const THICK_BAND_RATIO: f64 = 0.8;
/// Smoothing windows for the momentum proxies.
pub const TREND_WINDOW: usize = 5;
pub const TREND_OF_TREND_WINDOW: usize = 15;

/// Derived statistical columns, index-aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub ma: Vec<Option<f64>>,
    pub std: Vec<Option<f64>>,
    pub bollinger_high: Vec<Option<f64>>,
    pub bollinger_low: Vec<Option<f64>>,
    pub intensity: Vec<Option<f64>>,
    pub volume_indicator: Vec<Option<f64>>,
    pub percent_b: Vec<Option<f64>>,
    pub bandwidth: Vec<Option<f64>>,
    pub bandwidth_high: Vec<Option<f64>>,
    pub bandwidth_low: Vec<Option<f64>>,
    pub thin_band_touch: Vec<Option<f64>>,
    pub thin_band_indicator: Vec<Option<f64>>,
    pub thick_band_indicator: Vec<Option<f64>>,
    pub trend: Vec<Option<f64>>,
    pub trend_of_trend: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Annotate a bar series with the full indicator column set.
    pub fn compute(bars: &[OhlcvBar], params: &StrategyParams) -> IndicatorSet {
        let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
        let volumes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.volume)).collect();

        let ma = rolling_mean(&closes, params.window);
        let std = rolling_std(&closes, params.window);

        let bollinger_high = zip_with(&ma, &std, |m, s| Some(m + params.width * s));
        let bollinger_low = zip_with(&ma, &std, |m, s| Some(m - params.width * s));

        let raw_intensity: Vec<Option<f64>> =
            bars.iter().map(|b| b.intraday_intensity()).collect();
        let intensity = rolling_mean(&raw_intensity, INTENSITY_WINDOW);

        let volume_ma = rolling_mean(&volumes, VOLUME_WINDOW);
        let volume_indicator = zip_with(&volumes, &volume_ma, |v, m| finite(100.0 * v / m));

        let percent_b: Vec<Option<f64>> = (0..bars.len())
            .map(|i| {
                let high = bollinger_high[i]?;
                let low = bollinger_low[i]?;
                let span = high - low;
                if span == 0.0 {
                    return None;
                }
                finite((bars[i].close - low) / span)
            })
            .collect();

        let bandwidth: Vec<Option<f64>> = (0..bars.len())
            .map(|i| {
                let span = bollinger_high[i]? - bollinger_low[i]?;
                finite(span / ma[i]?)
            })
            .collect();

        let bandwidth_high = rolling_max(&bandwidth, params.bandwidth_window);
        let bandwidth_low = rolling_min(&bandwidth, params.bandwidth_window);

        let thin_band_touch = zip_with(&bandwidth, &bandwidth_low, |bw, low| {
            Some(if bw < THIN_BAND_RATIO * low { 1.0 } else { 0.0 })
        });
        let thin_band_indicator = rolling_max(&thin_band_touch, THIN_BAND_MEMORY);

        let thick_band_indicator = zip_with(&bandwidth, &bandwidth_high, |bw, high| {
            Some(if bw > THICK_BAND_RATIO * high { 1.0 } else { 0.0 })
        });

        let trend = rolling_mean(&diff(&ma), TREND_WINDOW);
        let trend_of_trend = rolling_mean(&diff(&trend), TREND_OF_TREND_WINDOW);

        IndicatorSet {
            ma,
            std,
            bollinger_high,
            bollinger_low,
            intensity,
            volume_indicator,
            percent_b,
            bandwidth,
            bandwidth_high,
            bandwidth_low,
            thin_band_touch,
            thin_band_indicator,
            thick_band_indicator,
            trend,
            trend_of_trend,
        }
    }

    pub fn len(&self) -> usize {
        self.ma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma.is_empty()
    }
}

fn zip_with<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Vec<Option<f64>>
where
    F: Fn(f64, f64) -> Option<f64>,
{
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => f(*x, *y),
            _ => None,
        })
        .collect()
}
