//! CSV report adapter: writes one annotated series per instrument.
//!
//! Output is `{TICKER}_signals.csv` with the raw bar columns, the indicator
//! columns, and the two signal columns, index-aligned row by row. Missing
//! indicator cells are written as empty fields.

use crate::domain::error::BandsqueezeError;
use crate::domain::ticker_data::TickerData;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

const COLUMNS: &[&str] = &[
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "ma",
    "std",
    "bollinger_high",
    "bollinger_low",
    "intensity",
    "volume_indicator",
    "percent_b",
    "bandwidth",
    "bandwidth_high",
    "bandwidth_low",
    "thin_band_touch",
    "thin_band_indicator",
    "thick_band_indicator",
    "trend",
    "trend_of_trend",
    "open_signal",
    "close_signal",
];

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, data: &TickerData, output_dir: &Path) -> Result<(), BandsqueezeError> {
        let (indicators, signals) = match (&data.indicators, &data.signals) {
            (Some(i), Some(s)) => (i, s),
            _ => {
                return Err(BandsqueezeError::Data {
                    ticker: data.ticker.clone(),
                    reason: "series has not been annotated".to_string(),
                })
            }
        };

        let path = output_dir.join(format!("{}_signals.csv", data.ticker));
        let mut writer = csv::Writer::from_path(&path).map_err(|e| BandsqueezeError::Data {
            ticker: data.ticker.clone(),
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        writer
            .write_record(COLUMNS)
            .map_err(|e| write_err(data, e))?;

        for (i, bar) in data.bars.iter().enumerate() {
            let record = [
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
                cell(indicators.ma[i]),
                cell(indicators.std[i]),
                cell(indicators.bollinger_high[i]),
                cell(indicators.bollinger_low[i]),
                cell(indicators.intensity[i]),
                cell(indicators.volume_indicator[i]),
                cell(indicators.percent_b[i]),
                cell(indicators.bandwidth[i]),
                cell(indicators.bandwidth_high[i]),
                cell(indicators.bandwidth_low[i]),
                cell(indicators.thin_band_touch[i]),
                cell(indicators.thin_band_indicator[i]),
                cell(indicators.thick_band_indicator[i]),
                cell(indicators.trend[i]),
                cell(indicators.trend_of_trend[i]),
                signals.open_signal[i].to_string(),
                signals.close_signal[i].to_string(),
            ];
            writer.write_record(&record).map_err(|e| write_err(data, e))?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn write_err(data: &TickerData, e: csv::Error) -> BandsqueezeError {
    BandsqueezeError::Data {
        ticker: data.ticker.clone(),
        reason: format!("CSV write error: {}", e),
    }
}
