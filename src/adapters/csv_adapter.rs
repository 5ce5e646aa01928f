//! CSV file data adapter.
//!
//! Reads one `{TICKER}.csv` per instrument from a base directory, columns
//! `date,open,high,low,close,volume` with a header row, dates `%Y-%m-%d`.

use crate::domain::error::BandsqueezeError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn data_err(ticker: &str, reason: String) -> BandsqueezeError {
    BandsqueezeError::Data {
        ticker: ticker.to_string(),
        reason,
    }
}

fn field(record: &csv::StringRecord, index: usize, name: &str) -> Result<String, String> {
    record
        .get(index)
        .map(str::to_string)
        .ok_or_else(|| format!("missing {} column", name))
}

fn numeric(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, String> {
    field(record, index, name)?
        .parse()
        .map_err(|e| format!("invalid {} value: {}", name, e))
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(&self, ticker: &str) -> Result<Vec<OhlcvBar>, BandsqueezeError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path)
            .map_err(|e| data_err(ticker, format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| data_err(ticker, format!("CSV parse error: {}", e)))?;

            let date_str =
                field(&record, 0, "date").map_err(|reason| data_err(ticker, reason))?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| data_err(ticker, format!("invalid date format: {}", e)))?;

            let row = (|| -> Result<OhlcvBar, String> {
                Ok(OhlcvBar {
                    date,
                    open: numeric(&record, 1, "open")?,
                    high: numeric(&record, 2, "high")?,
                    low: numeric(&record, 3, "low")?,
                    close: numeric(&record, 4, "close")?,
                    volume: numeric(&record, 5, "volume")?,
                })
            })()
            .map_err(|reason| data_err(ticker, reason))?;

            bars.push(row);
        }

        if bars.is_empty() {
            return Err(BandsqueezeError::NoData {
                ticker: ticker.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_tickers(&self) -> Result<Vec<String>, BandsqueezeError> {
        let mut tickers = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    tickers.push(stem.to_string());
                }
            }
        }
        tickers.sort();
        Ok(tickers)
    }
}
