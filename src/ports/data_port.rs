//! Data access port trait.
//!
//! Sourcing of historical bars is an external collaborator; the core only
//! requires a time-ascending series per ticker.

use crate::domain::error::BandsqueezeError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    fn fetch_ohlcv(&self, ticker: &str) -> Result<Vec<OhlcvBar>, BandsqueezeError>;

    fn list_tickers(&self) -> Result<Vec<String>, BandsqueezeError>;
}
