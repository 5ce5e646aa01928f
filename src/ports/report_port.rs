//! Report output port trait.

use crate::domain::error::BandsqueezeError;
use crate::domain::ticker_data::TickerData;
use std::path::Path;

/// Port for writing an annotated instrument series to analytics/plotting
/// collaborators.
pub trait ReportPort {
    fn write(&self, data: &TickerData, output_dir: &Path) -> Result<(), BandsqueezeError>;
}
