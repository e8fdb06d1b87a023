//! Statistics Engine
//!
//! Pure statistics over fixed-length reading windows and the per-cycle
//! summary record built from them.

mod statistics;
mod summary;

pub use statistics::{max, mean, median, min, std_dev, SensorStatistics, StatsError};
pub use summary::{KindSummary, SummaryRecord, SUMMARY_FIELDS};
