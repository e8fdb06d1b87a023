//! Summary Record

use crate::statistics::{SensorStatistics, StatsError};
use ring_buffer::SensorReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of `f32` fields in a summary record
pub const SUMMARY_FIELDS: usize = 12;

/// Transmitted statistics for one sensor kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub std_dev: f32,
    pub max: f32,
    pub min: f32,
    pub median: f32,
}

impl From<SensorStatistics> for KindSummary {
    fn from(stats: SensorStatistics) -> Self {
        Self {
            std_dev: stats.std_dev,
            max: stats.max,
            min: stats.min,
            median: stats.median,
        }
    }
}

/// Per-cycle summary, grouped per kind in the order PIR, humidity/heat, LDR
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub pir: KindSummary,
    pub humidity_heat: KindSummary,
    pub ldr: KindSummary,
}

impl SummaryRecord {
    /// Split readings into one sequence per kind and summarize each
    pub fn from_readings(readings: &[SensorReading]) -> Result<Self, StatsError> {
        let pir: Vec<f32> = readings.iter().map(|r| r.pir).collect();
        let humidity_heat: Vec<f32> = readings.iter().map(|r| r.humidity_heat).collect();
        let ldr: Vec<f32> = readings.iter().map(|r| r.ldr).collect();

        let pir = SensorStatistics::compute(&pir)?;
        let humidity_heat = SensorStatistics::compute(&humidity_heat)?;
        let ldr = SensorStatistics::compute(&ldr)?;

        debug!(
            "Window of {} readings: pir mean={:.2}, humidity_heat mean={:.2}, ldr mean={:.2}",
            readings.len(),
            pir.mean,
            humidity_heat.mean,
            ldr.mean
        );

        Ok(Self {
            pir: pir.into(),
            humidity_heat: humidity_heat.into(),
            ldr: ldr.into(),
        })
    }

    /// Fields in transmission order
    pub fn values(&self) -> [f32; SUMMARY_FIELDS] {
        let mut values = [0.0; SUMMARY_FIELDS];
        for (chunk, kind) in values
            .chunks_exact_mut(4)
            .zip([&self.pir, &self.humidity_heat, &self.ldr])
        {
            chunk.copy_from_slice(&[kind.std_dev, kind.max, kind.min, kind.median]);
        }
        values
    }

    /// Rebuild a record from fields in transmission order
    pub fn from_values(values: [f32; SUMMARY_FIELDS]) -> Self {
        let kind = |i: usize| KindSummary {
            std_dev: values[i],
            max: values[i + 1],
            min: values[i + 2],
            median: values[i + 3],
        };
        Self {
            pir: kind(0),
            humidity_heat: kind(4),
            ldr: kind(8),
        }
    }
}
