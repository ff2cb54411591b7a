use super::error::OrbitConfigError;
use constants::stage::STAGE_RANGES;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Reduce an unbounded angle to `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % TAU;
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    // Tiny negative inputs can round up to exactly TAU.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Inclusive angular range mapped to a stage id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageRange {
    pub id: u32,
    pub start: f64,
    pub end: f64,
}

impl StageRange {
    pub fn contains(&self, normalized: f64) -> bool {
        normalized >= self.start && normalized <= self.end
    }
}

/// Ordered, immutable stage lookup table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StageTable {
    ranges: Vec<StageRange>,
}

impl StageTable {
    /// Build a table, keeping `ranges` in the given priority order. Bounds
    /// must lie in `[0, 2π)`, the image of [`normalize_angle`].
    pub fn new(ranges: Vec<StageRange>) -> Result<Self, OrbitConfigError> {
        for (index, range) in ranges.iter().enumerate() {
            let ordered = range.start.is_finite()
                && range.end.is_finite()
                && range.start >= 0.0
                && range.end < TAU
                && range.start <= range.end;
            if !ordered {
                return Err(OrbitConfigError::InvalidStageRange {
                    id: range.id,
                    start: range.start,
                    end: range.end,
                });
            }
            if ranges[..index].iter().any(|other| other.id == range.id) {
                return Err(OrbitConfigError::DuplicateStage(range.id));
            }
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[StageRange] {
        &self.ranges
    }

    /// First range containing the normalized form of `angle`, in priority order.
    pub fn lookup(&self, angle: f64) -> Option<u32> {
        let normalized = normalize_angle(angle);
        self.ranges
            .iter()
            .find(|range| range.contains(normalized))
            .map(|range| range.id)
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            ranges: STAGE_RANGES
                .iter()
                .map(|info| StageRange {
                    id: info.id,
                    start: info.start,
                    end: info.end,
                })
                .collect(),
        }
    }
}
