/// Stage boundaries tuned against the island model, in radians over `[0, 2π)`.
/// Rows are listed in lookup priority order.
pub struct StageRangeInfo {
    pub id: u32,
    pub start: f64,
    pub end: f64,
}

pub const STAGE_RANGES: &[StageRangeInfo] = &[
    StageRangeInfo {
        id: 1,
        start: 0.85,
        end: 1.3,
    },
    StageRangeInfo {
        id: 2,
        start: 1.4,
        end: 2.6,
    },
    StageRangeInfo {
        id: 3,
        start: 3.25,
        end: 4.95,
    },
    StageRangeInfo {
        id: 4,
        start: 5.45,
        end: 5.85,
    },
];

