use super::entities::DataPoint;
use serde::{Deserialize, Serialize};

/// Value Object - Visible range
///
/// Bounds are timestamps or shared-index positions depending on the chart's
/// `index_based` mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Range bounds shifted into an overlay's native index space.
    pub fn shifted(&self, offset: i64) -> (f64, f64) {
        (self.start - offset as f64, self.end - offset as f64)
    }
}

impl From<(f64, f64)> for Range {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

/// Value Object - Window over an overlay's data
///
/// Half-open `[start, end)` sub-range of the series the window was computed
/// for. Possibly empty; never reaches outside the data it is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowView {
    pub start: usize,
    pub end: usize,
}

impl WindowView {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Materializes the windowed slice. Out-of-bounds indices clamp to the
    /// data length, so a stale window yields an empty subset instead of
    /// panicking.
    pub fn make_subset(&self, data: &[DataPoint]) -> Vec<DataPoint> {
        let start = self.start.min(data.len());
        let end = self.end.clamp(start, data.len());
        data[start..end].to_vec()
    }
}
