use super::entities::DataPoint;

/// Range-search strategy over a series: maps `[lo, hi]` bounds (already
/// shifted by the overlay's index offset) to a half-open `(start, end)`
/// index pair within `data`. An empty or fully out-of-range request returns
/// an empty pair, never an error.
pub trait RangeSearch: Send + Sync {
    fn search(&self, data: &[DataPoint], lo: f64, hi: f64) -> (usize, usize);
}

/// Offset-addressed search: a point's position in the vector is its address
/// on the shared index axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexSearch;

impl RangeSearch for IndexSearch {
    fn search(&self, data: &[DataPoint], lo: f64, hi: f64) -> (usize, usize) {
        if data.is_empty() || hi < lo {
            return (0, 0);
        }
        let start = (lo.ceil().max(0.0) as usize).min(data.len());
        let end = if hi < 0.0 {
            0
        } else {
            (hi.floor() as usize).saturating_add(1)
        };
        (start, end.clamp(start, data.len()))
    }
}

/// Timestamp-addressed search: binary search over `time`, which must be
/// non-decreasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSearch;

impl RangeSearch for TimeSearch {
    fn search(&self, data: &[DataPoint], lo: f64, hi: f64) -> (usize, usize) {
        if data.is_empty() || hi < lo {
            return (0, 0);
        }
        let start = data.partition_point(|p| p.time < lo);
        let end = data.partition_point(|p| p.time <= hi);
        (start, end.max(start))
    }
}
