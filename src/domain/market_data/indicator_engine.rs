use super::entities::PricePoint;
use super::value_objects::{Price, Timestamp};
use crate::domain::errors::ValidationError;
use crate::domain::logging::LogComponent;
use std::collections::{BTreeMap, BTreeSet};

const COMPONENT: LogComponent = LogComponent::Domain("MovingAverage");

/// Window lengths offered by the dashboard
pub const SMA_WINDOWS: [usize; 4] = [10, 20, 50, 100];

/// Simple moving average of one window length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmaSeries {
    pub window: usize,
    pub points: Vec<PricePoint>,
}

impl SmaSeries {
    pub fn value_at(&self, timestamp: Timestamp) -> Option<Price> {
        self.points
            .binary_search_by_key(&timestamp, |p| p.timestamp)
            .ok()
            .map(|idx| self.points[idx].close)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trailing unweighted mean over `window` closes.
///
/// One output per position with a full window, stamped with the window's last
/// input, so the output has `max(0, n - window + 1)` points. Each window is summed
/// on its own, so a NaN close only blanks the windows that contain it. A zero
/// window yields an empty series.
pub fn simple_moving_average(points: &[PricePoint], window: usize) -> SmaSeries {
    if window == 0 || points.len() < window {
        return SmaSeries { window, points: Vec::new() };
    }

    let divisor = window as f64;
    let averaged = points
        .windows(window)
        .map(|slice| {
            let sum: f64 = slice.iter().map(|p| p.close.value()).sum();
            PricePoint::new(slice[window - 1].timestamp, Price::from(sum / divisor))
        })
        .collect();

    SmaSeries { window, points: averaged }
}

/// Reject window lengths no average can be computed for
pub fn validate_window(window: usize) -> Result<usize, ValidationError> {
    if window == 0 { Err(ValidationError::InvalidWindow(window)) } else { Ok(window) }
}

/// Identity of an SMA input sequence: which payload it came from and which slice of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputKey {
    pub generation: u64,
    pub first: Option<Timestamp>,
    pub last: Option<Timestamp>,
    pub len: usize,
}

impl InputKey {
    pub fn of(generation: u64, points: &[PricePoint]) -> Self {
        Self {
            generation,
            first: points.first().map(|p| p.timestamp),
            last: points.last().map(|p| p.timestamp),
            len: points.len(),
        }
    }
}

/// Active SMA overlays, memoised per input.
///
/// Toggling a window only computes that window; the others are reused as long as
/// the input key is unchanged. All windows see the same, already range-filtered,
/// input: values near the left edge of a view are averaged from in-view closes
/// only, never from older history outside the view.
#[derive(Debug, Clone, Default)]
pub struct MovingAverageSet {
    key: Option<InputKey>,
    series: BTreeMap<usize, SmaSeries>,
}

impl MovingAverageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache in line with `windows` over `points`. Returns how many
    /// windows were computed by this call.
    pub fn sync(&mut self, key: InputKey, points: &[PricePoint], windows: &BTreeSet<usize>) -> usize {
        if self.key != Some(key) {
            self.series.clear();
            self.key = Some(key);
        }

        self.series.retain(|window, _| windows.contains(window));

        let mut computed = 0;
        for &window in windows {
            if validate_window(window).is_err() || self.series.contains_key(&window) {
                continue;
            }
            self.series.insert(window, simple_moving_average(points, window));
            computed += 1;
        }

        if computed > 0 {
            crate::log_debug!(
                COMPONENT,
                "computed {} SMA window(s) over {} closes",
                computed,
                points.len()
            );
        }
        computed
    }

    pub fn get(&self, window: usize) -> Option<&SmaSeries> {
        self.series.get(&window)
    }

    /// Active series in ascending window order
    pub fn iter(&self) -> impl Iterator<Item = &SmaSeries> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closes(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PricePoint::new(Timestamp::from_millis(i as i64 * 86_400_000), Price::from(*v)))
            .collect()
    }

    #[test]
    fn window_three_over_five_points() {
        let sma = simple_moving_average(&closes(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        let values: Vec<f64> = sma.points.iter().map(|p| p.close.value()).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(sma.points[0].timestamp, Timestamp::from_millis(2 * 86_400_000));
    }

    #[test]
    fn nan_only_blanks_windows_containing_it() {
        let sma = simple_moving_average(&closes(&[1.0, f64::NAN, 3.0, 4.0, 5.0]), 2);
        assert!(sma.points[0].close.value().is_nan());
        assert!(sma.points[1].close.value().is_nan());
        assert_eq!(sma.points[2].close.value(), 3.5);
        assert_eq!(sma.points[3].close.value(), 4.5);
    }

    #[test]
    fn zero_window_is_empty() {
        assert!(simple_moving_average(&closes(&[1.0, 2.0]), 0).is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(validate_window(0), Err(ValidationError::InvalidWindow(0)));
        assert_eq!(validate_window(10), Ok(10));
        assert_eq!(
            ValidationError::InvalidWindow(0).to_string(),
            "moving average window must be at least 1, got 0"
        );
    }

    #[test]
    fn toggling_one_window_keeps_the_others() {
        let points = closes(&(1..=60).map(f64::from).collect::<Vec<_>>());
        let key = InputKey::of(1, &points);
        let mut set = MovingAverageSet::new();

        assert_eq!(set.sync(key, &points, &BTreeSet::from([10, 20])), 2);
        assert_eq!(set.sync(key, &points, &BTreeSet::from([10, 20, 50])), 1);
        assert_eq!(set.sync(key, &points, &BTreeSet::from([10, 50])), 0);
        assert!(set.get(20).is_none());
        assert_eq!(set.iter().map(|s| s.window).collect::<Vec<_>>(), vec![10, 50]);
    }

    #[test]
    fn new_input_recomputes_every_window() {
        let points = closes(&(1..=60).map(f64::from).collect::<Vec<_>>());
        let mut set = MovingAverageSet::new();
        let windows = BTreeSet::from([10, 20]);
        set.sync(InputKey::of(1, &points), &points, &windows);
        assert_eq!(set.sync(InputKey::of(1, &points[30..]), &points[30..], &windows), 2);
        assert_eq!(set.sync(InputKey::of(2, &points[30..]), &points[30..], &windows), 2);
    }
}
