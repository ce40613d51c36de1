use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::series::TimePoint;

/// Trailing window and downsampling applied to a sorted series before charting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DisplayWindow {
    /// Share of the series to keep, counted from its end, in `[0, 100]`.
    pub percent: f64,
    /// Keep every n-th point of the window; `None` or `n <= 1` keeps all.
    pub stride: Option<usize>,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::full()
    }
}

impl DisplayWindow {
    /// Keeps everything.
    pub fn full() -> Self {
        Self {
            percent: 100.0,
            stride: None,
        }
    }

    pub fn new(percent: f64, stride: Option<usize>) -> Self {
        Self { percent, stride }
    }

    /// Index of the first point kept for a series of `len` points.
    pub fn start_index(&self, len: usize) -> usize {
        let percent = if self.percent.is_nan() {
            100.0
        } else {
            self.percent.clamp(0.0, 100.0)
        };
        let start = (len as f64 * (1.0 - percent / 100.0)).floor();
        (start.max(0.0) as usize).min(len)
    }

    /// Returns the windowed copy; `series` is left untouched.
    pub fn apply(&self, series: &[TimePoint]) -> Vec<TimePoint> {
        if series.is_empty() {
            return Vec::new();
        }

        let slice = &series[self.start_index(series.len())..];
        let windowed: Vec<TimePoint> = match self.stride {
            Some(stride) if stride > 1 => slice.iter().step_by(stride).cloned().collect(),
            _ => slice.to_vec(),
        };

        trace!(
            input = series.len(),
            output = windowed.len(),
            percent = self.percent,
            stride = ?self.stride,
            "Applied display window"
        );
        windowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::merge_history_validation;
    use crate::series::testing::history;

    fn series(n: u32) -> Vec<TimePoint> {
        let samples: Vec<_> = (0..n).map(|h| history(h, h as f64)).collect();
        merge_history_validation(&samples, &[])
    }

    #[test]
    fn test_full_window_is_identity() {
        let input = series(12);
        assert_eq!(DisplayWindow::full().apply(&input), input);
    }

    #[test]
    fn test_full_window_is_idempotent() {
        let input = series(7);
        let window = DisplayWindow::full();
        let once = window.apply(&input);
        assert_eq!(window.apply(&once), once);
    }

    #[test]
    fn test_zero_percent_is_empty() {
        let input = series(5);
        assert!(DisplayWindow::new(0.0, None).apply(&input).is_empty());
        assert!(DisplayWindow::new(0.0, Some(2)).apply(&input).is_empty());
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert!(DisplayWindow::new(50.0, Some(3)).apply(&[]).is_empty());
    }

    #[test]
    fn test_thirty_percent_of_ten_points() {
        let input = series(10);
        let window = DisplayWindow::new(30.0, None);

        assert_eq!(window.start_index(10), 7);
        let kept = window.apply(&input);
        assert_eq!(kept, input[7..].to_vec());
    }

    #[test]
    fn test_stride_keeps_every_nth_from_window_start() {
        let input = series(10);
        let kept = DisplayWindow::new(100.0, Some(3)).apply(&input);

        // ceil(10 / 3)
        assert_eq!(kept.len(), 4);
        let values: Vec<_> = kept.iter().map(|p| p.actual.unwrap()).collect();
        assert_eq!(values, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_stride_applies_within_window() {
        let input = series(10);
        let kept = DisplayWindow::new(50.0, Some(2)).apply(&input);

        let values: Vec<_> = kept.iter().map(|p| p.actual.unwrap()).collect();
        assert_eq!(values, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_stride_of_one_or_less_is_noop() {
        let input = series(6);
        assert_eq!(DisplayWindow::new(100.0, Some(1)).apply(&input), input);
        assert_eq!(DisplayWindow::new(100.0, Some(0)).apply(&input), input);
    }

    #[test]
    fn test_stride_count_matches_ceiling() {
        let input = series(23);
        for stride in 1..8usize {
            let window = DisplayWindow::new(60.0, Some(stride));
            let slice_len = input.len() - window.start_index(input.len());
            assert_eq!(window.apply(&input).len(), slice_len.div_ceil(stride));
        }
    }

    #[test]
    fn test_out_of_range_percent_is_clamped() {
        let input = series(4);
        assert_eq!(DisplayWindow::new(250.0, None).apply(&input), input);
        assert!(DisplayWindow::new(-5.0, None).apply(&input).is_empty());
    }
}
