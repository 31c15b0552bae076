//! Linear back-projection of the composite risk score.

/// Number of points in a projection window.
pub const TREND_WINDOW: usize = 5;

/// Project a block's score over the window ending at `final_year`.
///
/// `projected(year) = score - rate * (final_year - year)`: a constant-rate
/// back-extrapolation, not a fitted trend. A positive rate means risk has
/// been rising, so earlier years project lower. Values are not clamped and
/// may leave [0, 1].
pub fn project_trend(score: f64, rate: f64, final_year: i32) -> TrendProjection {
    TrendProjection {
        score,
        rate,
        final_year,
        next_year: final_year - (TREND_WINDOW as i32 - 1),
    }
}

/// Lazy sequence of exactly `TREND_WINDOW` `(year, projected_score)` points.
/// Pure function of its inputs; each projection is independent.
#[derive(Clone, Copy, Debug)]
pub struct TrendProjection {
    score: f64,
    rate: f64,
    final_year: i32,
    next_year: i32,
}

impl Iterator for TrendProjection {
    type Item = (i32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_year > self.final_year {
            return None;
        }
        let year = self.next_year;
        self.next_year += 1;
        Some((year, self.score - self.rate * f64::from(self.final_year - year)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.final_year - self.next_year + 1).max(0) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrendProjection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ends_at_final_year() {
        let years: Vec<i32> = project_trend(0.5, 0.02, 2025).map(|(y, _)| y).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024, 2025]);
    }

    #[test]
    fn final_year_projects_exactly_to_score() {
        let (_, value) = project_trend(0.82, 0.01, 2025).last().unwrap();
        assert_eq!(value, 0.82);
    }

    #[test]
    fn zero_rate_is_constant() {
        for (_, value) in project_trend(0.82, 0.0, 2025) {
            assert_eq!(value, 0.82);
        }
    }

    #[test]
    fn positive_rate_projects_lower_in_the_past() {
        let expected = [0.78, 0.79, 0.80, 0.81, 0.82];
        let points: Vec<(i32, f64)> = project_trend(0.82, 0.01, 2025).collect();
        assert_eq!(points.len(), TREND_WINDOW);
        for ((_, value), want) in points.iter().zip(expected) {
            assert!((value - want).abs() < 1e-12, "got {value}, want {want}");
        }
    }

    #[test]
    fn projection_is_not_clamped() {
        let (_, first) = project_trend(0.1, 0.2, 2025).next().unwrap();
        assert!(first < 0.0);
    }

    #[test]
    fn exact_size_and_restartable() {
        let projection = project_trend(0.6, 0.01, 2025);
        assert_eq!(projection.len(), TREND_WINDOW);
        // Copies restart from the beginning.
        let a: Vec<_> = projection.collect();
        let b: Vec<_> = projection.collect();
        assert_eq!(a, b);
    }
}
