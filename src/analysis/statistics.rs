//! Descriptive statistics over a reading sequence

use crate::types::StatisticsResult;

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// (min, max) of a sequence, `None` when empty. NaN entries are ignored.
pub(crate) fn extrema(readings: &[f64]) -> Option<(f64, f64)> {
    if readings.is_empty() {
        return None;
    }
    let (min, max) = readings
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some((min, max))
}

/// Mean rounded to one decimal, kept inside `[min, max]` so that rounding can
/// never push the average past an extremum.
pub(crate) fn rounded_mean(readings: &[f64], min: f64, max: f64) -> f64 {
    let mean = readings.iter().sum::<f64>() / readings.len() as f64;
    round1(mean).max(min).min(max)
}

/// max/min/average/median/count of `readings`.
///
/// Empty input yields all zeros. The input is not reordered; the median is
/// taken from a sorted copy.
pub fn compute_statistics(readings: &[f64]) -> StatisticsResult {
    let Some((min, max)) = extrema(readings) else {
        return StatisticsResult::default();
    };

    let mut sorted = readings.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    StatisticsResult {
        max,
        min,
        average: rounded_mean(readings, min, max),
        median: round1(median).max(min).min(max),
        count: n,
    }
}

/// Population standard deviation of `readings`, 0 when empty.
pub fn standard_deviation(readings: &[f64]) -> f64 {
    use statrs::statistics::Statistics;

    if readings.is_empty() {
        return 0.0;
    }
    let std_dev = readings.iter().population_std_dev();
    if std_dev.is_finite() { std_dev } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_all_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, StatisticsResult { max: 0.0, min: 0.0, average: 0.0, median: 0.0, count: 0 });
    }

    #[test]
    fn test_single_reading() {
        let stats = compute_statistics(&[50.0]);
        assert_eq!(stats, StatisticsResult { max: 50.0, min: 50.0, average: 50.0, median: 50.0, count: 1 });
    }

    #[test]
    fn test_even_count_median_averages_middle_pair() {
        let stats = compute_statistics(&[40.0, 60.0]);
        assert_eq!(stats.median, 50.0);
        assert_eq!(stats.average, 50.0);
    }

    #[test]
    fn test_odd_count_median_is_middle_value() {
        let stats = compute_statistics(&[30.0, 10.0, 20.0]);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.min, 10.0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let stats = compute_statistics(&[41.0, 42.0, 42.0]);
        assert_eq!(stats.average, 41.7);
    }

    #[test]
    fn test_input_is_not_reordered() {
        let readings = vec![70.0, 30.0, 50.0];
        let _ = compute_statistics(&readings);
        assert_eq!(readings, vec![70.0, 30.0, 50.0]);
    }

    #[test]
    fn test_average_stays_between_extrema() {
        let samples: [&[f64]; 4] = [
            &[50.04, 50.04, 50.04],
            &[0.0, 150.0],
            &[33.33, 33.36, 33.34],
            &[61.2, 80.9, 45.05, 45.05, 99.99],
        ];
        for readings in samples {
            let s = compute_statistics(readings);
            assert!(s.max >= s.average && s.average >= s.min, "{readings:?} -> {s:?}");
        }
    }

    #[test]
    fn test_rounding_past_minimum_clamps_to_minimum() {
        // mean 45.0433 rounds to 45.0, below the 45.04 minimum
        let stats = compute_statistics(&[45.04, 45.04, 45.05]);
        assert_eq!(stats.min, 45.04);
        assert_eq!(stats.average, 45.04);
        assert_eq!(stats.median, 45.04);
    }

    #[test]
    fn test_standard_deviation() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[55.0]), 0.0);
        let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.0).abs() < 1e-12, "got {sd}");
    }
}
