//! Trailing-window statistics.

/// Mean and population standard deviation of one full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Population mean and standard deviation of `values`.
///
/// Returns `None` for an empty slice or when any value is non-finite.
pub fn population_stats(values: &[f64]) -> Option<WindowStats> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(WindowStats {
        mean,
        std_dev: variance.sqrt(),
    })
}

/// Trailing statistics over exactly the last `window` values, inclusive of the current one.
///
/// Output has the same length as `values`; the first `window - 1` entries are `None`.
pub fn rolling_stats(values: &[f64], window: usize) -> Vec<Option<WindowStats>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|t| {
            if t + 1 < window {
                None
            } else {
                population_stats(&values[t + 1 - window..=t])
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std() {
        let stats = population_stats(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert!((stats.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rolling_undefined_until_window_fills() {
        let values: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let stats = rolling_stats(&values, 20);
        assert_eq!(stats.len(), 25);
        assert!(stats[..19].iter().all(Option::is_none));
        assert!(stats[19..].iter().all(Option::is_some));
        // Window 0..=19 has mean 9.5
        assert_eq!(stats[19].unwrap().mean, 9.5);
    }

    #[test]
    fn test_non_finite_value_poisons_its_windows() {
        let mut values = vec![1.0; 10];
        values[4] = f64::NAN;
        let stats = rolling_stats(&values, 3);
        assert!(stats[4].is_none());
        assert!(stats[6].is_none());
        assert!(stats[7].is_some());
    }

    #[test]
    fn test_constant_window_has_zero_std() {
        let stats = population_stats(&[0.0; 20]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
    }
}
