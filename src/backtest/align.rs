//! Date alignment of two price histories.

use crate::error::PairsError;
use crate::types::{AlignedPairSeries, AlignedPoint, PriceSeries};
use std::cmp::Ordering;

/// Intersect two series on date, keeping ascending order.
///
/// Observations with a non-finite price count as missing. Fails with
/// [`PairsError::InsufficientData`] when fewer than `min_observations` dates
/// survive.
pub fn align(
    series_a: &PriceSeries,
    series_b: &PriceSeries,
    min_observations: usize,
) -> Result<AlignedPairSeries, PairsError> {
    let a = series_a.points();
    let b = series_b.points();
    let mut points = Vec::with_capacity(a.len().min(b.len()));

    // Both inputs are strictly increasing, so a merge join is enough
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                if a[i].price.is_finite() && b[j].price.is_finite() {
                    points.push(AlignedPoint {
                        date: a[i].date,
                        price_a: a[i].price,
                        price_b: b[j].price,
                    });
                }
                i += 1;
                j += 1;
            }
        }
    }

    if points.len() < min_observations {
        return Err(PairsError::InsufficientData {
            pair: format!("{}/{}", series_a.symbol(), series_b.symbol()),
            expected: min_observations,
            actual: points.len(),
        });
    }

    Ok(AlignedPairSeries::new(
        series_a.symbol().to_string(),
        series_b.symbol().to_string(),
        points,
    ))
}
