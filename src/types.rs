//! Common Types Module
//!
//! Price series shared by the data providers and the backtest pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily observation (adjusted close).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Daily price history for one instrument.
///
/// Dates are strictly increasing. The constructor sorts its input and keeps the
/// last observation for any repeated date, so every `PriceSeries` upholds the
/// ordering invariant regardless of how the provider delivered the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps provider order among equal dates, so "last wins" below
        points.sort_by_key(|p| p.date);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation, if any.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// One date on which both legs of a pair have a price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPoint {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
}

/// Date-aligned prices for a pair (leg A is the dependent series).
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPairSeries {
    symbol_a: String,
    symbol_b: String,
    points: Vec<AlignedPoint>,
}

impl AlignedPairSeries {
    pub(crate) fn new(symbol_a: String, symbol_b: String, points: Vec<AlignedPoint>) -> Self {
        Self {
            symbol_a,
            symbol_b,
            points,
        }
    }

    pub fn symbol_a(&self) -> &str {
        &self.symbol_a
    }

    pub fn symbol_b(&self) -> &str {
        &self.symbol_b
    }

    /// Pair label in `A/B` form.
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.symbol_a, self.symbol_b)
    }

    pub fn points(&self) -> &[AlignedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn prices_a(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price_a)
    }

    pub fn prices_b(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_is_sorted_on_construction() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                PricePoint::new(day(3), 3.0),
                PricePoint::new(day(1), 1.0),
                PricePoint::new(day(2), 2.0),
            ],
        );
        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_duplicate_dates_keep_last_observation() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                PricePoint::new(day(1), 1.0),
                PricePoint::new(day(2), 2.0),
                PricePoint::new(day(2), 2.5),
            ],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().price, 2.5);
    }

    #[test]
    fn test_pair_label() {
        let aligned = AlignedPairSeries::new("SPY".into(), "QQQ".into(), vec![]);
        assert_eq!(aligned.pair_label(), "SPY/QQQ");
        assert!(aligned.is_empty());
    }
}
