use serde::Serialize;

use super::normalizer::NormalizedIndicator;
use crate::catalog::Dimension;

/// One value per ESG dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PerDimension<T> {
    pub e: T,
    pub s: T,
    pub g: T,
}

impl<T> PerDimension<T> {
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        Self {
            e: f(Dimension::Environmental),
            s: f(Dimension::Social),
            g: f(Dimension::Governance),
        }
    }

    pub fn get(&self, dimension: Dimension) -> &T {
        match dimension {
            Dimension::Environmental => &self.e,
            Dimension::Social => &self.s,
            Dimension::Governance => &self.g,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionAggregate {
    pub score: f64,
    pub indicator_count: usize,
    /// No indicator contributed; `score` is 0.
    pub insufficient_data: bool,
}

/// Effective weight of one indicator inside its dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorWeight {
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub dimensions: PerDimension<DimensionAggregate>,
    /// Aligned with the normalized indicators passed in.
    pub weights: Vec<IndicatorWeight>,
}

/// Weighted mean of normalized sub-scores per dimension.
///
/// Indicators without an explicit weight count as 1.0; weights are
/// renormalized over the indicators actually present, so partial coverage is
/// tolerated.
pub fn aggregate(indicators: &[NormalizedIndicator]) -> Aggregation {
    let raw_weight = |ind: &NormalizedIndicator| ind.explicit_weight.unwrap_or(1.0);

    let totals = PerDimension::from_fn(|dimension| {
        indicators
            .iter()
            .filter(|ind| ind.dimension == dimension)
            .map(raw_weight)
            .sum::<f64>()
    });

    let weights: Vec<IndicatorWeight> = indicators
        .iter()
        .map(|ind| {
            let total = *totals.get(ind.dimension);
            let weight = if total > 0.0 { raw_weight(ind) / total } else { 0.0 };
            IndicatorWeight {
                weight,
                contribution: weight * ind.score,
            }
        })
        .collect();

    let dimensions = PerDimension::from_fn(|dimension| {
        let members: Vec<usize> = indicators
            .iter()
            .enumerate()
            .filter(|(_, ind)| ind.dimension == dimension)
            .map(|(i, _)| i)
            .collect();

        if members.is_empty() {
            return DimensionAggregate {
                score: 0.0,
                indicator_count: 0,
                insufficient_data: true,
            };
        }

        let score: f64 = members.iter().map(|&i| weights[i].contribution).sum();
        DimensionAggregate {
            score: score.clamp(0.0, 100.0),
            indicator_count: members.len(),
            insufficient_data: false,
        }
    });

    Aggregation { dimensions, weights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BandSource, ReferenceBand};

    fn normalized(key: &str, dimension: Dimension, score: f64, weight: Option<f64>) -> NormalizedIndicator {
        NormalizedIndicator {
            key: key.to_string(),
            display_name: key.to_string(),
            dimension,
            raw_value: score,
            band: ReferenceBand::new(0.0, 100.0),
            band_source: BandSource::DefaultFallback,
            score,
            explicit_weight: weight,
        }
    }

    #[test]
    fn test_equal_weighting_by_default() {
        let agg = aggregate(&[
            normalized("a", Dimension::Environmental, 60.0, None),
            normalized("b", Dimension::Environmental, 100.0, None),
            normalized("c", Dimension::Social, 40.0, None),
        ]);
        assert!((agg.dimensions.e.score - 80.0).abs() < 1e-9);
        assert!((agg.dimensions.s.score - 40.0).abs() < 1e-9);
        assert_eq!(agg.weights[0].weight, 0.5);
        assert_eq!(agg.weights[2].weight, 1.0);
    }

    #[test]
    fn test_explicit_weights_renormalized() {
        let agg = aggregate(&[
            normalized("a", Dimension::Governance, 100.0, Some(3.0)),
            normalized("b", Dimension::Governance, 0.0, Some(1.0)),
        ]);
        assert!((agg.dimensions.g.score - 75.0).abs() < 1e-9);
        assert!((agg.weights[0].weight - 0.75).abs() < 1e-12);
        assert!((agg.weights[0].contribution - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_explicit_and_default_weights() {
        let agg = aggregate(&[
            normalized("a", Dimension::Social, 100.0, Some(2.0)),
            normalized("b", Dimension::Social, 40.0, None),
        ]);
        // weights 2/3 and 1/3
        assert!((agg.dimensions.s.score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_dimension_flagged() {
        let agg = aggregate(&[normalized("a", Dimension::Environmental, 70.0, None)]);
        assert!(!agg.dimensions.e.insufficient_data);
        assert!(agg.dimensions.s.insufficient_data);
        assert_eq!(agg.dimensions.s.score, 0.0);
        assert_eq!(agg.dimensions.g.indicator_count, 0);
    }

    #[test]
    fn test_per_dimension_get() {
        let values = PerDimension::from_fn(|d| d.code());
        assert_eq!(*values.get(Dimension::Social), "S");
        assert_eq!(values.g, "G");
    }
}
