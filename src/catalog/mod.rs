mod defaults;
mod industry;

pub use defaults::default_catalog;
pub use industry::Industry;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One of the three ESG dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "E", alias = "environmental")]
    Environmental,
    #[serde(rename = "S", alias = "social")]
    Social,
    #[serde(rename = "G", alias = "governance")]
    Governance,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Environmental,
        Dimension::Social,
        Dimension::Governance,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Dimension::Environmental => "E",
            Dimension::Social => "S",
            Dimension::Governance => "G",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Environmental => "Environmental",
            Dimension::Social => "Social",
            Dimension::Governance => "Governance",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

/// Raw-value range mapped onto [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceBand {
    pub min: f64,
    pub max: f64,
}

impl ReferenceBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Band with both ends multiplied by `multiplier` (expected > 0).
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            min: self.min * multiplier,
            max: self.max * multiplier,
        }
    }

    /// True when both ends and the span between them are finite.
    pub fn is_finite(&self) -> bool {
        (self.max - self.min).is_finite()
    }

    /// Linear interpolation of `raw` against the band, inverted for
    /// lower-is-better indicators. Values outside the band clamp to 0 or 100.
    pub fn normalize(&self, raw: f64, direction: Direction) -> f64 {
        let span = self.max - self.min;
        let position = (raw - self.min) / span;
        let position = if span > 0.0 && !position.is_nan() {
            position.clamp(0.0, 1.0)
        } else if raw >= self.max {
            1.0
        } else {
            0.0
        };
        match direction {
            Direction::HigherBetter => position * 100.0,
            Direction::LowerBetter => (1.0 - position) * 100.0,
        }
    }
}

/// Where the band used for an indicator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandSource {
    Industry,
    DefaultFallback,
}

/// Catalog entry describing a single indicator.
///
/// Example YAML:
/// ```yaml
/// key: renewable_energy_share
/// display_name: Renewable energy share (%)
/// dimension: E
/// direction: higher-better
/// default_band: { min: 0, max: 100 }
/// bands:
///   energy: { min: 0, max: 60 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorDefinition {
    pub key: String,
    pub display_name: String,
    pub dimension: Dimension,
    pub direction: Direction,

    /// Explicit weight within the dimension; renormalized against the other
    /// contributing indicators. Absent means equal weighting (1.0).
    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(default)]
    pub default_band: Option<ReferenceBand>,

    #[serde(default)]
    pub bands: BTreeMap<Industry, ReferenceBand>,
}

impl IndicatorDefinition {
    /// Band for `industry`, falling back to the default band when the
    /// industry is unrecognized or has no dedicated band.
    pub fn band_for(&self, industry: Option<Industry>) -> Option<(ReferenceBand, BandSource)> {
        industry
            .and_then(|i| self.bands.get(&i))
            .map(|band| (*band, BandSource::Industry))
            .or_else(|| self.default_band.map(|band| (band, BandSource::DefaultFallback)))
    }

    /// Validate a definition. Returns all problems at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let prefix = if self.key.trim().is_empty() {
            errors.push("indicator.key: must not be empty".to_string());
            "indicator".to_string()
        } else {
            format!("indicator '{}'", self.key)
        };

        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                errors.push(format!("{}.weight: must be finite and > 0, got {}", prefix, weight));
            }
        }

        if let Some(band) = self.default_band {
            check_band(&mut errors, &format!("{}.default_band", prefix), &band);
        }
        for (industry, band) in &self.bands {
            check_band(&mut errors, &format!("{}.bands.{}", prefix, industry), band);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_band(errors: &mut Vec<String>, field: &str, band: &ReferenceBand) {
    if !band.min.is_finite() || !band.max.is_finite() {
        errors.push(format!("{}: bounds must be finite", field));
    } else if !band.is_finite() {
        errors.push(format!("{}: max - min must be finite", field));
    } else if band.min >= band.max {
        errors.push(format!(
            "{}: min ({}) must be lower than max ({})",
            field, band.min, band.max
        ));
    }
}

/// Ordered indicator catalog. Entries are only changed by replacing them whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    indicators: Vec<IndicatorDefinition>,
}

impl IndicatorCatalog {
    /// Build a catalog, rejecting invalid entries and duplicate keys.
    pub fn new(indicators: Vec<IndicatorDefinition>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for def in &indicators {
            if let Err(mut errs) = def.validate() {
                errors.append(&mut errs);
            }
            if !seen.insert(def.key.as_str()) {
                errors.push(format!("indicator '{}': duplicate key", def.key));
            }
        }
        if errors.is_empty() {
            Ok(Self { indicators })
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, key: &str) -> Option<&IndicatorDefinition> {
        self.indicators.iter().find(|def| def.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorDefinition> {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Copy of this catalog with `definition` replacing the entry of the same
    /// key, or appended if the key is new.
    pub fn with_replaced(&self, definition: IndicatorDefinition) -> Result<Self, Vec<String>> {
        definition.validate()?;
        let mut indicators = self.indicators.clone();
        match indicators.iter_mut().find(|def| def.key == definition.key) {
            Some(slot) => *slot = definition,
            None => indicators.push(definition),
        }
        Ok(Self { indicators })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(key: &str, band: Option<ReferenceBand>) -> IndicatorDefinition {
        IndicatorDefinition {
            key: key.to_string(),
            display_name: key.to_string(),
            dimension: Dimension::Environmental,
            direction: Direction::HigherBetter,
            weight: None,
            default_band: band,
            bands: BTreeMap::new(),
        }
    }

    #[test]
    fn test_normalize_higher_better() {
        let band = ReferenceBand::new(0.0, 50.0);
        assert_eq!(band.normalize(25.0, Direction::HigherBetter), 50.0);
        assert_eq!(band.normalize(-10.0, Direction::HigherBetter), 0.0);
        assert_eq!(band.normalize(80.0, Direction::HigherBetter), 100.0);
    }

    #[test]
    fn test_normalize_lower_better_inverts() {
        let band = ReferenceBand::new(10.0, 20.0);
        assert_eq!(band.normalize(10.0, Direction::LowerBetter), 100.0);
        assert_eq!(band.normalize(20.0, Direction::LowerBetter), 0.0);
        assert!((band.normalize(12.5, Direction::LowerBetter) - 75.0).abs() < 1e-9);
        assert_eq!(band.normalize(1e12, Direction::LowerBetter), 0.0);
    }

    #[test]
    fn test_normalize_overflowing_span_stays_bounded() {
        let band = ReferenceBand::new(-1e308, 1e308);
        assert!(!band.is_finite());
        for raw in [f64::MIN, -1.0, 0.0, 1.0, f64::MAX] {
            let score = band.normalize(raw, Direction::HigherBetter);
            assert!((0.0..=100.0).contains(&score), "score {} for raw {}", score, raw);
        }
        assert_eq!(band.normalize(f64::MAX, Direction::HigherBetter), 100.0);
        assert_eq!(band.normalize(f64::MAX, Direction::LowerBetter), 0.0);
    }

    #[test]
    fn test_validate_rejects_overflowing_span() {
        let def = indicator("wide", Some(ReferenceBand::new(-1e308, 1e308)));
        let errors = def.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max - min must be finite"));
    }

    #[test]
    fn test_scaled_band() {
        let band = ReferenceBand::new(10.0, 20.0).scaled(1.5);
        assert_eq!(band, ReferenceBand::new(15.0, 30.0));
    }

    #[test]
    fn test_band_for_prefers_industry() {
        let mut def = indicator("x", Some(ReferenceBand::new(0.0, 100.0)));
        def.bands.insert(Industry::Energy, ReferenceBand::new(0.0, 10.0));

        let (band, source) = def.band_for(Some(Industry::Energy)).unwrap();
        assert_eq!(band, ReferenceBand::new(0.0, 10.0));
        assert_eq!(source, BandSource::Industry);

        let (band, source) = def.band_for(Some(Industry::Retail)).unwrap();
        assert_eq!(band, ReferenceBand::new(0.0, 100.0));
        assert_eq!(source, BandSource::DefaultFallback);

        let (_, source) = def.band_for(None).unwrap();
        assert_eq!(source, BandSource::DefaultFallback);
    }

    #[test]
    fn test_band_for_without_default() {
        let def = indicator("x", None);
        assert!(def.band_for(Some(Industry::Energy)).is_none());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut def = indicator(" ", Some(ReferenceBand::new(5.0, 5.0)));
        def.weight = Some(-1.0);
        def.bands.insert(Industry::Energy, ReferenceBand::new(f64::NAN, 1.0));
        let errors = def.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("key"));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let band = Some(ReferenceBand::new(0.0, 1.0));
        let errors = IndicatorCatalog::new(vec![indicator("a", band), indicator("a", band)])
            .unwrap_err();
        assert_eq!(errors, vec!["indicator 'a': duplicate key".to_string()]);
    }

    #[test]
    fn test_with_replaced_swaps_whole_entry() {
        let band = Some(ReferenceBand::new(0.0, 1.0));
        let catalog = IndicatorCatalog::new(vec![indicator("a", band), indicator("b", band)]).unwrap();

        let mut replacement = indicator("a", Some(ReferenceBand::new(0.0, 2.0)));
        replacement.direction = Direction::LowerBetter;
        let updated = catalog.with_replaced(replacement.clone()).unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(updated.get("a"), Some(&replacement));
        // Original untouched
        assert_eq!(catalog.get("a").unwrap().direction, Direction::HigherBetter);

        let added = updated.with_replaced(indicator("c", band)).unwrap();
        assert_eq!(added.len(), 3);
    }

    #[test]
    fn test_with_replaced_rejects_invalid() {
        let catalog = IndicatorCatalog::new(vec![]).unwrap();
        let result = catalog.with_replaced(indicator("a", Some(ReferenceBand::new(3.0, 1.0))));
        assert!(result.is_err());
    }

    #[test]
    fn test_definition_parses_from_yaml() {
        let yaml = r#"
key: renewable_energy_share
display_name: Renewable energy share (%)
dimension: E
direction: higher-better
default_band: { min: 0, max: 100 }
bands:
  energy: { min: 0, max: 60 }
"#;
        let def: IndicatorDefinition = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(def.dimension, Dimension::Environmental);
        assert_eq!(def.direction, Direction::HigherBetter);
        assert_eq!(def.bands.get(&Industry::Energy), Some(&ReferenceBand::new(0.0, 60.0)));
        assert!(def.weight.is_none());
    }
}
