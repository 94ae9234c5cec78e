use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of industries that reference bands can be keyed on.
///
/// Free-form labels coming from callers are resolved with [`Industry::parse`];
/// a label that resolves to nothing is *unrecognized* and every indicator
/// falls back to its default band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Energy,
    Finance,
    Technology,
    Manufacturing,
    Consumer,
    RealEstate,
    Healthcare,
    Transportation,
    Retail,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 10] = [
        Industry::Energy,
        Industry::Finance,
        Industry::Technology,
        Industry::Manufacturing,
        Industry::Consumer,
        Industry::RealEstate,
        Industry::Healthcare,
        Industry::Transportation,
        Industry::Retail,
        Industry::Other,
    ];

    /// Canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Energy => "energy",
            Industry::Finance => "finance",
            Industry::Technology => "technology",
            Industry::Manufacturing => "manufacturing",
            Industry::Consumer => "consumer",
            Industry::RealEstate => "real_estate",
            Industry::Healthcare => "healthcare",
            Industry::Transportation => "transportation",
            Industry::Retail => "retail",
            Industry::Other => "other",
        }
    }

    /// Accepted spellings besides the canonical label.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Industry::Energy => &["energy sector", "能源", "能源业", "能源行业"],
            Industry::Finance => &["financial", "financials", "金融", "金融业"],
            Industry::Technology => &["tech", "科技", "科技业", "科技行业"],
            Industry::Manufacturing => &["industrial", "制造", "制造业"],
            Industry::Consumer => &["consumer goods", "消费", "消费业", "消费行业"],
            Industry::RealEstate => &["real estate", "real-estate", "房地产", "房地产业"],
            Industry::Healthcare => &["health", "health care", "医疗健康"],
            Industry::Transportation => &["transport", "logistics", "交通运输"],
            Industry::Retail => &["零售", "零售业"],
            Industry::Other => &["其他"],
        }
    }

    /// Suggested E/S/G dimension weights for the industry. Industries without
    /// a dedicated profile get the balanced default. Each triple sums to 1.
    pub fn dimension_weights(&self) -> (f64, f64, f64) {
        match self {
            Industry::Energy => (0.5, 0.25, 0.25),
            Industry::Finance => (0.2, 0.35, 0.45),
            Industry::Technology => (0.25, 0.4, 0.35),
            Industry::Manufacturing => (0.4, 0.35, 0.25),
            Industry::Consumer => (0.3, 0.4, 0.3),
            _ => (0.33, 0.33, 0.34),
        }
    }

    /// Resolve a free-form label. Matching is case-insensitive and ignores
    /// surrounding whitespace. Returns `None` for unknown labels.
    pub fn parse(label: &str) -> Option<Industry> {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Industry::ALL.into_iter().find(|industry| {
            industry.as_str() == needle || industry.aliases().iter().any(|a| *a == needle)
        })
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_labels() {
        for industry in Industry::ALL {
            assert_eq!(Industry::parse(industry.as_str()), Some(industry));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(Industry::parse("  Technology "), Some(Industry::Technology));
        assert_eq!(Industry::parse("REAL ESTATE"), Some(Industry::RealEstate));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Industry::parse("制造业"), Some(Industry::Manufacturing));
        assert_eq!(Industry::parse("制造"), Some(Industry::Manufacturing));
        assert_eq!(Industry::parse("tech"), Some(Industry::Technology));
        assert_eq!(Industry::parse("金融业"), Some(Industry::Finance));
    }

    #[test]
    fn test_parse_unknown_label() {
        assert_eq!(Industry::parse("space mining"), None);
        assert_eq!(Industry::parse(""), None);
        assert_eq!(Industry::parse("default"), None);
    }

    #[test]
    fn test_dimension_weights_sum_to_one() {
        for industry in Industry::ALL {
            let (e, s, g) = industry.dimension_weights();
            assert!((e + s + g - 1.0).abs() < 1e-9, "{}", industry);
        }
        assert_eq!(Industry::Finance.dimension_weights(), (0.2, 0.35, 0.45));
        assert_eq!(Industry::Retail.dimension_weights(), (0.33, 0.33, 0.34));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Industry::RealEstate).unwrap();
        assert_eq!(json, "\"real_estate\"");
    }
}
