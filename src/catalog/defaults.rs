use super::{
    Dimension, Direction, IndicatorCatalog, IndicatorDefinition, Industry, ReferenceBand,
};
use std::collections::BTreeMap;

fn def(
    key: &str,
    display_name: &str,
    dimension: Dimension,
    direction: Direction,
    default_band: (f64, f64),
    bands: &[(Industry, (f64, f64))],
) -> IndicatorDefinition {
    IndicatorDefinition {
        key: key.to_string(),
        display_name: display_name.to_string(),
        dimension,
        direction,
        weight: None,
        default_band: Some(ReferenceBand::new(default_band.0, default_band.1)),
        bands: bands
            .iter()
            .map(|(industry, (min, max))| (*industry, ReferenceBand::new(*min, *max)))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Built-in indicator catalog.
///
/// Percentages are expressed on a 0-100 scale. Industry bands only exist where
/// the industry's typical range differs materially from the default.
pub fn default_catalog() -> IndicatorCatalog {
    use Dimension::{Environmental as E, Governance as G, Social as S};
    use Direction::{HigherBetter as Higher, LowerBetter as Lower};
    use Industry::*;

    let indicators = vec![
        // Environmental
        def(
            "carbon_intensity",
            "Carbon intensity (tCO2e per revenue unit)",
            E,
            Lower,
            (0.0, 200.0),
            &[
                (Energy, (100.0, 1500.0)),
                (Manufacturing, (50.0, 600.0)),
                (Transportation, (50.0, 800.0)),
                (Finance, (0.0, 20.0)),
                (Technology, (0.0, 50.0)),
            ],
        ),
        def(
            "energy_intensity",
            "Energy consumption per revenue unit (MWh)",
            E,
            Lower,
            (0.0, 500.0),
            &[(Energy, (200.0, 3000.0)), (Manufacturing, (100.0, 1500.0))],
        ),
        def(
            "renewable_energy_share",
            "Renewable energy share (%)",
            E,
            Higher,
            (0.0, 100.0),
            &[(Energy, (0.0, 60.0)), (Manufacturing, (0.0, 70.0))],
        ),
        def(
            "water_recycling_rate",
            "Water recycling rate (%)",
            E,
            Higher,
            (0.0, 100.0),
            &[],
        ),
        def(
            "hazardous_waste_compliance",
            "Hazardous waste disposal compliance (%)",
            E,
            Higher,
            (80.0, 100.0),
            &[],
        ),
        def(
            "environmental_penalties",
            "Environmental administrative penalties (count)",
            E,
            Lower,
            (0.0, 10.0),
            &[(Energy, (0.0, 20.0))],
        ),
        // Social
        def(
            "core_staff_turnover",
            "Core staff turnover (%)",
            S,
            Lower,
            (0.0, 30.0),
            &[(Retail, (0.0, 60.0)), (Technology, (0.0, 35.0))],
        ),
        def(
            "disabled_employment_ratio",
            "Employees with disabilities (%)",
            S,
            Higher,
            (0.0, 5.0),
            &[],
        ),
        def(
            "training_coverage",
            "Employee training coverage (%)",
            S,
            Higher,
            (0.0, 100.0),
            &[],
        ),
        def(
            "safety_incident_rate",
            "Recordable safety incidents per 200k hours",
            S,
            Lower,
            (0.0, 5.0),
            &[
                (Energy, (0.0, 8.0)),
                (Manufacturing, (0.0, 10.0)),
                (Finance, (0.0, 1.0)),
            ],
        ),
        def(
            "supplier_esg_audit_ratio",
            "Suppliers covered by ESG audits (%)",
            S,
            Higher,
            (0.0, 100.0),
            &[],
        ),
        def(
            "sme_payment_overdue_rate",
            "Overdue payments to small suppliers (%)",
            S,
            Lower,
            (0.0, 20.0),
            &[],
        ),
        def(
            "charitable_giving_ratio",
            "Charitable giving as share of net profit (%)",
            S,
            Higher,
            (0.0, 3.0),
            &[],
        ),
        // Governance
        def(
            "independent_director_ratio",
            "Independent directors on the board (%)",
            G,
            Higher,
            (0.0, 75.0),
            &[(Finance, (20.0, 80.0))],
        ),
        def(
            "data_security_incidents",
            "Data security incidents (count)",
            G,
            Lower,
            (0.0, 10.0),
            &[(Technology, (0.0, 20.0)), (Finance, (0.0, 15.0))],
        ),
        def(
            "complaint_resolution_hours",
            "Product complaint resolution time (hours)",
            G,
            Lower,
            (0.0, 168.0),
            &[],
        ),
        def(
            "anti_bribery_training_coverage",
            "Anti-bribery training coverage (%)",
            G,
            Higher,
            (0.0, 100.0),
            &[],
        ),
        def(
            "esg_linked_compensation_ratio",
            "Executive pay linked to ESG targets (%)",
            G,
            Higher,
            (0.0, 30.0),
            &[],
        ),
        def(
            "third_party_assurance_ratio",
            "ESG report items with third-party assurance (%)",
            G,
            Higher,
            (0.0, 100.0),
            &[],
        ),
        def(
            "stakeholder_engagement_frequency",
            "Stakeholder engagement sessions per year",
            G,
            Higher,
            (0.0, 12.0),
            &[],
        ),
        def(
            "board_esg_committee",
            "Board-level ESG committee (0 = no, 1 = yes)",
            G,
            Higher,
            (0.0, 1.0),
            &[],
        ),
    ];

    IndicatorCatalog { indicators }
}
