use serde::Serialize;

use super::params::ModelParameters;

/// Tolerance for the dimension weights summing to 1.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Outcome of validating a candidate parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl From<Result<(), Vec<String>>> for ValidationReport {
    fn from(result: Result<(), Vec<String>>) -> Self {
        match result {
            Ok(()) => ValidationReport {
                is_valid: true,
                errors: Vec::new(),
            },
            Err(errors) => ValidationReport {
                is_valid: false,
                errors,
            },
        }
    }
}

/// Validate a full parameter set.
/// Returns all validation errors at once (not just the first).
pub fn validate_parameters(params: &ModelParameters) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_unit_interval(&mut errors, "alpha", params.alpha);
    check_unit_interval(&mut errors, "e_weight", params.e_weight);
    check_unit_interval(&mut errors, "s_weight", params.s_weight);
    check_unit_interval(&mut errors, "g_weight", params.g_weight);

    let sum = params.weight_sum();
    if sum.is_finite() && (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        errors.push(format!(
            "e_weight + s_weight + g_weight: must sum to 1, got {}",
            sum
        ));
    }

    // Interaction coefficients share the weight range
    check_unit_interval(&mut errors, "delta_coeff", params.delta_coeff);
    check_unit_interval(&mut errors, "epsilon_coeff", params.epsilon_coeff);
    check_unit_interval(&mut errors, "zeta_coeff", params.zeta_coeff);

    check_non_negative(&mut errors, "severity_factor", params.severity_factor);
    check_non_negative(&mut errors, "max_bonus", params.max_bonus);
    check_positive(&mut errors, "bonus_steepness", params.bonus_steepness);
    check_positive(&mut errors, "threshold_multiplier", params.threshold_multiplier);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unit_interval(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        errors.push(format!("{}: must be within [0, 1], got {}", field, value));
    }
}

fn check_non_negative(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{}: must be finite and non-negative, got {}", field, value));
    }
}

fn check_positive(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(format!("{}: must be finite and > 0, got {}", field, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_defaults() {
        assert!(validate_parameters(&ModelParameters::default()).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let params = ModelParameters {
            e_weight: 0.5,
            s_weight: 0.5,
            g_weight: 0.5,
            ..Default::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("sum to 1"));
    }

    #[test]
    fn test_weight_sum_within_tolerance() {
        let params = ModelParameters {
            e_weight: 0.4,
            s_weight: 0.3,
            g_weight: 0.3 + 1e-9,
            ..Default::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_negative_weight() {
        let params = ModelParameters {
            e_weight: -0.2,
            s_weight: 0.6,
            g_weight: 0.6,
            ..Default::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert!(errors[0].starts_with("e_weight"));
    }

    #[test]
    fn test_alpha_out_of_range() {
        let params = ModelParameters {
            alpha: 1.5,
            ..Default::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert!(errors[0].starts_with("alpha"));
    }

    #[test]
    fn test_steepness_and_multiplier_must_be_positive() {
        let params = ModelParameters {
            bonus_steepness: 0.0,
            threshold_multiplier: 0.0,
            ..Default::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("bonus_steepness"));
        assert!(errors[1].starts_with("threshold_multiplier"));
    }

    #[test]
    fn test_zero_max_bonus_allowed() {
        let params = ModelParameters {
            max_bonus: 0.0,
            severity_factor: 0.0,
            ..Default::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let params = ModelParameters {
            severity_factor: f64::INFINITY,
            max_bonus: f64::NAN,
            ..Default::default()
        };
        let errors = validate_parameters(&params).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_collects_all_errors() {
        let params = ModelParameters {
            alpha: -1.0,              // Error 1
            delta_coeff: 2.0,         // Error 2
            severity_factor: -0.1,    // Error 3
            max_bonus: -5.0,          // Error 4
            ..Default::default()
        };
        let report = ValidationReport::from(validate_parameters(&params));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_report_for_valid_set() {
        let report = ValidationReport::from(validate_parameters(&ModelParameters::default()));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }
}
