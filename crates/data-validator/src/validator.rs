//! Range Checking and Clamping

use crate::domain::FieldDomain;
use crate::error::ValidationError;
use tracing::warn;

/// Outcome of clamping one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamped {
    /// Value inside the domain
    pub value: f64,
    /// Whether the input had to be changed
    pub adjusted: bool,
}

/// Validator for numeric patient inputs
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a single value against its domain
    pub fn validate_range(&self, value: f64, domain: &FieldDomain) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field: domain.name });
        }
        if !domain.contains(value) {
            return Err(ValidationError::OutOfRange {
                field: domain.name,
                value,
                min: domain.min,
                max: domain.max,
            });
        }
        Ok(())
    }

    /// Bring a value inside its domain.
    ///
    /// Out-of-range values snap to the nearest bound; NaN and infinities are
    /// replaced by the domain default.
    pub fn clamp(&self, value: f64, domain: &FieldDomain) -> Clamped {
        match self.validate_range(value, domain) {
            Ok(()) => Clamped {
                value,
                adjusted: false,
            },
            Err(err @ ValidationError::NotFinite { .. }) => {
                warn!("{}; using default {}", err, domain.default);
                Clamped {
                    value: domain.default,
                    adjusted: true,
                }
            }
            Err(err) => {
                let value = value.clamp(domain.min, domain.max);
                warn!("{}; clamped to {}", err, value);
                Clamped {
                    value,
                    adjusted: true,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AGE, GLUCOSE, HBA1C, OBESITY_RISK};
    use proptest::prelude::*;

    #[test]
    fn test_valid_age() {
        let validator = Validator::new();
        assert!(validator.validate_range(18.0, &AGE).is_ok());
        assert!(validator.validate_range(30.0, &AGE).is_ok());
        assert!(validator.validate_range(100.0, &AGE).is_ok());
    }

    #[test]
    fn test_invalid_age() {
        let validator = Validator::new();
        assert_eq!(
            validator.validate_range(17.0, &AGE),
            Err(ValidationError::OutOfRange {
                field: "Age (years)",
                value: 17.0,
                min: 18.0,
                max: 100.0,
            })
        );
        assert!(validator.validate_range(101.0, &AGE).is_err());
    }

    #[test]
    fn test_not_finite() {
        let validator = Validator::new();
        assert_eq!(
            validator.validate_range(f64::NAN, &HBA1C),
            Err(ValidationError::NotFinite { field: "HbA1cLevel (%)" })
        );
        assert!(validator.validate_range(f64::INFINITY, &OBESITY_RISK).is_err());
    }

    #[test]
    fn test_clamp_to_bounds() {
        let validator = Validator::new();
        assert_eq!(
            validator.clamp(900.0, &GLUCOSE),
            Clamped {
                value: 400.0,
                adjusted: true
            }
        );
        assert_eq!(validator.clamp(10.0, &GLUCOSE).value, 50.0);
        assert_eq!(
            validator.clamp(120.0, &GLUCOSE),
            Clamped {
                value: 120.0,
                adjusted: false
            }
        );
    }

    #[test]
    fn test_clamp_non_finite_uses_default() {
        let validator = Validator::new();
        let clamped = validator.clamp(f64::NAN, &HBA1C);
        assert_eq!(clamped.value, 6.5);
        assert!(clamped.adjusted);
        assert_eq!(validator.clamp(f64::NEG_INFINITY, &OBESITY_RISK).value, 1200.0);
    }

    #[test]
    fn test_unbounded_passes_through() {
        let validator = Validator::new();
        assert_eq!(validator.clamp(-250.0, &OBESITY_RISK).value, -250.0);
    }

    proptest! {
        #[test]
        fn clamped_value_always_in_domain(value in proptest::num::f64::ANY) {
            let validator = Validator::new();
            for domain in crate::domain::ALL {
                let clamped = validator.clamp(value, &domain);
                prop_assert!(clamped.value.is_finite());
                prop_assert!(domain.contains(clamped.value));
            }
        }
    }
}
