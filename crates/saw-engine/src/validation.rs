//! Field checks applied to definitions arriving over the HTTP boundary,
//! before they reach the engine or a repository.

use crate::saw::{Alternative, CalculationRequest, Criterion};

pub const MIN_WEIGHT: f64 = 0.0;
pub const MAX_WEIGHT: f64 = 100.0;

/// A request field outside its accepted range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error("weight of criterion '{criterion}' must be between 0 and 100, got {weight}")]
    WeightOutOfRange { criterion: String, weight: f64 },
    #[error("nilai must be a finite number, got {value}")]
    NonFiniteValue { value: f64 },
}

pub fn require_text(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        return Err(InputError::Blank { field });
    }
    Ok(())
}

/// NaN fails the range check as well.
pub fn check_weight(criterion: &str, weight: f64) -> Result<(), InputError> {
    if (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        Ok(())
    } else {
        Err(InputError::WeightOutOfRange {
            criterion: criterion.to_string(),
            weight,
        })
    }
}

pub fn check_value(value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFiniteValue { value })
    }
}

pub fn check_criterion(criterion: &Criterion) -> Result<(), InputError> {
    require_text("nama", &criterion.name)?;
    check_weight(&criterion.name, criterion.weight)
}

pub fn check_alternative(alternative: &Alternative) -> Result<(), InputError> {
    require_text("nama", &alternative.name)?;
    require_text("lokasi", &alternative.location)?;
    alternative
        .values
        .iter()
        .try_for_each(|value| check_value(value.nilai))
}

/// Per-criterion weight range only; the total is the engine's concern.
pub fn check_calculation(request: &CalculationRequest) -> Result<(), InputError> {
    request
        .criterias
        .iter()
        .try_for_each(|criterion| check_weight(&criterion.name, criterion.weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saw::Polarity;

    #[test]
    fn weights_outside_percentage_range_are_rejected() {
        let request = CalculationRequest {
            alternatives: Vec::new(),
            criterias: vec![
                Criterion::new(1, "Harga", 150.0, Polarity::Cost),
                Criterion::new(2, "Jarak", -50.0, Polarity::Cost),
            ],
        };

        assert_eq!(
            check_calculation(&request),
            Err(InputError::WeightOutOfRange {
                criterion: "Harga".to_string(),
                weight: 150.0
            })
        );
    }

    #[test]
    fn boundary_weights_are_accepted() {
        assert!(check_weight("Harga", 0.0).is_ok());
        assert!(check_weight("Harga", 100.0).is_ok());
        assert!(check_weight("Harga", f64::NAN).is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        let criterion = Criterion::new(1, "  ", 25.0, Polarity::Benefit);
        let alternative = Alternative::new(1, "Griya Asri", "");

        assert_eq!(
            check_criterion(&criterion),
            Err(InputError::Blank { field: "nama" })
        );
        assert_eq!(
            check_alternative(&alternative),
            Err(InputError::Blank { field: "lokasi" })
        );
    }

    #[test]
    fn message_names_the_offending_criterion() {
        let err = check_weight("Transportasi", -50.0).expect_err("negative weight");

        assert_eq!(
            err.to_string(),
            "weight of criterion 'Transportasi' must be between 0 and 100, got -50"
        );
    }
}
