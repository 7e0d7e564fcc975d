use super::domain::{Alternative, Criterion, Polarity};
use tracing::warn;

/// Population statistics for one criterion column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBounds {
    pub min: f64,
    pub max: f64,
    pub missing: usize,
}

impl ColumnBounds {
    /// Scan every alternative's raw value for `criterion`. Missing values
    /// count as raw 0 and take part in the min/max.
    pub fn scan(alternatives: &[Alternative], criterion: &Criterion) -> Self {
        let mut bounds = Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            missing: 0,
        };

        for alternative in alternatives {
            let raw = match alternative.value_for(criterion.id) {
                Some(value) => value,
                None => {
                    bounds.missing += 1;
                    0.0
                }
            };
            bounds.min = bounds.min.min(raw);
            bounds.max = bounds.max.max(raw);
        }

        bounds
    }

    /// Population reference value the polarity divides against.
    fn reference(&self, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Benefit => self.max,
            Polarity::Cost => self.min,
        }
    }
}

/// Normalize a single raw value against its column bounds.
///
/// Benefit columns divide by the population max, cost columns divide the
/// population min by the value. A zero reference, a zero cost value, or any
/// non-finite quotient yields 0.
pub fn normalize_value(raw: f64, bounds: &ColumnBounds, polarity: Polarity) -> f64 {
    let reference = bounds.reference(polarity);
    if reference == 0.0 {
        return 0.0;
    }

    let normalized = match polarity {
        Polarity::Benefit => raw / reference,
        Polarity::Cost => {
            if raw == 0.0 {
                return 0.0;
            }
            reference / raw
        }
    };

    if normalized.is_finite() {
        normalized
    } else {
        0.0
    }
}

/// Normalize one criterion column for the whole population, returning values
/// aligned with `alternatives`.
pub fn normalize_column(alternatives: &[Alternative], criterion: &Criterion) -> Vec<f64> {
    let bounds = ColumnBounds::scan(alternatives, criterion);
    report_degenerate_column(alternatives.len(), criterion, &bounds);

    alternatives
        .iter()
        .map(|alternative| {
            let raw = alternative.value_for(criterion.id).unwrap_or(0.0);
            normalize_value(raw, &bounds, criterion.polarity)
        })
        .collect()
}

fn report_degenerate_column(population: usize, criterion: &Criterion, bounds: &ColumnBounds) {
    if population == 0 {
        return;
    }

    if bounds.missing > 0 {
        warn!(
            criterion = %criterion.id,
            name = %criterion.name,
            missing = bounds.missing,
            "alternatives missing a value; treating as 0"
        );
    }

    if bounds.reference(criterion.polarity) == 0.0 {
        warn!(
            criterion = %criterion.id,
            name = %criterion.name,
            polarity = criterion.polarity.label(),
            "zero population reference; column normalizes to 0"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[Option<f64>]) -> Vec<Alternative> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let alternative = Alternative::new(index as i64 + 1, format!("alt-{index}"), "X");
                match value {
                    Some(raw) => alternative.with_value(1, *raw),
                    None => alternative,
                }
            })
            .collect()
    }

    #[test]
    fn benefit_divides_by_population_max() {
        let criterion = Criterion::new(1, "Fasilitas", 100.0, Polarity::Benefit);
        let normalized = normalize_column(&column(&[Some(8.0), Some(9.0), Some(6.0)]), &criterion);

        assert!((normalized[0] - 8.0 / 9.0).abs() < 1e-12);
        assert_eq!(normalized[1], 1.0);
        assert!((normalized[2] - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn cost_divides_population_min_by_value() {
        let criterion = Criterion::new(1, "Harga", 100.0, Polarity::Cost);
        let normalized = normalize_column(
            &column(&[Some(500_000_000.0), Some(750_000_000.0), Some(350_000_000.0)]),
            &criterion,
        );

        assert!((normalized[0] - 0.7).abs() < 1e-12);
        assert!((normalized[1] - 350.0 / 750.0).abs() < 1e-12);
        assert_eq!(normalized[2], 1.0);
    }

    #[test]
    fn zero_benefit_max_yields_zero_column() {
        let criterion = Criterion::new(1, "Fasilitas", 100.0, Polarity::Benefit);
        let normalized = normalize_column(&column(&[Some(0.0), Some(0.0)]), &criterion);

        assert_eq!(normalized, vec![0.0, 0.0]);
    }

    #[test]
    fn zero_cost_min_yields_zero_column() {
        let criterion = Criterion::new(1, "Jarak", 100.0, Polarity::Cost);
        let normalized = normalize_column(&column(&[Some(0.0), Some(4.0), Some(8.0)]), &criterion);

        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_value_counts_as_zero() {
        let criterion = Criterion::new(1, "Jarak", 100.0, Polarity::Cost);
        let alternatives = column(&[Some(3.0), None]);

        let bounds = ColumnBounds::scan(&alternatives, &criterion);
        assert_eq!(bounds.missing, 1);
        assert_eq!(bounds.min, 0.0);

        let normalized = normalize_column(&alternatives, &criterion);
        assert_eq!(normalized, vec![0.0, 0.0]);
    }

    #[test]
    fn missing_benefit_value_scores_zero_without_disturbing_others() {
        let criterion = Criterion::new(1, "Transportasi", 100.0, Polarity::Benefit);
        let normalized = normalize_column(&column(&[Some(5.0), None, Some(10.0)]), &criterion);

        assert_eq!(normalized, vec![0.5, 0.0, 1.0]);
    }

    #[test]
    fn zero_cost_value_never_produces_infinity() {
        let bounds = ColumnBounds {
            min: -2.0,
            max: 4.0,
            missing: 0,
        };

        assert_eq!(normalize_value(0.0, &bounds, Polarity::Cost), 0.0);
        assert!(normalize_value(4.0, &bounds, Polarity::Cost).is_finite());
    }

    #[test]
    fn empty_population_produces_no_values() {
        let criterion = Criterion::new(1, "Harga", 100.0, Polarity::Cost);
        assert!(normalize_column(&[], &criterion).is_empty());
    }
}
