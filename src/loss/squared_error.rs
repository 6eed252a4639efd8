/// Squared-error loss, the only convergence signal the trainer uses.
pub struct SquaredError;

impl SquaredError {
    /// Single-output term: `(expected - actual)²`
    pub fn term(expected: f64, actual: f64) -> f64 {
        (expected - actual).powi(2)
    }

    /// Per-case loss: `0.5 · sum((expected - actual)²)`, not averaged.
    pub fn loss(expected: &[f64], actual: &[f64]) -> f64 {
        expected.iter().zip(actual.iter())
            .map(|(e, a)| 0.5 * SquaredError::term(*e, *a))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_half_sum_of_squares() {
        assert_eq!(SquaredError::term(1.0, 0.25), 0.5625);
        assert_eq!(SquaredError::loss(&[1.0, 0.0], &[0.5, 0.5]), 0.25);
        assert_eq!(SquaredError::loss(&[0.3], &[0.3]), 0.0);
    }
}
