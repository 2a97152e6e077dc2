// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Revealed-Advantage Binarizer
// ─────────────────────────────────────────────────────────────────────

use crate::matrix::{AdvantageMatrix, QuotientMatrix};

/// Binary revealed comparative advantage: 1 where `QL >= threshold`.
///
/// NaN quotients compare false and map to 0.
pub fn binarize(ql: &QuotientMatrix, threshold: f64) -> AdvantageMatrix {
    ql.map(|q| u8::from(q >= threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use complexity_types::Label;

    use crate::matrix::LabeledMatrix;
    use crate::quotient::location_quotient;

    fn quotients(data: Vec<f64>) -> QuotientMatrix {
        LabeledMatrix::from_parts(
            Label::from(1),
            vec![Label::from("A"), Label::from("B")],
            vec![Label::from("X"), Label::from("Y")],
            data,
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = binarize(&quotients(vec![1.0, 0.999, 2.5, 0.0]), 1.0);
        assert_eq!(m.data(), &[1, 0, 1, 0]);
    }

    #[test]
    fn test_custom_threshold() {
        let m = binarize(&quotients(vec![1.0, 1.2, 1.5, 3.0]), 1.5);
        assert_eq!(m.data(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_non_finite_quotients() {
        let m = binarize(&quotients(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0]), 1.0);
        assert_eq!(m.data(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_binary_fixture_round_trip() {
        // Re-running QL + binarize on a binary matrix reproduces it.
        let fixtures: [[f64; 4]; 2] = [[1.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]];
        for fixture in fixtures {
            let binary = binarize(&location_quotient(&quotients(fixture.to_vec())).unwrap(), 1.0);
            let again = binarize(&location_quotient(&binary.map(f64::from)).unwrap(), 1.0);
            assert_eq!(again, binary);
            let as_f64: Vec<f64> = binary.data().iter().map(|&v| f64::from(v)).collect();
            assert_eq!(as_f64, fixture.to_vec());
        }
    }
}
