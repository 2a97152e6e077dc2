// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Location-Quotient Engine
// ─────────────────────────────────────────────────────────────────────
//! QL(r, c) = observed(r, c) / expected(r, c), where
//! expected(r, c) = rowTotal(r) · colTotal(c) / grandTotal.
//!
//! QL > 1 means the place is more specialised in the sector than a
//! uniform-share null model predicts.

use complexity_types::{ComplexityError, ComplexityResult};

use crate::matrix::{PeriodMatrix, QuotientMatrix};

/// Compute the location-quotient matrix.
///
/// An empty matrix yields an empty result. A non-positive grand, row,
/// or column total means the sanitizer was bypassed: this fails with
/// `DegeneratePeriod` rather than producing NaN/Inf quotients.
pub fn location_quotient(matrix: &PeriodMatrix) -> ComplexityResult<QuotientMatrix> {
    if matrix.is_empty() {
        return Ok(matrix.map(|v| v));
    }

    let degenerate = |reason: String| ComplexityError::DegeneratePeriod {
        period: matrix.period().to_string(),
        reason,
    };

    let total = matrix.total();
    if !(total.is_finite() && total > 0.0) {
        return Err(degenerate(format!("grand total is {total}")));
    }
    let row_sums = matrix.row_sums();
    if let Some((r, t)) = row_sums.iter().enumerate().find(|(_, t)| !(**t > 0.0)) {
        return Err(degenerate(format!(
            "place {} has total {t}",
            matrix.places()[r]
        )));
    }
    let col_sums = matrix.col_sums();
    if let Some((c, t)) = col_sums.iter().enumerate().find(|(_, t)| !(**t > 0.0)) {
        return Err(degenerate(format!(
            "sector {} has total {t}",
            matrix.sectors()[c]
        )));
    }

    let n = matrix.n_sectors();
    let mut cell = 0usize;
    Ok(matrix.map(|observed| {
        let (r, c) = (cell / n, cell % n);
        cell += 1;
        let expected = row_sums[r] * col_sums[c] / total;
        observed / expected
    }))
}
