// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Method of Reflections
// ─────────────────────────────────────────────────────────────────────
//! Iterative diversity/ubiquity propagation over the bipartite binary
//! advantage matrix M, followed by z-score standardization.
//!
//! With Kr₀ = row sums of M and Ks₀ = column sums of M:
//!
//! ```text
//! Kr'(r) = Σ_c M(r,c) · Ks(c) / Kr₀(r)
//! Ks'(s) = Σ_r M(r,s) · Kr(r) / Ks₀(s)
//! ```
//!
//! Both updates read the previous step's vectors. After the fixed
//! iteration count one more Kr half-step is taken from the last Ks;
//! ICE standardizes that Kr and ICS standardizes the last Ks.
//!
//! Places without any revealed advantage (Kr₀ = 0) and sectors where
//! no place has one (Ks₀ = 0) would divide by zero. They are left out
//! of the iteration and of the standardization; their indices are
//! `None`. Dropping an all-zero column never changes a row sum (and
//! vice versa), so a single exclusion pass is enough.

use complexity_types::StdConvention;

use crate::matrix::AdvantageMatrix;

/// Output of the method of reflections for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct Reflections {
    /// Kr₀: number of sectors with revealed advantage, per place.
    pub diversity: Vec<f64>,
    /// Ks₀: number of places with revealed advantage, per sector.
    pub ubiquity: Vec<f64>,
    /// Standardized place complexity (ICE), aligned with the places.
    pub ice: Vec<Option<f64>>,
    /// Standardized sector complexity (ICS), aligned with the sectors.
    pub ics: Vec<Option<f64>>,
}

/// Run the method of reflections on `m`.
pub fn method_of_reflections(
    m: &AdvantageMatrix,
    iterations: usize,
    convention: StdConvention,
) -> Reflections {
    let kr0 = m.row_sums();
    let ks0 = m.col_sums();

    let rows: Vec<usize> = (0..kr0.len()).filter(|&r| kr0[r] > 0.0).collect();
    let cols: Vec<usize> = (0..ks0.len()).filter(|&c| ks0[c] > 0.0).collect();
    if rows.len() < kr0.len() || cols.len() < ks0.len() {
        log::warn!(
            "reflections {}: {} place(s) without revealed advantage and {} sector(s) \
             without any specialised place excluded; their ICE/ICS are undefined",
            m.period(),
            kr0.len() - rows.len(),
            ks0.len() - cols.len()
        );
    }

    let mut kr: Vec<f64> = rows.iter().map(|&r| kr0[r]).collect();
    let mut ks: Vec<f64> = cols.iter().map(|&c| ks0[c]).collect();

    for _ in 0..iterations {
        let kr_next = reflect_places(m, &rows, &cols, &kr0, &ks);
        let ks_next = reflect_sectors(m, &rows, &cols, &ks0, &kr);
        kr = kr_next;
        ks = ks_next;
    }
    let kr = reflect_places(m, &rows, &cols, &kr0, &ks);

    Reflections {
        ice: scatter(kr0.len(), &rows, standardize(&kr, convention)),
        ics: scatter(ks0.len(), &cols, standardize(&ks, convention)),
        diversity: kr0,
        ubiquity: ks0,
    }
}

/// Kr'(r) = Σ_c M(r,c) · Ks(c) / Kr₀(r) over the active rows/columns.
fn reflect_places(
    m: &AdvantageMatrix,
    rows: &[usize],
    cols: &[usize],
    kr0: &[f64],
    ks: &[f64],
) -> Vec<f64> {
    rows.iter()
        .map(|&r| {
            let mut acc = 0.0;
            for (j, &c) in cols.iter().enumerate() {
                acc += f64::from(m.get(r, c)) * ks[j];
            }
            acc / kr0[r]
        })
        .collect()
}

/// Ks'(s) = Σ_r M(r,s) · Kr(r) / Ks₀(s) over the active rows/columns.
fn reflect_sectors(
    m: &AdvantageMatrix,
    rows: &[usize],
    cols: &[usize],
    ks0: &[f64],
    kr: &[f64],
) -> Vec<f64> {
    cols.iter()
        .map(|&c| {
            let mut acc = 0.0;
            for (i, &r) in rows.iter().enumerate() {
                acc += f64::from(m.get(r, c)) * kr[i];
            }
            acc / ks0[c]
        })
        .collect()
}

/// Place active-subset values back at their full-axis positions.
fn scatter(len: usize, active: &[usize], values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    let mut out = vec![None; len];
    for (&idx, v) in active.iter().zip(values) {
        out[idx] = v;
    }
    out
}

/// Z-score `values`: (x − mean) / std.
///
/// Returns all `None` when the standard deviation is undefined: too few
/// values for the convention, or an exactly zero / non-finite spread
/// (every place equally complex, as in a perfectly specialised or
/// perfectly uniform period). A tiny but nonzero spread is kept: on
/// well-connected matrices the reflections contract Kr towards its mean
/// and the z-scores still rank the places.
pub fn standardize(values: &[f64], convention: StdConvention) -> Vec<Option<f64>> {
    let n = values.len();
    let ddof = convention.ddof();
    if n == 0 || n <= ddof {
        return vec![None; n];
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|&x| (x - mean) * (x - mean)).sum();
    let std = (ss / (n - ddof) as f64).sqrt();

    if !std.is_finite() || std == 0.0 {
        log::debug!("standardize: zero spread over {n} values (mean {mean:.6}), indices undefined");
        return vec![None; n];
    }

    values.iter().map(|&x| Some((x - mean) / std)).collect()
}
