// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Data Sanitizer
// ─────────────────────────────────────────────────────────────────────
//! Missing-value fill and the zero-sum guard.
//!
//! A place or sector with zero total activity in a period would give a
//! zero row/column total and divide by zero in the location quotient.
//! Such places and sectors are dropped from that period's slice.

use std::collections::{HashMap, HashSet};

use complexity_types::{Activity, Label, Observation};

/// Fill missing values with 0 across the whole dataset.
///
/// Pure: returns a filled copy, order preserved.
pub fn fill_missing(observations: &[Observation]) -> Vec<Activity> {
    let missing = observations
        .iter()
        .filter(|o| o.valor.map_or(true, f64::is_nan))
        .count();
    if missing > 0 {
        log::debug!("fill_missing: {missing} missing values replaced by 0");
    }
    observations.iter().map(Observation::filled).collect()
}

/// Distinct periods in order of first appearance.
pub fn distinct_periods(data: &[Activity]) -> Vec<Label> {
    let mut seen = HashSet::new();
    data.iter()
        .filter(|a| seen.insert(&a.tempo))
        .map(|a| a.tempo.clone())
        .collect()
}

/// Observations of `tempo` whose place total and sector total are both
/// non-zero within the period.
pub fn sanitize_period<'a>(data: &'a [Activity], tempo: &Label) -> Vec<&'a Activity> {
    let slice: Vec<&Activity> = data.iter().filter(|a| &a.tempo == tempo).collect();

    let mut place_totals: HashMap<&Label, f64> = HashMap::new();
    let mut sector_totals: HashMap<&Label, f64> = HashMap::new();
    for a in &slice {
        *place_totals.entry(&a.lugar).or_insert(0.0) += a.valor;
        *sector_totals.entry(&a.setor).or_insert(0.0) += a.valor;
    }

    let kept: Vec<&Activity> = slice
        .iter()
        .copied()
        .filter(|a| {
            place_totals.get(&a.lugar).is_some_and(|&t| t != 0.0)
                && sector_totals.get(&a.setor).is_some_and(|&t| t != 0.0)
        })
        .collect();

    if kept.len() < slice.len() {
        log::debug!(
            "sanitize_period {tempo}: dropped {} of {} observations on zero-sum places/sectors",
            slice.len() - kept.len(),
            slice.len()
        );
    }
    kept
}
