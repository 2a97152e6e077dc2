// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Period Orchestrator
// ─────────────────────────────────────────────────────────────────────
//! Runs the per-period pipeline over every period and merges the
//! per-cell results back onto the input observations.
//!
//! Per period:
//!   1. Sanitize (drop zero-sum places/sectors)
//!   2. Build the place × sector matrix
//!   3. Location quotients
//!   4. Binary revealed advantage
//!   5. Method of reflections (complexity entry point only)
//!   6. One result cell per (place, sector)
//!
//! The merge is an inner join on (lugar, setor, tempo): observations
//! removed by the sanitizer do not appear in the output, and input
//! order is preserved.

use std::collections::HashMap;

use complexity_types::{
    Activity, AdvantageRecord, CellKey, ColumnMapping, ComplexityConfig, ComplexityRecord,
    ComplexityResult, JsonRow, Label, Observation,
};

use crate::advantage::binarize;
use crate::matrix::{build_period_matrix, AdvantageMatrix, PeriodMatrix, QuotientMatrix};
use crate::quotient::location_quotient;
use crate::reflections::{method_of_reflections, Reflections};
use crate::sanitizer::{distinct_periods, fill_missing, sanitize_period};

/// Matrices of one period, up to the binarizer. All three share axes.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodResult {
    pub period: Label,
    pub matrix: PeriodMatrix,
    pub quotient: QuotientMatrix,
    pub advantage: AdvantageMatrix,
}

impl PeriodResult {
    /// No observation survived sanitization.
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    fn cell_key(&self, r: usize, c: usize) -> CellKey {
        CellKey {
            tempo: self.period.clone(),
            lugar: self.matrix.places()[r].clone(),
            setor: self.matrix.sectors()[c].clone(),
        }
    }

    fn advantage_cells(&self) -> usize {
        self.advantage.data().iter().filter(|&&m| m == 1).count()
    }
}

#[derive(Debug, Clone, Copy)]
struct ComplexityCell {
    ql: f64,
    m: u8,
    kr: f64,
    ks: f64,
    ice: Option<f64>,
    ics: Option<f64>,
}

/// Complexity pipeline over panel data.
#[derive(Debug, Clone)]
pub struct ComplexityPipeline {
    config: ComplexityConfig,
}

impl ComplexityPipeline {
    /// Create a pipeline; the configuration is validated first.
    pub fn new(config: ComplexityConfig) -> ComplexityResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: ComplexityConfig::default(),
        }
    }

    pub fn config(&self) -> &ComplexityConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Per-period stages
    // ------------------------------------------------------------------

    /// Sanitize, build, and compute QL and M for one period of filled
    /// data.
    pub fn period(&self, data: &[Activity], tempo: &Label) -> ComplexityResult<PeriodResult> {
        let slice = sanitize_period(data, tempo);
        let matrix = build_period_matrix(tempo, &slice);
        let quotient = location_quotient(&matrix)?;
        let advantage = binarize(&quotient, self.config.threshold);
        Ok(PeriodResult {
            period: tempo.clone(),
            matrix,
            quotient,
            advantage,
        })
    }

    /// Method of reflections on a period's advantage matrix.
    pub fn reflections(&self, period: &PeriodResult) -> Reflections {
        method_of_reflections(
            &period.advantage,
            self.config.iterations,
            self.config.std_convention,
        )
    }

    /// Visit every non-empty period in first-appearance order.
    /// Returns the number of periods visited.
    fn each_period(
        &self,
        data: &[Activity],
        mut visit: impl FnMut(&PeriodResult),
    ) -> ComplexityResult<usize> {
        let mut visited = 0;
        for tempo in distinct_periods(data) {
            let period = self.period(data, &tempo)?;
            if period.is_empty() {
                log::debug!("period {tempo}: no activity after sanitization, skipped");
                continue;
            }
            log::debug!(
                "period {tempo}: {} places × {} sectors, {} advantage cells",
                period.matrix.n_places(),
                period.matrix.n_sectors(),
                period.advantage_cells()
            );
            visit(&period);
            visited += 1;
        }
        Ok(visited)
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// QL, M, diversity, ubiquity, ICE and ICS for every observation
    /// that survives sanitization.
    pub fn complexity(&self, observations: &[Observation]) -> ComplexityResult<Vec<ComplexityRecord>> {
        let data = fill_missing(observations);
        let mut cells: HashMap<CellKey, ComplexityCell> = HashMap::new();

        let periods = self.each_period(&data, |period| {
            let refl = self.reflections(period);
            for r in 0..period.matrix.n_places() {
                for c in 0..period.matrix.n_sectors() {
                    cells.insert(
                        period.cell_key(r, c),
                        ComplexityCell {
                            ql: period.quotient.get(r, c),
                            m: period.advantage.get(r, c),
                            kr: refl.diversity[r],
                            ks: refl.ubiquity[c],
                            ice: refl.ice[r],
                            ics: refl.ics[c],
                        },
                    );
                }
            }
        })?;

        let records = merge(&data, &cells, |a, cell| ComplexityRecord {
            tempo: a.tempo.clone(),
            lugar: a.lugar.clone(),
            setor: a.setor.clone(),
            valor: a.valor,
            ql: cell.ql,
            m: cell.m,
            kr: cell.kr,
            ks: cell.ks,
            ice: cell.ice,
            ics: cell.ics,
        });
        log::info!(
            "complexity: {periods} period(s), {} of {} observations retained",
            records.len(),
            data.len()
        );
        Ok(records)
    }

    /// QL and M only; identical to `complexity` up to the binarizer.
    pub fn advantage(&self, observations: &[Observation]) -> ComplexityResult<Vec<AdvantageRecord>> {
        let data = fill_missing(observations);
        let mut cells: HashMap<CellKey, (f64, u8)> = HashMap::new();

        let periods = self.each_period(&data, |period| {
            for r in 0..period.matrix.n_places() {
                for c in 0..period.matrix.n_sectors() {
                    cells.insert(
                        period.cell_key(r, c),
                        (period.quotient.get(r, c), period.advantage.get(r, c)),
                    );
                }
            }
        })?;

        let records = merge(&data, &cells, |a, &(ql, m)| AdvantageRecord {
            tempo: a.tempo.clone(),
            lugar: a.lugar.clone(),
            setor: a.setor.clone(),
            valor: a.valor,
            ql,
            m,
        });
        log::info!(
            "advantage: {periods} period(s), {} of {} observations retained",
            records.len(),
            data.len()
        );
        Ok(records)
    }

    /// `complexity` over tabular rows with arbitrary column names.
    pub fn complexity_from_rows(
        &self,
        rows: &[JsonRow],
        mapping: &ColumnMapping,
    ) -> ComplexityResult<Vec<ComplexityRecord>> {
        mapping.validate()?;
        let observations = mapping.extract_all(rows)?;
        self.complexity(&observations)
    }

    /// `advantage` over tabular rows with arbitrary column names.
    pub fn advantage_from_rows(
        &self,
        rows: &[JsonRow],
        mapping: &ColumnMapping,
    ) -> ComplexityResult<Vec<AdvantageRecord>> {
        mapping.validate()?;
        let observations = mapping.extract_all(rows)?;
        self.advantage(&observations)
    }
}

/// Inner join of the filled observations with the per-cell results.
fn merge<C, R>(
    data: &[Activity],
    cells: &HashMap<CellKey, C>,
    build: impl Fn(&Activity, &C) -> R,
) -> Vec<R> {
    data.iter()
        .filter_map(|a| cells.get(&CellKey::of(a)).map(|cell| build(a, cell)))
        .collect()
}
