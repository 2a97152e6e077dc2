// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Matrix Builder
// ─────────────────────────────────────────────────────────────────────
//! Dense place × sector matrices for a single period.
//!
//! Storage is row-major (`data[r * n_sectors + c]`). Rows are places,
//! columns are sectors, both sorted ascending by label.

use std::collections::BTreeSet;

use complexity_types::{Activity, ComplexityError, ComplexityResult, Label};

/// A dense matrix whose rows and columns carry their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix<T> {
    period: Label,
    places: Vec<Label>,
    sectors: Vec<Label>,
    data: Vec<T>,
}

/// Summed activity per (place, sector).
pub type PeriodMatrix = LabeledMatrix<f64>;
/// Location quotients, same axes as the period matrix.
pub type QuotientMatrix = LabeledMatrix<f64>;
/// Binary revealed comparative advantage (M).
pub type AdvantageMatrix = LabeledMatrix<u8>;

impl<T: Copy> LabeledMatrix<T> {
    /// Assemble from parts; `data` must be `places.len() * sectors.len()`.
    pub fn from_parts(
        period: Label,
        places: Vec<Label>,
        sectors: Vec<Label>,
        data: Vec<T>,
    ) -> ComplexityResult<Self> {
        if data.len() != places.len() * sectors.len() {
            return Err(ComplexityError::Numerical(format!(
                "matrix data has {} cells, expected {} × {}",
                data.len(),
                places.len(),
                sectors.len()
            )));
        }
        Ok(Self {
            period,
            places,
            sectors,
            data,
        })
    }

    pub fn period(&self) -> &Label {
        &self.period
    }

    pub fn places(&self) -> &[Label] {
        &self.places
    }

    pub fn sectors(&self) -> &[Label] {
        &self.sectors
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn n_places(&self) -> usize {
        self.places.len()
    }

    pub fn n_sectors(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.sectors.len() + c]
    }

    pub fn row(&self, r: usize) -> &[T] {
        let n = self.sectors.len();
        &self.data[r * n..(r + 1) * n]
    }

    /// Look up a cell by labels.
    pub fn lookup(&self, place: &Label, sector: &Label) -> Option<T> {
        let r = self.places.binary_search(place).ok()?;
        let c = self.sectors.binary_search(sector).ok()?;
        Some(self.get(r, c))
    }

    /// Apply `f` cell-wise, keeping period and axis labels.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> LabeledMatrix<U> {
        LabeledMatrix {
            period: self.period.clone(),
            places: self.places.clone(),
            sectors: self.sectors.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Cell-wise combination of two matrices over the same axes.
    pub fn zip_map<U: Copy, V>(
        &self,
        other: &LabeledMatrix<U>,
        mut f: impl FnMut(T, U) -> V,
    ) -> ComplexityResult<LabeledMatrix<V>> {
        if self.places != other.places || self.sectors != other.sectors {
            return Err(ComplexityError::Numerical(
                "matrices disagree on place/sector axes".to_string(),
            ));
        }
        Ok(LabeledMatrix {
            period: self.period.clone(),
            places: self.places.clone(),
            sectors: self.sectors.clone(),
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl<T: Copy + Into<f64>> LabeledMatrix<T> {
    /// Per-place totals.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n_places())
            .map(|r| self.row(r).iter().map(|&v| -> f64 { v.into() }).sum())
            .collect()
    }

    /// Per-sector totals.
    pub fn col_sums(&self) -> Vec<f64> {
        let n = self.n_sectors();
        let mut sums = vec![0.0; n];
        for (i, &v) in self.data.iter().enumerate() {
            let v: f64 = v.into();
            sums[i % n] += v;
        }
        sums
    }

    /// Grand total over all cells.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| -> f64 { v.into() }).sum()
    }
}

/// Pivot one sanitized period slice into a dense matrix.
///
/// Duplicate (place, sector) keys are summed; unobserved pairs are 0.
/// Every activity is assumed to belong to `period`.
pub fn build_period_matrix(period: &Label, slice: &[&Activity]) -> PeriodMatrix {
    let places: Vec<Label> = slice
        .iter()
        .map(|a| &a.lugar)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    let sectors: Vec<Label> = slice
        .iter()
        .map(|a| &a.setor)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let n = sectors.len();
    let mut data = vec![0.0; places.len() * n];
    for a in slice {
        // Both lookups hit: the axes were collected from this slice.
        if let (Ok(r), Ok(c)) = (places.binary_search(&a.lugar), sectors.binary_search(&a.setor)) {
            data[r * n + c] += a.valor;
        }
    }

    LabeledMatrix {
        period: period.clone(),
        places,
        sectors,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(place: &str, sector: &str, valor: f64) -> Activity {
        Activity {
            tempo: Label::from(2020),
            lugar: Label::from(place),
            setor: Label::from(sector),
            valor,
        }
    }

    #[test]
    fn test_axes_sorted_and_filled() {
        let rows = [act("B", "Y", 3.0), act("A", "X", 1.0), act("B", "X", 2.0)];
        let slice: Vec<&Activity> = rows.iter().collect();
        let m = build_period_matrix(&Label::from(2020), &slice);
        assert_eq!(m.places(), &[Label::from("A"), Label::from("B")]);
        assert_eq!(m.sectors(), &[Label::from("X"), Label::from("Y")]);
        assert_eq!(m.data(), &[1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_duplicates_summed() {
        let rows = [act("A", "X", 1.5), act("A", "X", 2.5), act("A", "Y", 1.0)];
        let slice: Vec<&Activity> = rows.iter().collect();
        let m = build_period_matrix(&Label::from(2020), &slice);
        assert_eq!(m.lookup(&Label::from("A"), &Label::from("X")), Some(4.0));
        assert_eq!(m.n_places(), 1);
        assert_eq!(m.n_sectors(), 2);
    }

    #[test]
    fn test_total_equals_sum_of_cells() {
        let rows = [
            act("A", "X", 4.0),
            act("A", "Y", 6.0),
            act("B", "Y", 5.0),
            act("C", "Z", 7.0),
        ];
        let slice: Vec<&Activity> = rows.iter().collect();
        let m = build_period_matrix(&Label::from(2020), &slice);
        let cell_sum: f64 = m.data().iter().sum();
        assert!((m.total() - cell_sum).abs() < 1e-12);
        assert!((m.row_sums().iter().sum::<f64>() - m.total()).abs() < 1e-12);
        assert!((m.col_sums().iter().sum::<f64>() - m.total()).abs() < 1e-12);
        assert_eq!(m.col_sums(), vec![4.0, 11.0, 7.0]);
    }

    #[test]
    fn test_empty_slice() {
        let m = build_period_matrix(&Label::from(2020), &[]);
        assert!(m.is_empty());
        assert_eq!(m.n_places(), 0);
        assert!(m.row_sums().is_empty());
        assert!(m.col_sums().is_empty());
        assert_eq!(m.total(), 0.0);
    }

    #[test]
    fn test_from_parts_shape_check() {
        let err = LabeledMatrix::from_parts(
            Label::from(1),
            vec![Label::from("A")],
            vec![Label::from("X"), Label::from("Y")],
            vec![1.0],
        );
        assert!(matches!(err, Err(ComplexityError::Numerical(_))));
    }

    #[test]
    fn test_zip_map_rejects_mismatched_axes() {
        let a = LabeledMatrix::from_parts(
            Label::from(1),
            vec![Label::from("A")],
            vec![Label::from("X")],
            vec![1.0],
        )
        .unwrap();
        let b = LabeledMatrix::from_parts(
            Label::from(1),
            vec![Label::from("B")],
            vec![Label::from("X")],
            vec![1u8],
        )
        .unwrap();
        assert!(a.zip_map(&b, |x, y| x * f64::from(y)).is_err());
    }
}
