// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Complexity Kernel.
//!
//! Rows are passed as a list of dicts (e.g. `df.to_dict("records")`)
//! together with a `{"tempo", "lugar", "setor", "valor"}` column
//! mapping; results come back as a list of dicts with the canonical
//! columns plus the indicator columns.
//!
//! - Kernel errors (bad config, malformed rows, degenerate periods)
//!   surface as `ValueError`.
//! - `None` and NaN values are treated as missing (0); cells follow the
//!   same parsing rules as the Rust `ColumnMapping` (numeric strings are
//!   values, blank strings are missing, `bool` is rejected).
//!
//! Install: `pip install -e crates/complexity-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from complexity_kernel import calcule_ic, ComplexityConfig
//!
//! cols = {"tempo": "Ano", "lugar": "ID IBGE", "setor": "ID CNAE", "valor": "Massa Salarial"}
//! rows = calcule_ic(df.to_dict("records"), cols, ComplexityConfig(iterations=19))
//! ```

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyList};
use serde_json::{Number, Value};

use complexity_core::{convergence_index, ComplexityPipeline};
use complexity_types::{
    ColumnMapping, ComplexityConfig, ComplexityError, JsonRow, Label, StdConvention,
};

fn to_py_err(e: ComplexityError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── PyComplexityConfig ─────────────────────────────────────────────

/// Python-visible pipeline configuration.
#[pyclass(name = "ComplexityConfig")]
#[derive(Clone)]
struct PyComplexityConfig {
    inner: ComplexityConfig,
}

#[pymethods]
impl PyComplexityConfig {
    #[new]
    #[pyo3(signature = (threshold = 1.0, iterations = 19, std_convention = "sample"))]
    fn new(threshold: f64, iterations: usize, std_convention: &str) -> PyResult<Self> {
        let std_convention = match std_convention {
            "sample" => StdConvention::Sample,
            "population" => StdConvention::Population,
            other => {
                return Err(PyValueError::new_err(format!(
                    "std_convention must be 'sample' or 'population', got '{other}'"
                )))
            }
        };
        let config = ComplexityConfig {
            threshold,
            iterations,
            std_convention,
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = ComplexityConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn threshold(&self) -> f64 {
        self.inner.threshold
    }

    #[getter]
    fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    fn std_convention(&self) -> &'static str {
        match self.inner.std_convention {
            StdConvention::Sample => "sample",
            StdConvention::Population => "population",
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ComplexityConfig(threshold={}, iterations={}, std_convention='{}')",
            self.inner.threshold,
            self.inner.iterations,
            self.std_convention()
        )
    }
}

// ─── Row conversion ─────────────────────────────────────────────────

fn mapping_from_dict(cols: &HashMap<String, String>) -> PyResult<ColumnMapping> {
    let role = |name: &str| {
        cols.get(name)
            .cloned()
            .ok_or_else(|| PyValueError::new_err(format!("cols is missing role '{name}'")))
    };
    Ok(ColumnMapping::new(role("tempo")?, role("lugar")?, role("setor")?, role("valor")?))
}

/// Python cell → JSON cell, so rows go through the same
/// `ColumnMapping` rules as the Rust entry points. `bool` is checked
/// before `int`, since Python's `True` is also an `int`.
fn json_cell(cell: &Bound<'_, PyAny>) -> PyResult<Value> {
    if cell.is_none() {
        return Ok(Value::Null);
    }
    if cell.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(cell.extract::<bool>()?));
    }
    if let Ok(i) = cell.extract::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(s) = cell.extract::<String>() {
        return Ok(Value::String(s));
    }
    if let Ok(f) = cell.extract::<f64>() {
        // NaN from a dataframe is a missing value.
        return Ok(Number::from_f64(f).map_or(Value::Null, Value::Number));
    }
    Err(PyValueError::new_err(format!(
        "unsupported cell type '{}'",
        cell.get_type().name()?
    )))
}

fn json_rows(rows: &[Bound<'_, PyDict>], mapping: &ColumnMapping) -> PyResult<Vec<JsonRow>> {
    let columns = [&mapping.tempo, &mapping.lugar, &mapping.setor, &mapping.valor];
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let mut out = JsonRow::new();
            for column in columns {
                if let Some(cell) = row.get_item(column.as_str())? {
                    let value = json_cell(&cell).map_err(|e| {
                        PyValueError::new_err(format!("row {i}: column '{column}': {e}"))
                    })?;
                    out.insert(column.clone(), value);
                }
            }
            Ok(out)
        })
        .collect()
}

fn set_label(dict: &Bound<'_, PyDict>, key: &str, label: &Label) -> PyResult<()> {
    match label {
        Label::Int(i) => dict.set_item(key, *i),
        Label::Text(s) => dict.set_item(key, s.as_str()),
    }
}

fn pipeline_for(config: Option<PyComplexityConfig>) -> PyResult<ComplexityPipeline> {
    let config = config.map(|c| c.inner).unwrap_or_default();
    ComplexityPipeline::new(config).map_err(to_py_err)
}

// ─── Entry points ───────────────────────────────────────────────────

/// Full complexity indicators: QL, M, Kr, Ks, ICE, ICS.
#[pyfunction]
#[pyo3(signature = (rows, cols, config = None))]
fn calcule_ic<'py>(
    py: Python<'py>,
    rows: Vec<Bound<'py, PyDict>>,
    cols: HashMap<String, String>,
    config: Option<PyComplexityConfig>,
) -> PyResult<Bound<'py, PyList>> {
    let mapping = mapping_from_dict(&cols)?;
    let rows = json_rows(&rows, &mapping)?;
    let records = pipeline_for(config)?
        .complexity_from_rows(&rows, &mapping)
        .map_err(to_py_err)?;

    let out = PyList::empty(py);
    for rec in &records {
        let dict = PyDict::new(py);
        set_label(&dict, "tempo", &rec.tempo)?;
        set_label(&dict, "lugar", &rec.lugar)?;
        set_label(&dict, "setor", &rec.setor)?;
        dict.set_item("valor", rec.valor)?;
        dict.set_item("QL", rec.ql)?;
        dict.set_item("M", rec.m)?;
        dict.set_item("Kr", rec.kr)?;
        dict.set_item("Ks", rec.ks)?;
        dict.set_item("ICE", rec.ice)?;
        dict.set_item("ICS", rec.ics)?;
        out.append(dict)?;
    }
    Ok(out)
}

/// Location quotients and revealed advantage only: QL, M.
#[pyfunction]
#[pyo3(signature = (rows, cols, config = None))]
fn calcule_m<'py>(
    py: Python<'py>,
    rows: Vec<Bound<'py, PyDict>>,
    cols: HashMap<String, String>,
    config: Option<PyComplexityConfig>,
) -> PyResult<Bound<'py, PyList>> {
    let mapping = mapping_from_dict(&cols)?;
    let rows = json_rows(&rows, &mapping)?;
    let records = pipeline_for(config)?
        .advantage_from_rows(&rows, &mapping)
        .map_err(to_py_err)?;

    let out = PyList::empty(py);
    for rec in &records {
        let dict = PyDict::new(py);
        set_label(&dict, "tempo", &rec.tempo)?;
        set_label(&dict, "lugar", &rec.lugar)?;
        set_label(&dict, "setor", &rec.setor)?;
        dict.set_item("valor", rec.valor)?;
        dict.set_item("QL", rec.ql)?;
        dict.set_item("M", rec.m)?;
        out.append(dict)?;
    }
    Ok(out)
}

/// Convergence index `(c - d) / (c + d)`; `None` when `c + d == 0`.
#[pyfunction]
fn calcule_iconv(c: f64, d: f64) -> Option<f64> {
    convergence_index(c, d)
}

// ─── Module ─────────────────────────────────────────────────────────

#[pymodule]
fn complexity_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyComplexityConfig>()?;
    m.add_function(wrap_pyfunction!(calcule_ic, m)?)?;
    m.add_function(wrap_pyfunction!(calcule_m, m)?)?;
    m.add_function(wrap_pyfunction!(calcule_iconv, m)?)?;
    Ok(())
}
