// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Column Mapping
// ─────────────────────────────────────────────────────────────────────
//! Maps arbitrary source column names onto the four canonical roles.
//!
//! Example: `{"tempo": "Ano", "lugar": "ID IBGE", "setor": "ID CNAE",
//! "valor": "Massa Salarial"}`. Columns outside the mapping are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ComplexityError, ComplexityResult};
use crate::observation::{Label, Observation};

/// A tabular row as a JSON object (column name → cell).
pub type JsonRow = Map<String, Value>;

/// Source column names for the canonical roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub tempo: String,
    pub lugar: String,
    pub setor: String,
    pub valor: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            tempo: "tempo".to_string(),
            lugar: "lugar".to_string(),
            setor: "setor".to_string(),
            valor: "valor".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn new(
        tempo: impl Into<String>,
        lugar: impl Into<String>,
        setor: impl Into<String>,
        valor: impl Into<String>,
    ) -> Self {
        Self {
            tempo: tempo.into(),
            lugar: lugar.into(),
            setor: setor.into(),
            valor: valor.into(),
        }
    }

    fn roles(&self) -> [(&'static str, &str); 4] {
        [
            ("tempo", self.tempo.as_str()),
            ("lugar", self.lugar.as_str()),
            ("setor", self.setor.as_str()),
            ("valor", self.valor.as_str()),
        ]
    }

    /// Every role needs a distinct, non-empty source column.
    pub fn validate(&self) -> ComplexityResult<()> {
        let roles = self.roles();
        for (role, column) in &roles {
            if column.trim().is_empty() {
                return Err(ComplexityError::Config(format!(
                    "column for role '{role}' must not be empty"
                )));
            }
        }
        for (i, (role_a, col_a)) in roles.iter().enumerate() {
            for (role_b, col_b) in &roles[i + 1..] {
                if col_a == col_b {
                    return Err(ComplexityError::Config(format!(
                        "roles '{role_a}' and '{role_b}' both map to column '{col_a}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> ComplexityResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ComplexityError::Config(format!("JSON parse error: {e}")))
    }

    /// Read one row into an `Observation`.
    pub fn extract(&self, row: &JsonRow) -> ComplexityResult<Observation> {
        Ok(Observation {
            tempo: self.label(row, &self.tempo)?,
            lugar: self.label(row, &self.lugar)?,
            setor: self.label(row, &self.setor)?,
            valor: self.value(row)?,
        })
    }

    /// Read every row, reporting the index of the first bad one.
    pub fn extract_all(&self, rows: &[JsonRow]) -> ComplexityResult<Vec<Observation>> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                self.extract(row).map_err(|e| match e {
                    ComplexityError::Validation(msg) => {
                        ComplexityError::Validation(format!("row {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }

    fn label(&self, row: &JsonRow, column: &str) -> ComplexityResult<Label> {
        let cell = row.get(column).ok_or_else(|| {
            ComplexityError::Validation(format!("missing column '{column}'"))
        })?;
        Label::from_json(cell).ok_or_else(|| {
            ComplexityError::Validation(format!(
                "column '{column}' must hold an integer or string label, got {cell}"
            ))
        })
    }

    fn value(&self, row: &JsonRow) -> ComplexityResult<Option<f64>> {
        match row.get(&self.valor) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
                ComplexityError::Validation(format!(
                    "column '{}' holds non-numeric value '{s}'",
                    self.valor
                ))
            }),
            Some(other) => Err(ComplexityError::Validation(format!(
                "column '{}' must be numeric, got {other}",
                self.valor
            ))),
        }
    }
}
