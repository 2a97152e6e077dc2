// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Result Records
// ─────────────────────────────────────────────────────────────────────
//! Output rows: the canonical observation columns plus the indicator
//! columns `QL`, `M`, `Kr`, `Ks`, `ICE`, `ICS`.

use serde::{Deserialize, Serialize};

use crate::observation::{Activity, Label};

/// Merge key of a result row: `(lugar, setor, tempo)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub tempo: Label,
    pub lugar: Label,
    pub setor: Label,
}

impl CellKey {
    pub fn of(activity: &Activity) -> Self {
        Self {
            tempo: activity.tempo.clone(),
            lugar: activity.lugar.clone(),
            setor: activity.setor.clone(),
        }
    }
}

/// Location quotient and binary revealed advantage for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvantageRecord {
    pub tempo: Label,
    pub lugar: Label,
    pub setor: Label,
    pub valor: f64,
    #[serde(rename = "QL")]
    pub ql: f64,
    #[serde(rename = "M")]
    pub m: u8,
}

/// Full complexity indicators for one observation.
///
/// `kr`/`ks` are the raw diversity of the place and ubiquity of the
/// sector. `ice`/`ics` are `None` when standardization is undefined
/// for the period (zero spread, or the place/sector was excluded from
/// the reflections for having no revealed advantage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityRecord {
    pub tempo: Label,
    pub lugar: Label,
    pub setor: Label,
    pub valor: f64,
    #[serde(rename = "QL")]
    pub ql: f64,
    #[serde(rename = "M")]
    pub m: u8,
    #[serde(rename = "Kr")]
    pub kr: f64,
    #[serde(rename = "Ks")]
    pub ks: f64,
    #[serde(rename = "ICE")]
    pub ice: Option<f64>,
    #[serde(rename = "ICS")]
    pub ics: Option<f64>,
}

impl ComplexityRecord {
    /// Drop the reflection columns.
    pub fn advantage(&self) -> AdvantageRecord {
        AdvantageRecord {
            tempo: self.tempo.clone(),
            lugar: self.lugar.clone(),
            setor: self.setor.clone(),
            valor: self.valor,
            ql: self.ql,
            m: self.m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComplexityRecord {
        ComplexityRecord {
            tempo: Label::from(2020),
            lugar: Label::from("A"),
            setor: Label::from("X"),
            valor: 10.0,
            ql: 2.0,
            m: 1,
            kr: 1.0,
            ks: 1.0,
            ice: None,
            ics: Some(0.5),
        }
    }

    #[test]
    fn test_indicator_column_names() {
        let v = serde_json::to_value(sample()).unwrap();
        for col in ["tempo", "lugar", "setor", "valor", "QL", "M", "Kr", "Ks", "ICE", "ICS"] {
            assert!(v.get(col).is_some(), "missing column {col}");
        }
        assert!(v["ICE"].is_null());
        assert_eq!(v["ICS"], serde_json::json!(0.5));
    }

    #[test]
    fn test_advantage_projection() {
        let adv = sample().advantage();
        assert_eq!(adv.ql, 2.0);
        assert_eq!(adv.m, 1);
        assert_eq!(adv.lugar, Label::from("A"));
    }

    #[test]
    fn test_cell_key_of_activity() {
        let a = Activity {
            tempo: Label::from(1),
            lugar: Label::from("A"),
            setor: Label::from("X"),
            valor: 3.0,
        };
        let key = CellKey::of(&a);
        assert_eq!(key.setor, Label::from("X"));
    }
}
