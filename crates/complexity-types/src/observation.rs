// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Observation Types
// ─────────────────────────────────────────────────────────────────────
//! Labels and panel observations in the four canonical roles:
//! `tempo` (period), `lugar` (place), `setor` (sector), `valor` (value).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a period, place, or sector.
///
/// Integer codes (years, IBGE municipality ids, CNAE classes) and free
/// text are both common. Ordering puts every integer before every text
/// label, so matrix axes sort numerically when the codes are numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Text(String),
}

impl Label {
    /// Read a label from a JSON cell.
    ///
    /// Integers and strings map directly; floats are accepted only when
    /// integral (dataframes often widen integer id columns to float).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Label::Int(i));
                }
                let f = n.as_f64()?;
                // i64::MAX as f64 rounds up to 2^63, which is out of range.
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Some(Label::Int(f as i64))
                } else {
                    None
                }
            }
            Value::String(s) => Some(Label::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{i}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(value.into())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

/// One raw panel observation. `valor` may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub tempo: Label,
    pub lugar: Label,
    pub setor: Label,
    #[serde(default)]
    pub valor: Option<f64>,
}

impl Observation {
    pub fn new(
        tempo: impl Into<Label>,
        lugar: impl Into<Label>,
        setor: impl Into<Label>,
        valor: Option<f64>,
    ) -> Self {
        Self {
            tempo: tempo.into(),
            lugar: lugar.into(),
            setor: setor.into(),
            valor,
        }
    }

    /// Coerce a missing (or NaN) value to 0.
    pub fn filled(&self) -> Activity {
        Activity {
            tempo: self.tempo.clone(),
            lugar: self.lugar.clone(),
            setor: self.setor.clone(),
            valor: self.valor.filter(|v| !v.is_nan()).unwrap_or(0.0),
        }
    }
}

/// An observation whose value has been filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub tempo: Label,
    pub lugar: Label,
    pub setor: Label,
    pub valor: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ints_sort_before_text() {
        let mut labels = vec![Label::from("b"), Label::from(10), Label::from("a"), Label::from(2)];
        labels.sort();
        assert_eq!(
            labels,
            vec![Label::from(2), Label::from(10), Label::from("a"), Label::from("b")]
        );
    }

    #[test]
    fn test_from_json_integral_float() {
        assert_eq!(Label::from_json(&json!(2019.0)), Some(Label::Int(2019)));
        assert_eq!(Label::from_json(&json!(2019.5)), None);
        assert_eq!(Label::from_json(&json!("3550308")), Some(Label::from("3550308")));
        assert_eq!(Label::from_json(&Value::Null), None);
    }

    #[test]
    fn test_from_json_out_of_range_float() {
        assert_eq!(Label::from_json(&json!(9_223_372_036_854_775_808.0_f64)), None);
        assert_eq!(Label::from_json(&json!(u64::MAX)), None);
        assert_eq!(
            Label::from_json(&json!(-9_223_372_036_854_775_808.0_f64)),
            Some(Label::Int(i64::MIN))
        );
    }

    #[test]
    fn test_from_json_rejects_bool() {
        assert_eq!(Label::from_json(&json!(true)), None);
    }

    #[test]
    fn test_untagged_serde() {
        let s = serde_json::to_string(&vec![Label::from(1), Label::from("x")]).unwrap();
        assert_eq!(s, r#"[1,"x"]"#);
        let back: Vec<Label> = serde_json::from_str(&s).unwrap();
        assert_eq!(back, vec![Label::from(1), Label::from("x")]);
    }

    #[test]
    fn test_filled_missing_and_nan() {
        let obs = Observation::new(2020, "A", "X", None);
        assert_eq!(obs.filled().valor, 0.0);
        let obs = Observation::new(2020, "A", "X", Some(f64::NAN));
        assert_eq!(obs.filled().valor, 0.0);
        let obs = Observation::new(2020, "A", "X", Some(4.5));
        assert_eq!(obs.filled().valor, 4.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Label::from(7).to_string(), "7");
        assert_eq!(Label::from("SP").to_string(), "SP");
    }
}
