// ── Experiment-run domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, RunId};

/// A logged metric or hyperparameter value.
///
/// Numbers and free-form text share one wire field, so the value is an
/// untagged union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// One named metric or hyperparameter entry, order-significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: ParamValue,
}

impl KeyValue {
    pub fn number(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value: ParamValue::Number(value),
        }
    }

    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: ParamValue::Text(value.into()),
        }
    }
}

/// A flattened experiment run — the chart's input record.
///
/// Pixel coordinates are never stored here; they belong to per-render
/// marks derived from the current scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: RunId,
    pub name: String,
    pub project_id: ProjectId,
    pub date_created: DateTime<Utc>,
    pub metrics: Vec<KeyValue>,
    pub hyperparameters: Vec<KeyValue>,
}

impl RunRecord {
    /// Numeric value of the named metric, when logged as a number.
    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|kv| kv.key == name)
            .and_then(|kv| kv.value.as_number())
    }

    /// Metric names in logged order.
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|kv| kv.key.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> RunRecord {
        RunRecord {
            id: RunId::from("r1"),
            name: "run one".into(),
            project_id: ProjectId::from("p1"),
            date_created: Utc.with_ymd_and_hms(2019, 5, 3, 14, 30, 0).unwrap(),
            metrics: vec![
                KeyValue::number("val_acc", 0.9134),
                KeyValue::text("optimizer", "adam"),
            ],
            hyperparameters: vec![KeyValue::number("lr", 0.001)],
        }
    }

    #[test]
    fn metric_value_resolves_numbers_only() {
        let r = record();
        assert_eq!(r.metric_value("val_acc"), Some(0.9134));
        assert_eq!(r.metric_value("optimizer"), None);
        assert_eq!(r.metric_value("missing"), None);
    }

    #[test]
    fn param_value_is_untagged_on_the_wire() {
        let n: ParamValue = serde_json::from_str("0.25").unwrap();
        assert_eq!(n, ParamValue::Number(0.25));
        let t: ParamValue = serde_json::from_str("\"adam\"").unwrap();
        assert_eq!(t, ParamValue::Text("adam".into()));
    }

    #[test]
    fn metric_names_preserve_order() {
        let r = record();
        let names: Vec<_> = r.metric_names().collect();
        assert_eq!(names, vec!["val_acc", "optimizer"]);
    }
}
