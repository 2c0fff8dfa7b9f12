//! Comparison of a replay against reference observations.
//!
//! A reference is a JSON-lines file with one observation per step, opening state
//! first. Only the fields present in a reference line are compared, so references may
//! be trimmed down to the fields that matter.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, RuntimeError};
use crate::replay::ReplayReport;
use crate::repository::{RepositoryError, read_json_lines};

/// First mismatch within one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub step: usize,
    /// JSON path into the observation, e.g. `$.enemies[0].hp`.
    pub path: String,
    pub expected: Value,
    /// `null` when the field is absent from the replay.
    pub actual: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub steps_compared: usize,
    /// At most one entry per step, in step order.
    pub divergences: Vec<Divergence>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.divergences.is_empty()
    }

    pub fn first(&self) -> Option<&Divergence> {
        self.divergences.first()
    }

    /// Turns a divergent audit into an error.
    pub fn into_result(self) -> Result<Self> {
        match self.first() {
            Some(d) => Err(RuntimeError::Divergence {
                step: d.step,
                path: d.path.clone(),
            }),
            None => Ok(self),
        }
    }
}

pub fn load_reference(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    Ok(read_json_lines(path)?)
}

/// Compares every step of `report` against `reference`.
pub fn audit(report: &ReplayReport, reference: &[Value]) -> Result<AuditReport> {
    audit_with(report, reference, false)
}

/// Like [`audit`], stopping at the first divergent step when `stop_on_divergence`.
///
/// A reference shorter than the replay is compared as a prefix. Reference lines past
/// the end of the replay diverge at `$`.
pub fn audit_with(
    report: &ReplayReport,
    reference: &[Value],
    stop_on_divergence: bool,
) -> Result<AuditReport> {
    let mut audit = AuditReport::default();

    for (step, expected) in reference.iter().enumerate() {
        let actual = match report.observations.get(step) {
            Some(observation) => serde_json::to_value(observation).map_err(RepositoryError::from)?,
            None => Value::Null,
        };
        audit.steps_compared += 1;

        let mut path = String::from("$");
        if let Some((path, expected, actual)) = first_mismatch(expected, &actual, &mut path) {
            tracing::warn!(
                target: "runtime::audit",
                step,
                path = %path,
                expected = %expected,
                actual = %actual,
                "Observation diverged"
            );
            audit.divergences.push(Divergence {
                step,
                path,
                expected,
                actual,
            });
            if stop_on_divergence {
                break;
            }
        } else {
            tracing::debug!(target: "runtime::audit", step, "Observation matched");
        }
    }

    tracing::info!(
        target: "runtime::audit",
        steps = audit.steps_compared,
        divergences = audit.divergences.len(),
        "Audit finished"
    );
    Ok(audit)
}

/// Depth-first search for the first field of `expected` that `actual` disagrees on.
/// Object keys absent from `expected` are ignored; arrays must match in length.
fn first_mismatch(
    expected: &Value,
    actual: &Value,
    path: &mut String,
) -> Option<(String, Value, Value)> {
    match (expected, actual) {
        (Value::Object(want), Value::Object(have)) => {
            for (key, want_value) in want {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                let found = match have.get(key) {
                    Some(have_value) => first_mismatch(want_value, have_value, path),
                    None => Some((path.clone(), want_value.clone(), Value::Null)),
                };
                path.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        (Value::Array(want), Value::Array(have)) => {
            if want.len() != have.len() {
                return Some((path.clone(), expected.clone(), actual.clone()));
            }
            for (index, (want_item, have_item)) in want.iter().zip(have).enumerate() {
                let len = path.len();
                path.push_str(&format!("[{index}]"));
                let found = first_mismatch(want_item, have_item, path);
                path.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        _ if expected == actual => None,
        _ => Some((path.clone(), expected.clone(), actual.clone())),
    }
}
