//! Ownership invariants - sanity checks that detect bugs.
//!
//! These should never trigger after any sequence of placements, grow ticks
//! and deletions. If they do, the growth engine has a bug.

use thiserror::Error;

use crate::sim::GrowthEngine;

/// Invariant violation error.
#[derive(Debug, Clone, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all ownership invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(engine: &GrowthEngine) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let field = engine.ownership();

    for (index, (owner, &distance)) in field.owners().iter().zip(field.distances()).enumerate() {
        match owner {
            Some(id) => {
                if !(distance.is_finite() && distance > 0.0) {
                    violations.push(InvariantViolation::new(format!(
                        "Cell {index} owned by {id} has distance {distance}"
                    )));
                }
                if engine.empire(*id).is_none() {
                    violations.push(InvariantViolation::new(format!(
                        "Cell {index} owned by unregistered empire {id}"
                    )));
                }
            }
            None => {
                if !(distance.is_infinite() && distance.is_sign_positive()) {
                    violations.push(InvariantViolation::new(format!(
                        "Unowned cell {index} has distance {distance}"
                    )));
                }
            }
        }
    }

    for empire in engine.empires() {
        let owned = field.count_owned(empire.id);
        let territory = engine.territory(empire.id).unwrap_or(0);
        if owned != territory {
            violations.push(InvariantViolation::new(format!(
                "Empire {} tracks {territory} cells but owns {owned}",
                empire.id
            )));
        }

        if !empire.alive && owned > 0 {
            violations.push(InvariantViolation::new(format!(
                "Dead empire {} still owns {owned} cells",
                empire.id
            )));
        }

        if empire.alive && owned == 0 {
            violations.push(InvariantViolation::new(format!(
                "Living empire {} owns no cells",
                empire.id
            )));
        }

        if empire.budget.is_nan() || empire.budget < 0.0 {
            violations.push(InvariantViolation::new(format!(
                "Empire {} has budget {}",
                empire.id, empire.budget
            )));
        }
    }

    violations
}

/// Assert all ownership invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(engine: &GrowthEngine) {
    let violations = check_invariants(engine);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Ownership invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_engine: &GrowthEngine) {}
