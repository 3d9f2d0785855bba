// src/core/constraint.rs — Named constraint rules and ordered constraint sets

use super::types::Violation;
use crate::infra::errors::RefineError;

/// A named rule evaluated against a candidate.
///
/// `evaluate` returns one description per violation; an empty vec means the
/// rule is satisfied. A rule may report several violations at once (one per
/// offending item, say). Returning `Err` aborts the whole refinement run.
pub trait Constraint<C> {
    fn name(&self) -> &str;

    fn evaluate(&self, candidate: &C) -> anyhow::Result<Vec<String>>;
}

/// Constraint backed by a closure that reports at most one violation.
pub struct FnConstraint<F> {
    name: String,
    check: F,
}

impl<F> FnConstraint<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<C, F> Constraint<C> for FnConstraint<F>
where
    F: Fn(&C) -> anyhow::Result<Option<String>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, candidate: &C) -> anyhow::Result<Vec<String>> {
        Ok((self.check)(candidate)?.into_iter().collect())
    }
}

/// Ordered collection of constraints. Evaluation order is insertion order.
pub struct ConstraintSet<C> {
    constraints: Vec<Box<dyn Constraint<C> + Send + Sync>>,
}

impl<C> Default for ConstraintSet<C> {
    fn default() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }
}

impl<C> ConstraintSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, constraint: impl Constraint<C> + Send + Sync + 'static) -> Self {
        self.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: impl Constraint<C> + Send + Sync + 'static) {
        self.constraints.push(Box::new(constraint));
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.constraints.iter().map(|c| c.name()).collect()
    }

    /// Evaluate every constraint against `candidate`, in order, without
    /// short-circuiting, tagging each violation with `iteration`.
    pub fn evaluate_all(&self, candidate: &C, iteration: u32) -> Result<Vec<Violation>, RefineError> {
        let mut violations = Vec::new();
        for constraint in &self.constraints {
            let descriptions =
                constraint
                    .evaluate(candidate)
                    .map_err(|source| RefineError::ConstraintEvaluation {
                        constraint: constraint.name().to_string(),
                        iteration,
                        source,
                    })?;
            violations.extend(
                descriptions
                    .into_iter()
                    .map(|d| Violation::new(constraint.name(), d, iteration)),
            );
        }
        Ok(violations)
    }
}

impl<C> std::fmt::Debug for ConstraintSet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("constraints", &self.names())
            .finish()
    }
}
