// src/core/adjust.rs — Adjustment policies

use super::types::Violation;

/// A candidate produced by an adjuster, with an optional summary of what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjusted<C> {
    pub candidate: C,
    pub description: Option<String>,
}

impl<C> Adjusted<C> {
    pub fn new(candidate: C) -> Self {
        Self {
            candidate,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Maps the current candidate and this iteration's violations to a new candidate.
///
/// Implementations must not mutate shared state the loop depends on; the
/// loop treats the returned candidate as the next value to check.
pub trait Adjuster<C> {
    fn adjust(&self, candidate: &C, violations: &[Violation]) -> anyhow::Result<Adjusted<C>>;
}

/// Adapts a plain function into an [`Adjuster`].
pub struct FnAdjuster<F>(pub F);

impl<C, F> Adjuster<C> for FnAdjuster<F>
where
    F: Fn(&C, &[Violation]) -> anyhow::Result<C>,
{
    fn adjust(&self, candidate: &C, violations: &[Violation]) -> anyhow::Result<Adjusted<C>> {
        (self.0)(candidate, violations).map(Adjusted::new)
    }
}

/// Wraps an adjuster so every proposal must be approved by a reviewer before
/// it is applied. A rejected proposal fails the adjustment step.
pub struct ApprovalGate<A, R> {
    inner: A,
    reviewer: R,
}

impl<A, R> ApprovalGate<A, R> {
    pub fn new(inner: A, reviewer: R) -> Self {
        Self { inner, reviewer }
    }
}

impl<C, A, R> Adjuster<C> for ApprovalGate<A, R>
where
    A: Adjuster<C>,
    R: Fn(&C, &Adjusted<C>, &[Violation]) -> anyhow::Result<bool>,
{
    fn adjust(&self, candidate: &C, violations: &[Violation]) -> anyhow::Result<Adjusted<C>> {
        let proposal = self.inner.adjust(candidate, violations)?;
        if (self.reviewer)(candidate, &proposal, violations)? {
            tracing::debug!("Adjustment approved");
            Ok(proposal)
        } else {
            anyhow::bail!("adjustment rejected by reviewer")
        }
    }
}

/// One-line summary of a set of violations, used when an adjuster does not
/// describe its own change.
pub fn summarize_violations(violations: &[Violation]) -> String {
    let names: Vec<&str> = violations
        .iter()
        .map(|v| v.constraint_name.as_str())
        .fold(Vec::new(), |mut acc, name| {
            if !acc.contains(&name) {
                acc.push(name);
            }
            acc
        });
    format!(
        "Adjusted for {} violation(s): {}",
        violations.len(),
        names.join(", ")
    )
}
