// src/core/types.rs — Core domain types

use serde::{Deserialize, Serialize};

/// A failed constraint, recorded at the iteration where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub constraint_name: String,
    pub description: String,
    pub iteration_index: u32,
}

impl Violation {
    pub fn new(
        constraint_name: impl Into<String>,
        description: impl Into<String>,
        iteration_index: u32,
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            description: description.into(),
            iteration_index,
        }
    }
}

/// One refinement step: the candidate that violated constraints at
/// `iteration_index` and the candidate the adjuster produced from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment<C> {
    pub iteration_index: u32,
    pub description: String,
    pub candidate_before: C,
    pub candidate_after: C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Converged,
    MaxIterations,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Converged => write!(f, "converged"),
            StopReason::MaxIterations => write!(f, "max_iterations"),
        }
    }
}

/// Terminal output of a refinement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinementResult<C> {
    pub final_candidate: C,
    pub satisfied: bool,
    pub iterations_used: u32,
    /// Every violation seen, grouped by ascending `iteration_index`.
    pub violations: Vec<Violation>,
    pub adjustments: Vec<Adjustment<C>>,
    pub stopped_reason: StopReason,
}

impl<C> RefinementResult<C> {
    /// Violations recorded while checking the candidate at `iteration`.
    pub fn violations_at(&self, iteration: u32) -> &[Violation] {
        let start = self
            .violations
            .partition_point(|v| v.iteration_index < iteration);
        let end = self
            .violations
            .partition_point(|v| v.iteration_index <= iteration);
        &self.violations[start..end]
    }

    /// Violations still present on `final_candidate`.
    pub fn remaining_violations(&self) -> &[Violation] {
        if self.satisfied {
            &[]
        } else {
            self.violations_at(self.iterations_used)
        }
    }

    /// The candidate the run started from.
    pub fn initial_candidate(&self) -> &C {
        self.adjustments
            .first()
            .map(|a| &a.candidate_before)
            .unwrap_or(&self.final_candidate)
    }

    /// Every candidate value the run went through, initial first.
    pub fn candidates(&self) -> impl Iterator<Item = &C> {
        std::iter::once(self.initial_candidate())
            .chain(self.adjustments.iter().map(|a| &a.candidate_after))
    }
}

/// Lifecycle events emitted while a refinement run is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    CheckStart {
        iteration: u32,
        max_iterations: u32,
    },
    ViolationFound {
        iteration: u32,
        constraint: String,
        description: String,
    },
    Adjusted {
        iteration: u32,
        description: String,
    },
    Complete {
        iterations_used: u32,
        satisfied: bool,
        stopped_reason: StopReason,
    },
}
