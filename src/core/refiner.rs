// src/core/refiner.rs — Bounded check/adjust iteration controller

use super::adjust::{summarize_violations, Adjuster, FnAdjuster};
use super::constraint::ConstraintSet;
use super::types::*;
use crate::infra::config::RefinementConfig;
use crate::infra::errors::RefineError;

type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Drives the check-adjust loop for one constraint set.
///
/// A `Refiner` holds no per-run state, so one instance can refine any number
/// of candidates, including from several threads at once.
pub struct Refiner<C> {
    constraints: ConstraintSet<C>,
    max_iterations: u32,
    /// Optional callback for real-time progress events.
    on_progress: Option<ProgressCallback>,
}

impl<C: Clone> Refiner<C> {
    pub fn new(constraints: ConstraintSet<C>, max_iterations: u32) -> Self {
        Self {
            constraints,
            max_iterations,
            on_progress: None,
        }
    }

    pub fn from_config(constraints: ConstraintSet<C>, config: &RefinementConfig) -> Self {
        Self::new(constraints, config.max_iterations)
    }

    /// Set a callback for real-time progress events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    pub fn constraints(&self) -> &ConstraintSet<C> {
        &self.constraints
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Refine `initial` until every constraint passes or `max_iterations`
    /// adjustments have been applied.
    pub fn run<A>(&self, initial: &C, adjuster: &A) -> Result<RefinementResult<C>, RefineError>
    where
        A: Adjuster<C> + ?Sized,
    {
        let emit = |event: ProgressEvent| {
            if let Some(ref cb) = self.on_progress {
                cb(event);
            }
        };
        run_loop(&self.constraints, self.max_iterations, initial, adjuster, &emit)
    }
}

/// Refine `initial` against `constraints` using a plain adjustment function.
///
/// Fails with [`RefineError::InvalidConfiguration`] before any check runs when
/// `max_iterations` is 0 or `constraints` is empty. Errors from a constraint
/// or from `adjust` are returned as-is and discard the run.
pub fn refine<C, F>(
    initial: &C,
    constraints: &ConstraintSet<C>,
    adjust: F,
    max_iterations: u32,
) -> Result<RefinementResult<C>, RefineError>
where
    C: Clone,
    F: Fn(&C, &[Violation]) -> anyhow::Result<C>,
{
    run_loop(
        constraints,
        max_iterations,
        initial,
        &FnAdjuster(adjust),
        &|_| {},
    )
}

fn run_loop<C, A>(
    constraints: &ConstraintSet<C>,
    max_iterations: u32,
    initial: &C,
    adjuster: &A,
    emit: &dyn Fn(ProgressEvent),
) -> Result<RefinementResult<C>, RefineError>
where
    C: Clone,
    A: Adjuster<C> + ?Sized,
{
    if max_iterations < 1 {
        return Err(RefineError::InvalidConfiguration(
            "max_iterations must be at least 1".into(),
        ));
    }
    if constraints.is_empty() {
        return Err(RefineError::InvalidConfiguration(
            "at least one constraint is required".into(),
        ));
    }

    let mut current = initial.clone();
    let mut iteration: u32 = 0;
    let mut violations: Vec<Violation> = Vec::new();
    let mut adjustments: Vec<Adjustment<C>> = Vec::new();

    let stopped_reason = loop {
        emit(ProgressEvent::CheckStart {
            iteration,
            max_iterations,
        });

        let found = constraints.evaluate_all(&current, iteration)?;
        tracing::debug!(
            iteration,
            violations = found.len(),
            "Constraints evaluated"
        );
        for v in &found {
            emit(ProgressEvent::ViolationFound {
                iteration,
                constraint: v.constraint_name.clone(),
                description: v.description.clone(),
            });
        }

        if found.is_empty() {
            break StopReason::Converged;
        }
        if iteration == max_iterations {
            violations.extend(found);
            break StopReason::MaxIterations;
        }

        let adjusted = adjuster
            .adjust(&current, &found)
            .map_err(|source| RefineError::Adjustment { iteration, source })?;
        let description = adjusted
            .description
            .unwrap_or_else(|| summarize_violations(&found));
        tracing::debug!(iteration, %description, "Adjustment applied");
        emit(ProgressEvent::Adjusted {
            iteration,
            description: description.clone(),
        });

        violations.extend(found);
        adjustments.push(Adjustment {
            iteration_index: iteration,
            description,
            candidate_before: current,
            candidate_after: adjusted.candidate.clone(),
        });
        current = adjusted.candidate;
        iteration += 1;
    };

    let satisfied = stopped_reason == StopReason::Converged;
    tracing::info!(
        iterations_used = iteration,
        satisfied,
        stopped_reason = %stopped_reason,
        "Refinement finished"
    );
    emit(ProgressEvent::Complete {
        iterations_used: iteration,
        satisfied,
        stopped_reason,
    });

    Ok(RefinementResult {
        final_candidate: current,
        satisfied,
        iterations_used: iteration,
        violations,
        adjustments,
        stopped_reason,
    })
}
