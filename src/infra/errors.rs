// src/infra/errors.rs — Error types for the refinement loop

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefineError {
    // Raised before the first iteration (not retriable)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Caller-supplied logic failures, surfaced verbatim
    #[error("Constraint '{constraint}' failed on iteration {iteration}: {source}")]
    ConstraintEvaluation {
        constraint: String,
        iteration: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error("Adjustment failed on iteration {iteration}: {source}")]
    Adjustment {
        iteration: u32,
        #[source]
        source: anyhow::Error,
    },

    // Domain input
    #[error("Invalid portfolio: {0}")]
    InvalidPortfolio(String),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RefineError {
    /// True for errors raised by a constraint check or the adjuster, as opposed
    /// to errors in the loop's own inputs.
    pub fn is_caller_failure(&self) -> bool {
        matches!(
            self,
            RefineError::ConstraintEvaluation { .. } | RefineError::Adjustment { .. }
        )
    }

    /// Iteration index at which a caller-supplied failure happened.
    pub fn iteration(&self) -> Option<u32> {
        match self {
            RefineError::ConstraintEvaluation { iteration, .. }
            | RefineError::Adjustment { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }
}
