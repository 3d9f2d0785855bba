// src/core/mod.rs — Core refinement engine

pub mod adjust;
pub mod constraint;
pub mod refiner;
pub mod types;

pub use adjust::{Adjusted, Adjuster, ApprovalGate, FnAdjuster};
pub use constraint::{Constraint, ConstraintSet, FnConstraint};
pub use refiner::{refine, Refiner};
pub use types::{Adjustment, ProgressEvent, RefinementResult, StopReason, Violation};
