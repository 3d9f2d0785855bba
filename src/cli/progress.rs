// src/cli/progress.rs — Terminal progress renderer for real-time feedback

use crate::core::types::ProgressEvent;

/// Render one progress event as a single terminal line.
pub fn format_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::CheckStart {
            iteration,
            max_iterations,
        } => format!("[iter {}/{}] checking constraints...", iteration, max_iterations),
        ProgressEvent::ViolationFound {
            iteration,
            constraint,
            description,
        } => format!("[iter {}]   {}: {}", iteration, constraint, description),
        ProgressEvent::Adjusted {
            iteration,
            description,
        } => format!("[iter {}] adjust -> {}", iteration, description),
        ProgressEvent::Complete {
            iterations_used,
            satisfied,
            stopped_reason,
        } => format!(
            "[done] {} after {} adjustment(s), satisfied={}",
            stopped_reason, iterations_used, satisfied,
        ),
    }
}

/// Build a progress callback that writes formatted output to stderr.
///
/// All progress output goes to stderr so stdout remains clean for the report.
/// Returns a closure suitable for `Refiner::with_progress()`.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + Sync + 'static {
    move |event| eprintln!("{}", format_event(&event))
}
