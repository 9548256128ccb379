//! Processing orchestrator: validate → (if fixable) fill parameters → fix
//! connections → validate again.

use crate::fix::{
    ConnectionFixReport, IdGenerator, ParameterFixReport, RandomIds, fill_parameters,
    fix_connections,
};
use crate::issue::ValidationResult;
use crate::parse::types::Workflow;
use crate::validate;

#[derive(Debug, Clone)]
pub struct ProcessingReport {
    pub initial_validation: ValidationResult,
    pub final_validation: ValidationResult,
    pub parameter_changes: ParameterFixReport,
    pub connection_changes: ConnectionFixReport,
    pub fix_applied: bool,
}

impl ProcessingReport {
    /// Human-readable multi-line summary of what happened.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Initial validation: {} error(s), {} warning(s)",
            self.initial_validation.errors.len(),
            self.initial_validation.warnings.len(),
        )];

        if self.fix_applied {
            lines.push(format!(
                "Filled {} parameter(s), normalized {} field(s)",
                self.parameter_changes.filled.len(),
                self.parameter_changes.normalized.len(),
            ));
            lines.push(format!(
                "Removed {} connection(s), added {} connection(s)",
                self.connection_changes.removed.len(),
                self.connection_changes.added.len(),
            ));
            lines.push(format!(
                "Final validation: {} error(s), {} warning(s)",
                self.final_validation.errors.len(),
                self.final_validation.warnings.len(),
            ));
        } else {
            lines.push("No auto-fix applied".into());
        }

        if self.final_validation.is_valid() {
            lines.push("Workflow is structurally valid".into());
        } else {
            lines.push("Workflow still has unresolved errors".into());
        }
        lines.join("\n")
    }
}

/// Validate and, when requested and possible, repair the workflow in place.
pub fn process(workflow: &mut Workflow, auto_fix: bool) -> ProcessingReport {
    let mut ids = RandomIds::new();
    process_with(workflow, auto_fix, &mut ids)
}

/// `process` with an explicit id generator, for deterministic repairs.
pub fn process_with(
    workflow: &mut Workflow,
    auto_fix: bool,
    ids: &mut dyn IdGenerator,
) -> ProcessingReport {
    let initial_validation = validate::validate(workflow);

    if !auto_fix || !initial_validation.fixable() {
        return ProcessingReport {
            final_validation: initial_validation.clone(),
            initial_validation,
            parameter_changes: ParameterFixReport::default(),
            connection_changes: ConnectionFixReport::default(),
            fix_applied: false,
        };
    }

    tracing::debug!(
        errors = initial_validation.errors.len(),
        warnings = initial_validation.warnings.len(),
        "auto-fix pass starting"
    );

    // Parameters first: connection heuristics may depend on filled state.
    let parameter_changes = fill_parameters(workflow, ids);
    let connection_changes = fix_connections(workflow);
    let final_validation = validate::validate(workflow);

    ProcessingReport {
        initial_validation,
        final_validation,
        parameter_changes,
        connection_changes,
        fix_applied: true,
    }
}
