//! Validation issues and the partitioned result they accumulate into.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One finding about a workflow document. Issues are data, never exceptions.
///
/// `fix` carries a human-readable hint that the issue is mechanically
/// repairable; its presence is what makes a result auto-fixable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ValidationIssue {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity,
            code,
            message: message.into(),
            node_id: None,
            node_name: None,
            fix: None,
            details: None,
        }
    }

    pub fn with_node(mut self, id: Option<&str>, name: Option<&str>) -> Self {
        self.node_id = id.map(String::from);
        self.node_name = name.map(String::from);
        self
    }

    pub fn with_fix(mut self, hint: impl Into<String>) -> Self {
        self.fix = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.severity, self.code, self.message)?;
        match (&self.node_name, &self.node_id) {
            (Some(name), _) => write!(f, " (node '{}')", name),
            (None, Some(id)) => write!(f, " (node '{}')", id),
            (None, None) => Ok(()),
        }
    }
}

/// Issues partitioned by severity. Valid iff no errors; fixable iff any
/// issue carries a fix hint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fixable(&self) -> bool {
        self.iter().any(|issue| issue.fix.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.iter().any(|issue| issue.code == code)
    }

    /// Count of issues with the given code, across all severities.
    pub fn count_code(&self, code: &str) -> usize {
        self.iter().filter(|issue| issue.code == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_partitions_by_severity() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::error("MISSING_NAME", "no name"));
        result.push(ValidationIssue::warning("MISSING_SETTINGS", "no settings"));
        result.push(ValidationIssue::info("SUGGESTED_CONNECTION", "a -> b"));

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.info.len(), 1);
        assert!(!result.is_valid());
    }

    #[test]
    fn fixable_requires_a_fix_hint() {
        let mut result = ValidationResult::new();
        result.push(ValidationIssue::error("MISSING_NODE_TYPE", "no type"));
        assert!(!result.fixable());

        result.push(
            ValidationIssue::error("MISSING_NAME", "no name").with_fix("Set a workflow name"),
        );
        assert!(result.fixable());
    }

    #[test]
    fn display_includes_code_and_node() {
        let issue = ValidationIssue::error("ORPHANED_NODE", "Node has no connections")
            .with_node(Some("node-1"), Some("Send Email"));
        insta::assert_snapshot!(
            issue.to_string(),
            @"[error:ORPHANED_NODE] Node has no connections (node 'Send Email')"
        );
    }
}
