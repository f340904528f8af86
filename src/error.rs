use std::fmt;

/// One violated constraint, located by a JSON path such as `marks[1].style.opacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A document that is not a valid chart IR. Never partially compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid chart IR: {}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Issue::new(path, message)])
    }

    /// Paths of every violated field, in discovery order.
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_issue() {
        let err = ValidationError::new(vec![
            Issue::new("datasets", "must contain at least one dataset"),
            Issue::new("marks[0].style.opacity", "must be between 0 and 1"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid chart IR:"));
        assert!(msg.contains("datasets: must contain at least one dataset"));
        assert!(msg.contains("; marks[0].style.opacity: must be between 0 and 1"));
        assert_eq!(err.paths(), vec!["datasets", "marks[0].style.opacity"]);
    }
}
