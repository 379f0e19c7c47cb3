use serde::{Deserialize, Serialize};

/// Front-matter record of a single todo file.
///
/// Dates are plain `YYYY-MM-DD` strings; the optional fields are omitted
/// from the YAML block entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Title as given on the command line (unsanitized)
    pub title: String,
    /// Date the todo was created
    pub created_at: String,
    /// Optional project the todo belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Set exactly once, at completion time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl TodoRecord {
    /// Create a fresh, unfinished record. An empty project collapses to none.
    pub fn new(title: &str, project: Option<&str>, created_at: &str) -> Self {
        TodoRecord {
            title: title.to_string(),
            created_at: created_at.to_string(),
            project: project.filter(|p| !p.is_empty()).map(str::to_string),
            finished_at: None,
        }
    }

    /// A todo is finished once `finished_at` is present.
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unfinished() {
        let record = TodoRecord::new("buy milk", Some("home"), "2025-06-01");
        assert_eq!(record.title, "buy milk");
        assert_eq!(record.created_at, "2025-06-01");
        assert_eq!(record.project.as_deref(), Some("home"));
        assert!(!record.is_finished());
    }

    #[test]
    fn test_empty_project_collapses_to_none() {
        let record = TodoRecord::new("buy milk", Some(""), "2025-06-01");
        assert_eq!(record.project, None);
    }
}
