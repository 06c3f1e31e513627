use serde::{Deserialize, Serialize};

/// Severity of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// The document is known to be invalid or unsafe. Export should be blocked.
    Error,
    /// Valid but risky, or likely to behave unexpectedly.
    Warning,
    /// Informational only.
    Info,
}

impl IssueLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic attached to a dotted field path of the generated document
/// (or of the form state, for fields that never reach the document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    pub level: IssueLevel,
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.path, self.message)
    }
}

/// Accumulates issues while a document is being built.
///
/// Rules never short-circuit each other: every check pushes into the same
/// collector and the build carries on with whatever it can still emit.
#[derive(Debug, Default)]
pub struct Issues {
    items: Vec<ConfigIssue>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: IssueLevel, path: impl Into<String>, message: impl Into<String>) {
        self.items.push(ConfigIssue {
            level,
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(IssueLevel::Error, path, message);
    }

    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(IssueLevel::Warning, path, message);
    }

    pub fn info(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(IssueLevel::Info, path, message);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<ConfigIssue> {
        self.items
    }
}

/// Count issues of a given level.
pub fn count_level(issues: &[ConfigIssue], level: IssueLevel) -> usize {
    issues.iter().filter(|i| i.level == level).count()
}
