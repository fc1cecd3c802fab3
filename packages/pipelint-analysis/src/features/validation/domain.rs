//! Domain models for validation findings

use serde::{Deserialize, Serialize};

/// How urgent a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory improvement
    Recommendation,
    /// Likely problem worth fixing
    Warning,
    /// Should block deployment
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recommendation => "recommendation",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// What aspect of the pipeline a finding concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    ErrorHandling,
    Documentation,
    Complexity,
    Resilience,
    Parameterization,
    Performance,
    Cost,
    LoopSafety,
}

impl FindingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorHandling => "error_handling",
            Self::Documentation => "documentation",
            Self::Complexity => "complexity",
            Self::Resilience => "resilience",
            Self::Parameterization => "parameterization",
            Self::Performance => "performance",
            Self::Cost => "cost",
            Self::LoopSafety => "loop_safety",
        }
    }
}

/// One advisory result from the rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: FindingCategory,
    pub message: String,
    /// Activity the finding refers to; `None` for pipeline-level findings
    pub activity: Option<String>,
}

impl Finding {
    /// Pipeline-level finding
    pub fn pipeline(severity: Severity, category: FindingCategory, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            activity: None,
        }
    }

    /// Finding attached to a specific activity
    pub fn activity(
        severity: Severity,
        category: FindingCategory,
        activity: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            activity: Some(activity.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Recommendation < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_finding_constructors() {
        let f = Finding::pipeline(
            Severity::Critical,
            FindingCategory::Complexity,
            "too many activities",
        );
        assert!(f.activity.is_none());

        let f = Finding::activity(
            Severity::Warning,
            FindingCategory::Resilience,
            "LoadFact",
            "no retry",
        );
        assert_eq!(f.activity.as_deref(), Some("LoadFact"));
    }
}
