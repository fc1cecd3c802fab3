//! Core pipeline domain models
//!
//! Pure data types shared by every analysis feature. Instances are produced
//! by the tolerant parser in `features::parsing` and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion condition attached to a dependency edge
///
/// Governs when the dependent activity may run relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyCondition {
    /// Predecessor finished successfully
    Succeeded,
    /// Predecessor failed
    Failed,
    /// Predecessor finished, regardless of outcome
    Completed,
    /// Predecessor was skipped
    Skipped,
}

impl DependencyCondition {
    /// Parse a wire-format condition string. Unknown strings yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Succeeded" => Some(Self::Succeeded),
            "Failed" => Some(Self::Failed),
            "Completed" => Some(Self::Completed),
            "Skipped" => Some(Self::Skipped),
            _ => None,
        }
    }

    /// Does this condition route a failure outcome to the dependent?
    pub fn handles_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Completed)
    }
}

/// Reference to a predecessor activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Predecessor activity name
    pub activity: String,
    /// Completion conditions; an absent wire list defaults to `[Succeeded]`
    pub conditions: Vec<DependencyCondition>,
}

impl Dependency {
    /// Dependency with the implicit `[Succeeded]` condition
    pub fn on(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            conditions: vec![DependencyCondition::Succeeded],
        }
    }

    /// Dependency with explicit conditions
    pub fn with_conditions(
        activity: impl Into<String>,
        conditions: Vec<DependencyCondition>,
    ) -> Self {
        Self {
            activity: activity.into(),
            conditions,
        }
    }

    /// At least one condition routes a failure outcome
    pub fn handles_failure(&self) -> bool {
        self.conditions.iter().any(|c| c.handles_failure())
    }
}

/// Execution policy attached to an activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPolicy {
    /// Maximum run time; parsed from an ADF-style timespan string
    pub timeout: Option<Duration>,
    /// Retry count on failure
    pub retry: Option<u32>,
}

impl ActivityPolicy {
    /// Parse a `d.hh:mm:ss` or `hh:mm:ss` timespan string.
    ///
    /// Unparseable input yields `None` (tolerated as absent).
    pub fn parse_timespan(raw: &str) -> Option<Duration> {
        let (days, clock) = match raw.split_once('.') {
            Some((d, rest)) => (d.parse::<u64>().ok()?, rest),
            None => (0, raw),
        };

        let mut parts = clock.split(':');
        let hours = parts.next()?.parse::<u64>().ok()?;
        let minutes = parts.next()?.parse::<u64>().ok()?;
        let seconds = parts.next()?.parse::<u64>().ok()?;
        if parts.next().is_some() || minutes > 59 || seconds > 59 {
            return None;
        }

        Some(Duration::from_secs(
            ((days * 24 + hours) * 60 + minutes) * 60 + seconds,
        ))
    }
}

/// Per-kind payload for container and utility activities
///
/// Only kinds the analyzer reasons about are parsed; everything else keeps
/// `None` on the owning [`Activity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivityControl {
    /// Iteration over a collection
    ForEach {
        /// Sequential execution; the wire default is parallel (`false`)
        is_sequential: bool,
        /// Concurrency bound for parallel execution; absent = unbounded
        batch_count: Option<u32>,
        /// Inner activities
        activities: Vec<Activity>,
    },
    /// Loop until the exit expression evaluates true
    Until {
        /// Exit condition expression
        expression: String,
        /// Inner activities
        activities: Vec<Activity>,
    },
    /// Conditional branch
    IfCondition {
        if_true: Vec<Activity>,
        if_false: Vec<Activity>,
    },
    /// Multi-way branch
    Switch {
        cases: Vec<Vec<Activity>>,
        default: Vec<Activity>,
    },
    /// Variable write (SetVariable / AppendVariable)
    SetVariable { variable_name: String },
    /// Fixed delay
    Wait { seconds: u64 },
}

impl ActivityControl {
    /// Direct child activities of this payload
    pub fn child_activities(&self) -> Vec<&Activity> {
        match self {
            Self::ForEach { activities, .. } | Self::Until { activities, .. } => {
                activities.iter().collect()
            }
            Self::IfCondition { if_true, if_false } => {
                if_true.iter().chain(if_false.iter()).collect()
            }
            Self::Switch { cases, default } => cases
                .iter()
                .flat_map(|c| c.iter())
                .chain(default.iter())
                .collect(),
            Self::SetVariable { .. } | Self::Wait { .. } => Vec::new(),
        }
    }
}

/// A named unit of work in a pipeline graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique name within the pipeline
    pub name: String,
    /// Type tag (open vocabulary, e.g. `Copy`, `ForEach`, `Lookup`)
    pub kind: String,
    pub description: Option<String>,
    pub policy: Option<ActivityPolicy>,
    /// Ordered predecessor references
    pub depends_on: Vec<Dependency>,
    /// Parsed per-kind payload, when the kind is known
    pub control: Option<ActivityControl>,
}

impl Activity {
    /// Bare activity with no dependencies or payload
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: None,
            policy: None,
            depends_on: Vec::new(),
            control: None,
        }
    }

    pub fn with_dependencies(mut self, deps: Vec<Dependency>) -> Self {
        self.depends_on = deps;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_policy(mut self, policy: ActivityPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_control(mut self, control: ActivityControl) -> Self {
        self.control = Some(control);
        self
    }

    /// Configured retry count, if any
    pub fn retry_count(&self) -> Option<u32> {
        self.policy.as_ref().and_then(|p| p.retry)
    }

    /// Configured timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.policy.as_ref().and_then(|p| p.timeout)
    }

    /// All nested activities, depth-first, through every container level
    pub fn descendants(&self) -> Vec<&Activity> {
        let mut out = Vec::new();
        let mut stack: Vec<&Activity> = match &self.control {
            Some(control) => control.child_activities(),
            None => Vec::new(),
        };
        while let Some(activity) = stack.pop() {
            out.push(activity);
            if let Some(control) = &activity.control {
                stack.extend(control.child_activities());
            }
        }
        out
    }
}

/// Pipeline-level parameter declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub param_type: Option<String>,
    pub description: Option<String>,
    pub default_value: Option<serde_json::Value>,
}

/// A parsed pipeline definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Top-level activities, in definition order
    pub activities: Vec<Activity>,
    /// Parameters, sorted by name
    pub parameters: Vec<Parameter>,
}

impl Pipeline {
    /// Display name, falling back to a placeholder for anonymous input
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed pipeline>")
    }

    /// Number of top-level activities
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}
