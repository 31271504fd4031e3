//! Scripted registry sessions
//!
//! A scenario is a TOML file of `[[step]]` tables. Each step names the caller,
//! the host height and one registry operation with its arguments:
//!
//! ```toml
//! [[step]]
//! caller = "alice"
//! height = 100
//! op = "create"
//! title = "Doc A"
//! size = 100
//! summary = "s"
//! labels = ["x"]
//!
//! [[step]]
//! caller = "bob"
//! op = "fetch"
//! content_id = 1
//! ```
//!
//! Steps run in file order. A rejected step is reported and the run goes on.

use anyhow::{Context, Result};
use cairn_core::{CallContext, ContentId, ContentMetadata, PrincipalId, RegistryError};
use cairn_registry::Registry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A parsed scenario file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Steps in execution order
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

/// One scripted call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Principal making the call
    pub caller: String,
    /// Host height for the call
    #[serde(default)]
    pub height: u64,
    /// Operation and its arguments
    #[serde(flatten)]
    pub operation: Operation,
}

/// Registry operations a step can invoke
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// `create_record`
    Create {
        /// Title
        title: String,
        /// Size in bytes
        size: u64,
        /// Summary
        summary: String,
        /// Labels
        #[serde(default)]
        labels: Vec<String>,
    },
    /// `transfer_ownership`
    Transfer {
        /// Target record
        content_id: u64,
        /// Principal receiving ownership
        new_owner: String,
    },
    /// `update_metadata`
    Update {
        /// Target record
        content_id: u64,
        /// Title
        title: String,
        /// Size in bytes
        size: u64,
        /// Summary
        summary: String,
        /// Labels
        #[serde(default)]
        labels: Vec<String>,
    },
    /// `delete_record`
    Delete {
        /// Target record
        content_id: u64,
    },
    /// `analyze_access`
    Analyze {
        /// Target record
        content_id: u64,
        /// Principal to analyze
        target: String,
    },
    /// `lookup_owner`
    Lookup {
        /// Target record
        content_id: u64,
    },
    /// `fetch_details`
    Fetch {
        /// Target record
        content_id: u64,
    },
    /// `fetch_metrics`
    Metrics,
}

impl Operation {
    /// Short operation name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::Transfer { .. } => "transfer",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
            Operation::Analyze { .. } => "analyze",
            Operation::Lookup { .. } => "lookup",
            Operation::Fetch { .. } => "fetch",
            Operation::Metrics => "metrics",
        }
    }
}

/// Rejection details for a failed step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepError {
    /// Error kind name
    pub kind: String,
    /// Numeric error code
    pub code: u32,
    /// Human readable message
    pub message: String,
}

impl From<&RegistryError> for StepError {
    fn from(err: &RegistryError) -> Self {
        Self {
            kind: err.kind().to_string(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Report line for one executed step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// 1-based step number
    pub step: usize,
    /// Operation name
    pub op: &'static str,
    /// Caller of the step
    pub caller: String,
    /// Result value on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    /// Rejection on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
}

impl StepOutcome {
    /// Whether the step was accepted
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parsing scenario")
    }

    /// Load a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Run every step against `registry`, collecting one outcome per step
    pub fn run(&self, registry: &Registry) -> Vec<StepOutcome> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.run(index + 1, registry))
            .collect()
    }
}

impl Step {
    fn context(&self) -> CallContext {
        CallContext::new(self.caller.as_str(), self.height)
    }

    /// Execute this step, numbering it `number` in the report
    pub fn run(&self, number: usize, registry: &Registry) -> StepOutcome {
        let (ok, error) = match self.execute(registry) {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(StepError::from(&err))),
        };
        StepOutcome {
            step: number,
            op: self.operation.name(),
            caller: self.caller.clone(),
            ok,
            error,
        }
    }

    fn execute(&self, registry: &Registry) -> Result<Value, RegistryError> {
        let ctx = self.context();
        let value = match &self.operation {
            Operation::Create {
                title,
                size,
                summary,
                labels,
            } => {
                let metadata = ContentMetadata::new(title.as_str(), *size, summary.as_str(), labels);
                let id = registry.create_record(&ctx, metadata)?;
                Value::from(id.value())
            }
            Operation::Transfer {
                content_id,
                new_owner,
            } => {
                registry.transfer_ownership(
                    &ctx,
                    ContentId::new(*content_id),
                    PrincipalId::new(new_owner.as_str()),
                )?;
                Value::Bool(true)
            }
            Operation::Update {
                content_id,
                title,
                size,
                summary,
                labels,
            } => {
                let metadata = ContentMetadata::new(title.as_str(), *size, summary.as_str(), labels);
                registry.update_metadata(&ctx, ContentId::new(*content_id), metadata)?;
                Value::Bool(true)
            }
            Operation::Delete { content_id } => {
                registry.delete_record(&ctx, ContentId::new(*content_id))?;
                Value::Bool(true)
            }
            Operation::Analyze { content_id, target } => {
                let analysis = registry
                    .analyze_access(ContentId::new(*content_id), &PrincipalId::new(target.as_str()))?;
                to_value(&analysis)
            }
            Operation::Lookup { content_id } => {
                let owner = registry.lookup_owner(ContentId::new(*content_id))?;
                Value::String(owner.to_string())
            }
            Operation::Fetch { content_id } => {
                let record = registry.fetch_details(&ctx, ContentId::new(*content_id))?;
                to_value(&record)
            }
            Operation::Metrics => to_value(&registry.fetch_metrics()),
        };
        Ok(value)
    }
}

// Registry types are plain data; serialization cannot fail for them.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_registry::RegistryConfig;

    const SCRIPT: &str = r#"
[[step]]
caller = "alice"
height = 10
op = "create"
title = "Doc A"
size = 100
summary = "s"
labels = ["x"]

[[step]]
caller = "bob"
op = "fetch"
content_id = 1

[[step]]
caller = "anyone"
op = "metrics"
"#;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_toml_str(SCRIPT).unwrap();
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(scenario.steps[0].height, 10);
        assert_eq!(scenario.steps[1].height, 0);
        assert_eq!(scenario.steps[1].operation, Operation::Fetch { content_id: 1 });
        assert_eq!(scenario.steps[2].operation.name(), "metrics");
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let script = "[[step]]\ncaller = \"alice\"\nop = \"grant\"\ncontent_id = 1\n";
        assert!(Scenario::from_toml_str(script).is_err());
    }

    #[test]
    fn test_rejected_step_does_not_stop_run() {
        let registry = Registry::new(&RegistryConfig::with_root_authority("root"));
        let outcomes = Scenario::from_toml_str(SCRIPT).unwrap().run(&registry);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].ok, Some(Value::from(1u64)));

        let error = outcomes[1].error.as_ref().unwrap();
        assert_eq!(error.kind, "AccessForbidden");
        assert_eq!(error.code, 105);

        let metrics = outcomes[2].ok.as_ref().unwrap();
        assert_eq!(metrics["total_entries"], 1);
        assert_eq!(metrics["root_authority"], "root");
    }
}
