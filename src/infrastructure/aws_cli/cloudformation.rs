//! Stack management via `aws cloudformation`
//!
//! Template bodies are handed over as `file://` references to a temporary
//! file rather than inline arguments.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Deserialize;

use super::AwsCli;
use crate::domain::entities::TargetEnvironment;
use crate::domain::ports::{Capability, ControlPlaneError, ControlPlaneResult, StackService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DescribeStacks {
    #[serde(default)]
    pub stacks: Vec<StackSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StackSummary {
    pub stack_name: String,
    pub stack_status: String,
    #[serde(default)]
    pub stack_status_reason: Option<String>,
    #[serde(default)]
    pub outputs: Vec<StackOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StackOutput {
    pub output_key: String,
    #[serde(default)]
    pub output_value: String,
}

impl From<StackSummary> for TargetEnvironment {
    fn from(summary: StackSummary) -> Self {
        let outputs: BTreeMap<String, String> = summary
            .outputs
            .into_iter()
            .map(|o| (o.output_key, o.output_value))
            .collect();
        TargetEnvironment {
            name: summary.stack_name,
            status: summary.stack_status,
            status_reason: summary.stack_status_reason,
            outputs,
        }
    }
}

/// Template body written to a temp file for the lifetime of one call
struct TemplateFile {
    file: tempfile::NamedTempFile,
}

impl TemplateFile {
    fn write(body: &str) -> ControlPlaneResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("stackship-template-")
            .suffix(".json")
            .tempfile()
            .map_err(|e| ControlPlaneError::Transport(format!("staging template: {}", e)))?;
        file.write_all(body.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| ControlPlaneError::Transport(format!("staging template: {}", e)))?;
        Ok(Self { file })
    }

    fn uri(&self) -> String {
        format!("file://{}", self.file.path().display())
    }
}

pub(crate) fn mutation_args(
    verb: &str,
    name: &str,
    template_uri: &str,
    capabilities: &[Capability],
) -> Vec<String> {
    let mut args = vec![
        "cloudformation".to_string(),
        verb.to_string(),
        "--stack-name".to_string(),
        name.to_string(),
        "--template-body".to_string(),
        template_uri.to_string(),
    ];
    if !capabilities.is_empty() {
        args.push("--capabilities".to_string());
        args.extend(capabilities.iter().map(|c| c.as_str().to_string()));
    }
    args
}

impl AwsCli {
    fn mutate_stack(
        &self,
        verb: &str,
        name: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> ControlPlaneResult<()> {
        let template = TemplateFile::write(body)?;
        self.run(mutation_args(verb, name, &template.uri(), capabilities))
            .map(|_| ())
    }
}

impl StackService for AwsCli {
    fn validate_template(&self, body: &str) -> ControlPlaneResult<()> {
        let template = TemplateFile::write(body)?;
        let uri = template.uri();
        self.run([
            "cloudformation",
            "validate-template",
            "--template-body",
            uri.as_str(),
        ])
        .map(|_| ())
    }

    /// Unfiltered listing; `--stack-name` errors instead of returning an
    /// empty list when nothing matches, so filtering happens in the caller.
    fn list_environments(&self) -> ControlPlaneResult<Vec<TargetEnvironment>> {
        let described: DescribeStacks = self.run_json(["cloudformation", "describe-stacks"])?;
        Ok(described.stacks.into_iter().map(Into::into).collect())
    }

    fn create_stack(
        &self,
        name: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> ControlPlaneResult<()> {
        self.mutate_stack("create-stack", name, body, capabilities)
    }

    fn update_stack(
        &self,
        name: &str,
        body: &str,
        capabilities: &[Capability],
    ) -> ControlPlaneResult<()> {
        self.mutate_stack("update-stack", name, body, capabilities)
    }
}
