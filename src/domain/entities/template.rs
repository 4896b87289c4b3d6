//! Declarative Template Entity
//!
//! An immutable CloudFormation graph. Built once by `TemplateBuilder` and
//! passed through to the control plane as an opaque body.

use serde_json::{json, Map, Value};

/// A single resource in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub logical_id: String,
    pub kind: String,
    pub properties: Value,
    pub depends_on: Vec<String>,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, kind: impl Into<String>, properties: Value) -> Self {
        Self {
            logical_id: logical_id.into(),
            kind: kind.into(),
            properties,
            depends_on: Vec::new(),
        }
    }

    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut body = Map::new();
        if let Some(dep) = self.depends_on.as_slice().first() {
            if self.depends_on.len() == 1 {
                body.insert("DependsOn".to_string(), Value::String(dep.clone()));
            } else {
                body.insert("DependsOn".to_string(), json!(self.depends_on));
            }
        }
        body.insert("Properties".to_string(), self.properties.clone());
        body.insert("Type".to_string(), Value::String(self.kind.clone()));
        Value::Object(body)
    }
}

/// A named stack output
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub name: String,
    pub value: Value,
}

/// Immutable declarative infrastructure graph
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    description: Option<String>,
    resources: Vec<Resource>,
    outputs: Vec<Output>,
}

impl Template {
    pub fn new(resources: Vec<Resource>, outputs: Vec<Output>) -> Self {
        Self {
            description: None,
            resources,
            outputs,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }

    pub fn to_value(&self) -> Value {
        let mut outputs = Map::new();
        for output in &self.outputs {
            outputs.insert(output.name.clone(), json!({ "Value": output.value }));
        }
        let mut resources = Map::new();
        for resource in &self.resources {
            resources.insert(resource.logical_id.clone(), resource.to_value());
        }
        let mut body = Map::new();
        body.insert(
            "AWSTemplateFormatVersion".to_string(),
            Value::String("2010-09-09".to_string()),
        );
        if let Some(description) = &self.description {
            body.insert("Description".to_string(), Value::String(description.clone()));
        }
        body.insert("Outputs".to_string(), Value::Object(outputs));
        body.insert("Resources".to_string(), Value::Object(resources));
        Value::Object(body)
    }

    /// Serialized body submitted to the control plane
    ///
    /// Rendering is deterministic: the same graph always yields the same
    /// bytes, so an unchanged deploy reaches the provider's no-op path.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}

/// `{"Ref": id}`
pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// `{"Fn::GetAtt": [id, attr]}`
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}
