//! Template Builder
//!
//! Composes the CloudFormation graph for a Lambda app behind an
//! application load balancer. The builder is consumed by `build`, which
//! returns an immutable `Template`.

use serde_json::json;

use crate::domain::entities::{get_att, reference, Output, Resource, Template, ENDPOINT_OUTPUT};
use crate::domain::value_objects::StoreLocation;
use crate::error::{DeployError, DeployResult};

pub const ROLE_ID: &str = "LambdaExecutionRole";
pub const FUNCTION_ID: &str = "AppFunction";
pub const PERMISSION_ID: &str = "InvokePermission";
pub const TARGET_GROUP_ID: &str = "TargetGroup";
pub const LOAD_BALANCER_ID: &str = "ApplicationElasticLB";
pub const LISTENER_ID: &str = "Listener";

/// Default Lambda runtime for `bootstrap` executables
pub const DEFAULT_RUNTIME: &str = "provided.al2023";

/// Builder for the deployment template
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    app_name: String,
    location: StoreLocation,
    subnets: Vec<String>,
    runtime: String,
    environment: Vec<(String, String)>,
}

impl TemplateBuilder {
    pub fn new(app_name: impl Into<String>, location: StoreLocation) -> Self {
        Self {
            app_name: app_name.into(),
            location,
            subnets: Vec::new(),
            runtime: DEFAULT_RUNTIME.to_string(),
            environment: vec![
                ("RUST_BACKTRACE".to_string(), "1".to_string()),
                ("RUST_LOG".to_string(), "debug".to_string()),
            ],
        }
    }

    pub fn subnets(mut self, subnets: Vec<String>) -> Self {
        self.subnets = subnets;
        self
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn build(self) -> DeployResult<Template> {
        if self.subnets.is_empty() {
            return Err(DeployError::Template(
                "no subnets available for the load balancer".to_string(),
            ));
        }

        let variables: serde_json::Map<String, serde_json::Value> = self
            .environment
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();

        let role = Resource::new(
            ROLE_ID,
            "AWS::IAM::Role",
            json!({
                "AssumeRolePolicyDocument": {
                    "Statement": [{
                        "Action": ["sts:AssumeRole"],
                        "Effect": "Allow",
                        "Principal": {
                            "Service": ["lambda.amazonaws.com", "apigateway.amazonaws.com"]
                        }
                    }],
                    "Version": "2012-10-17"
                },
                "Path": "/",
                "Policies": [{
                    "PolicyDocument": {
                        "Statement": [
                            {
                                "Action": ["logs:*"],
                                "Effect": "Allow",
                                "Resource": "arn:aws:logs:*:*:*"
                            },
                            {
                                "Action": ["lambda:*"],
                                "Effect": "Allow",
                                "Resource": "*"
                            }
                        ],
                        "Version": "2012-10-17"
                    },
                    "PolicyName": "root"
                }]
            }),
        );

        let function = Resource::new(
            FUNCTION_ID,
            "AWS::Lambda::Function",
            json!({
                "Code": {
                    "S3Bucket": self.location.bucket(),
                    "S3Key": self.location.key().as_str()
                },
                "Environment": { "Variables": variables },
                "Handler": "not_used",
                "Role": get_att(ROLE_ID, "Arn"),
                "Runtime": self.runtime
            }),
        );

        // SourceArn is left unset: referencing the target group here would
        // create a dependency cycle.
        let permission = Resource::new(
            PERMISSION_ID,
            "AWS::Lambda::Permission",
            json!({
                "Action": "lambda:InvokeFunction",
                "FunctionName": get_att(FUNCTION_ID, "Arn"),
                "Principal": "elasticloadbalancing.amazonaws.com"
            }),
        );

        let target_group = Resource::new(
            TARGET_GROUP_ID,
            "AWS::ElasticLoadBalancingV2::TargetGroup",
            json!({
                "TargetType": "lambda",
                "Targets": [{ "Id": get_att(FUNCTION_ID, "Arn") }]
            }),
        )
        .depends_on(PERMISSION_ID);

        let load_balancer = Resource::new(
            LOAD_BALANCER_ID,
            "AWS::ElasticLoadBalancingV2::LoadBalancer",
            json!({
                "Scheme": "internet-facing",
                "Subnets": self.subnets
            }),
        );

        let listener = Resource::new(
            LISTENER_ID,
            "AWS::ElasticLoadBalancingV2::Listener",
            json!({
                "DefaultActions": [{
                    "TargetGroupArn": reference(TARGET_GROUP_ID),
                    "Type": "forward"
                }],
                "LoadBalancerArn": reference(LOAD_BALANCER_ID),
                "Port": 80,
                "Protocol": "HTTP"
            }),
        );

        let outputs = vec![
            Output {
                name: "LoadbalancerArn".to_string(),
                value: reference(LOAD_BALANCER_ID),
            },
            Output {
                name: ENDPOINT_OUTPUT.to_string(),
                value: get_att(LOAD_BALANCER_ID, "DNSName"),
            },
            Output {
                name: "AppFunctionArn".to_string(),
                value: get_att(FUNCTION_ID, "Arn"),
            },
        ];

        Ok(Template::new(
            vec![role, function, target_group, permission, load_balancer, listener],
            outputs,
        )
        .with_description(format!("{} deployed by stackship", self.app_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ContentDigest;

    fn builder() -> TemplateBuilder {
        TemplateBuilder::new(
            "myapp",
            StoreLocation::new("123456789012-myapp", ContentDigest::new("abc123")),
        )
        .subnets(vec!["subnet-a".to_string(), "subnet-b".to_string()])
    }

    #[test]
    fn graph_has_expected_resources() {
        let template = builder().build().unwrap();
        let listing: Vec<String> = template
            .resources()
            .iter()
            .map(|r| format!("{} {}", r.logical_id, r.kind))
            .collect();

        insta::assert_snapshot!(listing.join("\n"), @r"
        LambdaExecutionRole AWS::IAM::Role
        AppFunction AWS::Lambda::Function
        TargetGroup AWS::ElasticLoadBalancingV2::TargetGroup
        InvokePermission AWS::Lambda::Permission
        ApplicationElasticLB AWS::ElasticLoadBalancingV2::LoadBalancer
        Listener AWS::ElasticLoadBalancingV2::Listener
        ");
    }

    #[test]
    fn function_code_points_at_store_location() {
        let value = builder().build().unwrap().to_value();
        let code = &value["Resources"][FUNCTION_ID]["Properties"]["Code"];
        assert_eq!(code["S3Bucket"], "123456789012-myapp");
        assert_eq!(code["S3Key"], "abc123");
    }

    #[test]
    fn target_group_waits_for_invoke_permission() {
        let template = builder().build().unwrap();
        let tg = template.resource(TARGET_GROUP_ID).unwrap();
        assert_eq!(tg.depends_on, vec![PERMISSION_ID.to_string()]);
    }

    #[test]
    fn outputs_expose_dns_name() {
        let template = builder().build().unwrap();
        let names: Vec<&str> = template.outputs().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["LoadbalancerArn", ENDPOINT_OUTPUT, "AppFunctionArn"]);
    }

    #[test]
    fn same_inputs_render_identical_body() {
        assert_eq!(
            builder().build().unwrap().to_json(),
            builder().build().unwrap().to_json()
        );
    }

    #[test]
    fn new_digest_changes_body() {
        let other = TemplateBuilder::new(
            "myapp",
            StoreLocation::new("123456789012-myapp", ContentDigest::new("def456")),
        )
        .subnets(vec!["subnet-a".to_string(), "subnet-b".to_string()]);
        assert_ne!(builder().build().unwrap().to_json(), other.build().unwrap().to_json());
    }

    #[test]
    fn description_names_app() {
        let template = builder().build().unwrap();
        assert_eq!(template.description(), Some("myapp deployed by stackship"));
    }

    #[test]
    fn runtime_is_configurable() {
        let value = builder().runtime("provided.al2").build().unwrap().to_value();
        assert_eq!(
            value["Resources"][FUNCTION_ID]["Properties"]["Runtime"],
            "provided.al2"
        );
    }

    #[test]
    fn no_subnets_is_template_error() {
        let err = TemplateBuilder::new("myapp", StoreLocation::new("b", ContentDigest::new("k")))
            .build()
            .unwrap_err();
        assert!(matches!(err, DeployError::Template(_)));
    }
}
