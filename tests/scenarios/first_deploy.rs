//! Scenario: deploying an app to a fresh account.

use crate::common::*;

#[test]
fn first_deploy_creates_everything_and_prints_url() {
    let env = TestEnv::new();

    let result = env.deploy(&[]);

    assert!(result.success, "deploy failed:\n{}", result.combined_output());
    assert!(
        result
            .stdout
            .contains("myapp is deployed at http://myapp-lb.eu-west-2.elb.amazonaws.com"),
        "unexpected stdout:\n{}",
        result.stdout
    );

    let bucket = format!("{}-myapp", ACCOUNT_ID);
    assert_eq!(env.count_calls("s3api create-bucket"), 1);
    assert_eq!(env.count_calls("cloudformation create-stack"), 1);
    assert_eq!(env.count_calls("cloudformation update-stack"), 0);

    let objects = env.objects(&bucket);
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].len(), 64, "object key should be a SHA-256 digest");
}

#[test]
fn bucket_is_created_in_requested_region() {
    let env = TestEnv::new();

    let result = env.deploy(&["--region", "eu-west-1"]);

    assert!(result.success, "{}", result.combined_output());
    let create = env
        .calls()
        .into_iter()
        .find(|c| c.contains("s3api create-bucket"))
        .unwrap();
    assert!(create.contains("--region eu-west-1"));
    assert!(create.contains("LocationConstraint=eu-west-1"));
}

#[test]
fn template_copy_is_written_to_working_directory() {
    let env = TestEnv::new();

    let result = env.deploy(&[]);
    assert!(result.success, "{}", result.combined_output());

    let written = std::fs::read_to_string(env.root().join("cloud.json")).unwrap();
    let submitted =
        std::fs::read_to_string(env.state_dir().join("stacks/myapp/template.json")).unwrap();
    assert_eq!(written, submitted);

    let template: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(template["Resources"]["AppFunction"].is_object());
    assert_eq!(
        template["Resources"]["ApplicationElasticLB"]["Properties"]["Subnets"],
        serde_json::json!(["subnet-aaa", "subnet-bbb"])
    );
}

#[test]
fn stack_name_flag_overrides_package_name() {
    let env = TestEnv::new();

    let result = env.deploy(&["--stack-name", "myapp-staging", "--template-out", ""]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.state_dir().join("stacks/myapp-staging").is_dir());
    assert!(!env.root().join("cloud.json").exists());
}
