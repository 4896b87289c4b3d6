//! Scenario: deploying the same app again.

use crate::common::*;

#[test]
fn unchanged_redeploy_uploads_nothing_and_succeeds() {
    let env = TestEnv::new();
    assert!(env.deploy(&[]).success);

    let result = env.deploy(&[]);

    assert!(result.success, "redeploy failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("myapp is deployed at http://"));
    assert_eq!(env.count_calls("s3api create-bucket"), 1);
    assert_eq!(env.count_calls("s3api put-object"), 1);
    assert_eq!(env.count_calls("cloudformation create-stack"), 1);
    assert_eq!(env.count_calls("cloudformation update-stack"), 1);
    assert!(result.stderr.contains("up to date"), "{}", result.stderr);
}

#[test]
fn rebuilt_binary_is_published_under_new_key_and_stack_updated() {
    let env = TestEnv::new();
    assert!(env.deploy(&[]).success);

    env.write_binary(b"\x7fELF myapp v2");
    let result = env.deploy(&[]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.objects(&format!("{}-myapp", ACCOUNT_ID)).len(), 2);
    assert_eq!(env.count_calls("s3api put-object"), 2);
    assert_eq!(
        std::fs::read_to_string(env.state_dir().join("stacks/myapp/status"))
            .unwrap()
            .trim(),
        "UPDATE_COMPLETE"
    );
}
