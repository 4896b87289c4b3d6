//! Scenario: deploys that must fail loudly.

use crate::common::*;

#[test]
fn missing_release_binary_exits_non_zero_without_cloud_calls() {
    let env = TestEnv::new();
    std::fs::remove_file(
        env.app_path()
            .join("target/x86_64-unknown-linux-musl/release/myapp"),
    )
    .unwrap();

    let result = env.deploy(&[]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("Error:"), "{}", result.stderr);
    assert!(env.calls().is_empty());
}

#[test]
fn rolled_back_update_names_update_phase() {
    let env = TestEnv::new();
    assert!(env.deploy(&[]).success);

    env.write_binary(b"\x7fELF myapp broken");
    let env = env.with_env("STUB_UPDATE_STATUS", "UPDATE_ROLLBACK_COMPLETE");
    let result = env.deploy(&[]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("update failed for stack 'myapp'"),
        "{}",
        result.stderr
    );
}

#[test]
fn missing_manifest_is_reported() {
    let env = TestEnv::new();
    let result = env.run(&[env.root().join("nowhere").to_str().unwrap()]);

    assert!(!result.success);
    assert!(result.stderr.contains("Cargo.toml"), "{}", result.stderr);
}
