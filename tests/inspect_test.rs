use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run keywright with given args.
fn keywright() -> assert_cmd::Command {
    cargo_bin_cmd!("keywright")
}

const KEYRING: &str = r#"
[[user_id]]
raw = "Alice Example (work) <alice@example.org>"
primary = true
verification = "secret"

[[user_id]]
raw = "Bob <bob@example.org>"
verification = "self"

[[user_id]]
raw = "Old Alice <old@example.org>"
revoked = true
verification = "invalid"

[[subkey]]
key_id = 42
algorithm = "rsa"
usage = ["encrypt"]
"#;

// ─── Inspect command ────────────────────────────────────────────

#[test]
fn inspect_shows_identities_and_subkeys() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keyring.toml").write_str(KEYRING).unwrap();

    keywright()
        .current_dir(dir.path())
        .args(["inspect", "keyring.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Example"))
        .stdout(predicate::str::contains("(work)"))
        .stdout(predicate::str::contains("<alice@example.org>"))
        .stdout(predicate::str::contains("★"))
        .stdout(predicate::str::contains("RSA"))
        .stdout(predicate::str::contains("expires: never"));
}

#[test]
fn inspect_hides_revoked_identities_by_default() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keyring.toml").write_str(KEYRING).unwrap();

    keywright()
        .current_dir(dir.path())
        .args(["inspect", "keyring.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Alice").not());
}

#[test]
fn inspect_all_includes_revoked_identities() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keyring.toml").write_str(KEYRING).unwrap();

    keywright()
        .current_dir(dir.path())
        .args(["inspect", "keyring.toml", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Alice"))
        .stdout(predicate::str::contains("(revoked)"));
}

#[test]
fn inspect_overlays_pending_plan_state() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keyring.toml").write_str(KEYRING).unwrap();
    dir.child("plan.toml")
        .write_str(
            r#"
            revoke_user_ids = ["Bob <bob@example.org>"]

            [[add_subkey]]
            algorithm = "ecdh"
            usage = ["encrypt"]
            "#,
        )
        .unwrap();

    keywright()
        .current_dir(dir.path())
        .args(["inspect", "keyring.toml", "--plan", "plan.toml"])
        .assert()
        .success()
        // Bob's pending revocation hides him from the default view.
        .stdout(predicate::str::contains("Bob").not())
        .stdout(predicate::str::contains("Pending new subkeys"))
        .stdout(predicate::str::contains("NIST P-256"));
}

#[test]
fn inspect_missing_snapshot_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    keywright()
        .current_dir(dir.path())
        .args(["inspect", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
