use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run keywright with given args.
fn keywright() -> assert_cmd::Command {
    cargo_bin_cmd!("keywright")
}

const KEYRING: &str = r#"
[[user_id]]
raw = "Alice <alice@example.org>"
primary = true
verification = "secret"

[[user_id]]
raw = "Bob <bob@example.org>"
verification = "self"

[[subkey]]
key_id = 42
algorithm = "rsa"
usage = ["encrypt"]
"#;

fn setup(plan: &str) -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keyring.toml").write_str(KEYRING).unwrap();
    dir.child("plan.toml").write_str(plan).unwrap();
    dir
}

// ─── Check command ──────────────────────────────────────────────

#[test]
fn check_accepts_a_valid_plan() {
    let dir = setup(
        r#"
        add_user_ids = ["Carol <carol@example.org>"]
        primary_user_id = "Bob <bob@example.org>"

        [[add_subkey]]
        algorithm = "rsa"
        key_size = 3072
        usage = ["sign"]
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 operation(s) ready to commit"));
}

#[test]
fn check_verbose_lists_every_queued_operation() {
    let dir = setup(
        r#"
        revoke_user_ids = ["Bob <bob@example.org>"]

        [[change_expiry]]
        key_id = 42
        expires = "2035-06-01T00:00:00Z"
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("revoke user id 'Bob <bob@example.org>'"))
        .stdout(predicate::str::contains("change subkey 0x000000000000002A expiry"));
}

#[test]
fn check_rejects_a_subkey_with_no_capabilities() {
    let dir = setup(
        r#"
        [[add_subkey]]
        algorithm = "rsa"
        key_size = 4096
        usage = []
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No key capability selected"));
}

#[test]
fn check_rejects_sign_on_ecdh() {
    let dir = setup(
        r#"
        [[add_subkey]]
        algorithm = "ecdh"
        usage = ["sign"]
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not available for ECDH"));
}

#[test]
fn check_rejects_an_out_of_range_rsa_length() {
    let dir = setup(
        r#"
        [[add_subkey]]
        algorithm = "rsa"
        key_size = 512
        usage = ["sign"]
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key length"));
}

#[test]
fn check_rejects_a_past_expiry() {
    let dir = setup(
        r#"
        [[add_subkey]]
        algorithm = "rsa"
        key_size = 4096
        usage = ["sign"]
        expires = "2020-01-01T00:00:00Z"
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too early"));
}

#[test]
fn check_rejects_revoking_an_unknown_user_id() {
    let dir = setup(r#"revoke_user_ids = ["Nobody <nobody@example.org>"]"#);

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist on this keyring"));
}

#[test]
fn check_warns_when_the_pending_primary_is_revoked() {
    let dir = setup(
        r#"
        primary_user_id = "Bob <bob@example.org>"
        revoke_user_ids = ["Bob <bob@example.org>"]
        "#,
    );

    // A conflict is surfaced, not auto-resolved, so the check still passes.
    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is revoked"))
        .stdout(predicate::str::contains("2 operation(s) ready to commit"));
}

#[test]
fn check_reports_an_empty_plan() {
    let dir = setup("");

    keywright()
        .current_dir(dir.path())
        .args(["check", "keyring.toml", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing would change"));
}

// ─── Commit command ─────────────────────────────────────────────

#[test]
fn commit_writes_the_transaction_json() {
    let dir = setup(
        r#"
        revoke_user_ids = ["Bob <bob@example.org>"]

        [[add_subkey]]
        algorithm = "rsa"
        key_size = 3001
        usage = ["sign"]

        [[revoke_subkey]]
        key_id = 42
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["commit", "keyring.toml", "plan.toml", "-o", "transaction.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 operation(s)"));

    let written = std::fs::read_to_string(dir.path().join("transaction.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    let ops = json["ops"].as_array().unwrap();

    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0]["op"], "revoke_user_id");
    assert_eq!(ops[0]["user_id"], "Bob <bob@example.org>");
    assert_eq!(ops[1]["op"], "add_subkey");
    // Key length is normalized at propose time, never at commit time.
    assert_eq!(ops[1]["key_size"], 3008);
    assert_eq!(ops[1]["expiry"], 0);
    assert_eq!(ops[2]["op"], "revoke_subkey");
    assert_eq!(ops[2]["key_id"], 42);
}

#[test]
fn commit_prints_to_stdout_without_an_output_path() {
    let dir = setup(r#"primary_user_id = "Bob <bob@example.org>""#);

    keywright()
        .current_dir(dir.path())
        .args(["commit", "keyring.toml", "plan.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("change_primary_user_id"));
}

#[test]
fn commit_of_an_invalid_plan_writes_nothing() {
    let dir = setup(
        r#"
        [[add_subkey]]
        algorithm = "dsa"
        key_size = 2048
        usage = ["sign"]
        "#,
    );

    keywright()
        .current_dir(dir.path())
        .args(["commit", "keyring.toml", "plan.toml", "-o", "transaction.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key length"));

    assert!(!dir.path().join("transaction.json").exists());
}
