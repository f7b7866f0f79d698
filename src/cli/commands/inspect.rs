use chrono::Utc;
use colored::Colorize;

use crate::cli::commands::session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::subkey::Expiry;
use crate::core::models::user_identity::UserIdentity;
use crate::core::services::edit_model::KeyringEditModel;

/// Execute the `keywright inspect` command.
///
/// Renders the keyring's user ids and subkeys, with any pending edits
/// from `--plan` merged into the displayed state. Revoked user ids are
/// hidden unless `--all` is given.
pub fn execute(snapshot_path: &str, plan_path: Option<&str>, all: bool) -> Result<()> {
    let model = session::open(snapshot_path, plan_path, Utc::now())?;

    output::header("🔑 keywright inspect");

    println!("\n  User ids:");
    let mut shown = 0;
    for identity in &model.snapshot().identities {
        let revoked = model.is_effectively_revoked(identity);
        if revoked && !all {
            continue;
        }
        shown += 1;
        print_identity(&model, identity, revoked);
    }
    if shown == 0 {
        output::detail("(none)");
    }

    println!("\n  Subkeys:");
    if model.snapshot().subkeys.is_empty() {
        output::detail("(none)");
    }
    for subkey in &model.snapshot().subkeys {
        let expiry = model
            .pending_subkey_expiry(subkey.key_id)
            .unwrap_or(Expiry::from(subkey.expires));
        let mut line = format!(
            "0x{:016X}  {}  [{}]  expires: {}",
            subkey.key_id, subkey.algorithm, subkey.usage, expiry
        );
        if subkey.revoked || model.is_subkey_revocation_pending(subkey.key_id) {
            line = format!("{line}  {}", "(revoked)".red());
        }
        output::detail(&line);
    }

    let pending_adds = model.pending_subkey_adds();
    if !pending_adds.is_empty() {
        println!("\n  Pending new subkeys:");
        for request in pending_adds {
            let strength = match (request.key_size, request.curve) {
                (Some(bits), _) => format!("{bits} bits"),
                (None, Some(curve)) => curve.to_string(),
                (None, None) => String::new(),
            };
            output::detail(&format!(
                "+ {} {}  [{}]  expires: {}",
                request.algorithm, strength, request.usage, request.expiry
            ));
        }
    }

    let pending_uid_adds = model.pending_user_id_adds();
    if !pending_uid_adds.is_empty() {
        println!("\n  Pending new user ids:");
        for user_id in pending_uid_adds {
            output::detail(&format!("+ {user_id}"));
        }
    }

    for conflict in model.conflicts() {
        println!();
        output::warning(&conflict.to_string());
    }

    Ok(())
}

fn print_identity(model: &KeyringEditModel, identity: &UserIdentity, revoked: bool) {
    let parts = identity.split();
    let name = parts.name.unwrap_or_else(|| "(no name)".to_string());

    let mut line = if model.is_effective_primary(identity) && !revoked {
        format!("★ {}", name.bold())
    } else {
        format!("  {name}")
    };
    if let Some(comment) = parts.comment {
        line = format!("{line} ({comment})");
    }
    if let Some(email) = parts.email {
        line = format!("{line} <{email}>");
    }

    if revoked {
        line = format!("{line}  {}", "(revoked)".red());
    } else {
        line = format!("{line}  [{}]", identity.verification);
    }
    output::detail(&line);
}
