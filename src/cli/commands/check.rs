use chrono::Utc;

use crate::cli::commands::session;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `keywright check` command.
///
/// Replays the plan against the snapshot. Every operation is validated
/// as it is queued, so reaching the end means the whole plan is sound;
/// the first invalid operation aborts with its validation error.
/// Consistency conflicts (e.g. a revoked pending primary) do not fail
/// the check but are reported for the operator to resolve.
pub fn execute(snapshot_path: &str, plan_path: &str, verbose: bool) -> Result<()> {
    let model = session::open(snapshot_path, Some(plan_path), Utc::now())?;

    output::header("🔎 keywright check");

    let transaction = model.commit();
    if !model.is_dirty() {
        output::warning("Plan is empty — nothing would change");
        return Ok(());
    }

    if verbose {
        for op in &transaction.ops {
            output::detail(&format!("• {op}"));
        }
    }

    for conflict in model.conflicts() {
        output::warning(&conflict.to_string());
    }

    output::success(&format!(
        "Plan is valid: {} operation(s) ready to commit",
        transaction.len()
    ));

    Ok(())
}
