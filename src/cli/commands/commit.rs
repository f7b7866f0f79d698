use std::path::PathBuf;

use chrono::Utc;

use crate::adapters::backends::json_backend::JsonBackend;
use crate::cli::commands::session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::backend::MutationBackend;

/// Execute the `keywright commit` command.
///
/// Replays the plan, flattens it into a transaction, and hands the
/// transaction to the JSON backend. Validation failures surface during
/// the replay; the commit step itself only fails if the backend does.
pub fn execute(snapshot_path: &str, plan_path: &str, output_path: Option<&str>) -> Result<()> {
    let model = session::open(snapshot_path, Some(plan_path), Utc::now())?;
    let transaction = model.commit();

    let backend = match output_path {
        Some(path) => JsonBackend::to_file(PathBuf::from(path)),
        None => JsonBackend::to_stdout(),
    };
    backend.apply(&transaction)?;

    if let Some(path) = output_path {
        output::success(&format!(
            "Wrote {} operation(s) to {path} via the {} backend",
            transaction.len(),
            backend.name()
        ));
    }

    for conflict in model.conflicts() {
        output::warning(&conflict.to_string());
    }

    Ok(())
}
