use std::path::Path;

use chrono::{DateTime, Utc};

use crate::adapters::parsers::plan_parser::PlanParser;
use crate::adapters::parsers::snapshot_parser::SnapshotParser;
use crate::core::errors::Result;
use crate::core::services::edit_model::KeyringEditModel;

/// Open an edit session: load the snapshot, and when a plan is given,
/// replay it into the fresh model. The model only ever exists in memory
/// for the duration of one command.
pub fn open(snapshot_path: &str, plan_path: Option<&str>, now: DateTime<Utc>) -> Result<KeyringEditModel> {
    let snapshot = SnapshotParser.load(Path::new(snapshot_path))?;
    let mut model = KeyringEditModel::new(snapshot);

    if let Some(plan_path) = plan_path {
        let plan = PlanParser.load(Path::new(plan_path))?;
        plan.apply_to(&mut model, now)?;
    }

    Ok(model)
}
