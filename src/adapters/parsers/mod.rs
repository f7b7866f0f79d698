pub mod plan_parser;
pub mod snapshot_parser;
