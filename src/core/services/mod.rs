pub mod edit_model;
pub mod key_params;
pub mod subkey_changes;
pub mod user_id_changes;
