pub mod algorithm;
pub mod keyring;
pub mod subkey;
pub mod transaction;
pub mod user_identity;
