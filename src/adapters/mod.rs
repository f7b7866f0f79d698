pub mod backends;
pub mod parsers;
