pub mod json_backend;
