pub mod cipher;
pub mod config;
pub mod errors;
pub mod vault;
