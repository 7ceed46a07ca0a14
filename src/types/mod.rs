pub mod analysis;
pub mod config;
pub mod estimation;
pub mod privilege;
