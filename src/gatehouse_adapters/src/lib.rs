pub mod config;
pub mod identity;
pub mod navigation;
pub mod persistence;
