//! Signage Infrastructure Layer
pub mod console;
pub mod database;
pub mod repositories;
