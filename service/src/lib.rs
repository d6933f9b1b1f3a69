//! Ambient configuration and logging shared by the seeder binary and library.

pub mod config;
pub mod logging;
