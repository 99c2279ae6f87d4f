//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod post_process;
pub mod update_zones;
pub mod validate;
