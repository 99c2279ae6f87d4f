//! Export orchestration and output
//!
//! This module provides the export run for Shipex, including:
//! - Export coordination and orchestration
//! - Raw export and post-processed file writing
//! - Post-processing stages
//! - Summary and reporting

pub mod coordinator;
pub mod post_process;
pub mod summary;
pub mod writer;

pub use coordinator::ExportCoordinator;
pub use post_process::PostProcessor;
pub use summary::{ExportSummary, WrittenFile};
pub use writer::{write_export, write_processed};
