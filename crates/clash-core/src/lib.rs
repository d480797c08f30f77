//! # clash-core
//!
//! Foundation crate for the clash grouping engine.
//! Defines the clash data model, the host-document traits, errors, config,
//! constants, and logging setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ClashConfig;
pub use errors::{ClashError, ClashResult};
pub use models::{
    ClashGroup, ClashNode, ClashRecord, ClashSide, ClashStatus, ClashTest, ElementId,
    GroupingMode, GroupingRequest, NodeId, Point3,
};
