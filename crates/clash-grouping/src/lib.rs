//! # clash-grouping
//!
//! Grouping pipeline: flatten → group (first mode) → subgroup (second mode) →
//! collapse singletons → back up existing groups → transactional apply.
//! Key extraction is pluggable through the [`StrategyRegistry`]; the
//! [`GroupingCoordinator`] runs batches off the caller's task with a
//! single-operation guard and host change notifications suspended.

pub mod ancestors;
pub mod coordinator;
pub mod engine;
pub mod pipeline;
pub mod progress;
pub mod strategies;

pub use ancestors::AncestorResolver;
pub use coordinator::GroupingCoordinator;
pub use engine::{GroupingEngine, Operation, OperationGate, OperationPermit, Preparation, PreparedTarget};
pub use pipeline::{GroupingPlan, UngroupedRecord};
pub use progress::{CancellationToken, ProgressReporter};
pub use strategies::{KeyStrategy, StrategyRegistry};
