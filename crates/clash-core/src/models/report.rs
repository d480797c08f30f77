use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NodeId;

/// Kind of structural rewrite performed on a clash test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Group,
    Ungroup,
}

/// Why an operation was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The clash test has no children.
    EmptyTest,
    /// Neither grouping level selects a mode.
    NoModeSelected,
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationOutcome {
    /// The new structure is committed.
    Applied,
    /// Cancellation (or an apply failure) restored the original structure.
    RolledBack,
    Skipped(SkipReason),
}

/// A record emitted loose by singleton collapse, with the name it was classified under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedContext {
    pub source_id: String,
    pub context: String,
}

/// Summary of one grouping or ungrouping operation on one clash test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationReport {
    pub test_id: NodeId,
    pub test_name: String,
    pub kind: OperationKind,
    pub outcome: OperationOutcome,
    pub groups_created: usize,
    pub groups_preserved: usize,
    pub ungrouped: usize,
    pub leaves_before: usize,
    pub leaves_after: usize,
    pub collapsed: Vec<CollapsedContext>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl OperationReport {
    /// Report for an operation that did not touch the document.
    pub fn skipped(
        test_id: NodeId,
        test_name: impl Into<String>,
        kind: OperationKind,
        reason: SkipReason,
        leaves: usize,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            test_id,
            test_name: test_name.into(),
            kind,
            outcome: OperationOutcome::Skipped(reason),
            groups_created: 0,
            groups_preserved: 0,
            ungrouped: 0,
            leaves_before: leaves,
            leaves_after: leaves,
            collapsed: Vec::new(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == OperationOutcome::Applied
    }
}

/// Result for one target of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetResult {
    Completed(OperationReport),
    Failed { error: String },
}

/// One entry of a batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub test_id: NodeId,
    pub result: TargetResult,
}

/// Outcome of a multi-target user action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn push(&mut self, test_id: NodeId, result: TargetResult) {
        self.entries.push(BatchEntry { test_id, result });
    }

    pub fn completed(&self) -> impl Iterator<Item = &OperationReport> {
        self.entries.iter().filter_map(|e| match &e.result {
            TargetResult::Completed(r) => Some(r),
            TargetResult::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, TargetResult::Failed { .. }))
            .count()
    }
}
