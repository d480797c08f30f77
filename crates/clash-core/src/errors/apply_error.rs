/// Errors raised while writing a new structure into the host document.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("clash test index {index} out of range ({len} tests)")]
    TestIndexOutOfRange { index: usize, len: usize },

    #[error("transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("document rejected mutation: {reason}")]
    MutationRejected { reason: String },

    #[error("rollback failed: {reason}")]
    RollbackFailed { reason: String },
}
