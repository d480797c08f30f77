use std::sync::Arc;

use crate::models::SubscriptionId;

/// Structural change observed in the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChange {
    TestReplaced { index: usize },
    ChildAppended { index: usize },
    TransactionCommitted,
}

pub type ChangeListener = Arc<dyn Fn(&DocumentChange) + Send + Sync>;

/// Subscription to document change events.
pub trait IChangeNotifier: Send + Sync {
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Returns `false` if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
