use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use clash_core::errors::{ApplyError, ClashResult};
use clash_core::models::{ClashNode, ClashTest, NodeId, SubscriptionId};
use clash_core::traits::{ChangeListener, DocumentChange, IChangeNotifier, IClashDocument};

#[derive(Debug, Default)]
struct State {
    tests: Vec<ClashTest>,
    open_transactions: usize,
    committed_transactions: usize,
    appends: usize,
    fail_appends_after: Option<usize>,
    fail_restores: bool,
    replaced_once: bool,
}

/// Clash document backed by a vector of tests, with change notification
/// and failure injection.
#[derive(Default)]
pub struct InMemoryDocument {
    state: Mutex<State>,
    listeners: Mutex<Vec<(SubscriptionId, ChangeListener)>>,
    next_subscription: AtomicU64,
}

impl InMemoryDocument {
    pub fn new(tests: impl IntoIterator<Item = ClashTest>) -> Self {
        Self {
            state: Mutex::new(State {
                tests: tests.into_iter().collect(),
                ..State::default()
            }),
            ..Self::default()
        }
    }

    /// Current contents of the test at `index`.
    pub fn test(&self, index: usize) -> ClashTest {
        self.state.lock().unwrap().tests[index].clone()
    }

    pub fn test_by_id(&self, id: &NodeId) -> Option<ClashTest> {
        let state = self.state.lock().unwrap();
        state.tests.iter().find(|t| t.node_id == *id).cloned()
    }

    /// Every append after the first `n` successful ones fails.
    pub fn fail_appends_after(&self, n: usize) {
        let mut state = self.state.lock().unwrap();
        state.appends = 0;
        state.fail_appends_after = Some(n);
    }

    /// Every replacement after the first (the swap-in) fails.
    pub fn fail_restores(&self) {
        self.state.lock().unwrap().fail_restores = true;
    }

    pub fn committed_transactions(&self) -> usize {
        self.state.lock().unwrap().committed_transactions
    }

    pub fn open_transactions(&self) -> usize {
        self.state.lock().unwrap().open_transactions
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    fn notify(&self, change: DocumentChange) {
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&change);
        }
    }

    fn check_index(state: &State, index: usize) -> ClashResult<()> {
        if index >= state.tests.len() {
            return Err(ApplyError::TestIndexOutOfRange {
                index,
                len: state.tests.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl IClashDocument for InMemoryDocument {
    fn test_ids(&self) -> Vec<NodeId> {
        self.state.lock().unwrap().tests.iter().map(|t| t.node_id).collect()
    }

    fn find_test(&self, id: &NodeId) -> Option<usize> {
        self.state.lock().unwrap().tests.iter().position(|t| t.node_id == *id)
    }

    fn read_test(&self, index: usize) -> ClashResult<ClashTest> {
        let state = self.state.lock().unwrap();
        Self::check_index(&state, index)?;
        Ok(state.tests[index].clone())
    }

    fn begin_transaction(&self, _label: &str) -> ClashResult<()> {
        let mut state = self.state.lock().unwrap();
        state.open_transactions += 1;
        state.replaced_once = false;
        Ok(())
    }

    fn commit_transaction(&self) -> ClashResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            if state.open_transactions == 0 {
                return Err(ApplyError::TransactionFailed {
                    reason: "no open transaction".to_string(),
                }
                .into());
            }
            state.open_transactions -= 1;
            state.committed_transactions += 1;
        }
        self.notify(DocumentChange::TransactionCommitted);
        Ok(())
    }

    fn replace_test(&self, index: usize, test: ClashTest) -> ClashResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            Self::check_index(&state, index)?;
            if state.fail_restores && state.replaced_once {
                return Err(ApplyError::MutationRejected {
                    reason: "replace rejected".to_string(),
                }
                .into());
            }
            state.replaced_once = true;
            state.tests[index] = test;
        }
        self.notify(DocumentChange::TestReplaced { index });
        Ok(())
    }

    fn append_child(&self, index: usize, child: ClashNode) -> ClashResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            Self::check_index(&state, index)?;
            if state.fail_appends_after.is_some_and(|n| state.appends >= n) {
                return Err(ApplyError::MutationRejected {
                    reason: "append rejected".to_string(),
                }
                .into());
            }
            state.appends += 1;
            state.tests[index].push(child);
        }
        self.notify(DocumentChange::ChildAppended { index });
        Ok(())
    }
}

impl IChangeNotifier for InMemoryDocument {
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().unwrap().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}
