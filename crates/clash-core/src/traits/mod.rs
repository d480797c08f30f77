//! Boundary traits implemented by the host application.

mod document;
mod grid_system;
mod model_tree;
mod notifier;
mod progress;

pub use document::IClashDocument;
pub use grid_system::IGridSystem;
pub use model_tree::IModelTree;
pub use notifier::{ChangeListener, DocumentChange, IChangeNotifier};
pub use progress::IProgressSink;
