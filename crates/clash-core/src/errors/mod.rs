mod apply_error;
mod clash_error;
mod config_error;
mod hierarchy_error;
mod lookup_error;

pub use apply_error::ApplyError;
pub use clash_error::{ClashError, ClashResult};
pub use config_error::ConfigError;
pub use hierarchy_error::HierarchyError;
pub use lookup_error::LookupError;
