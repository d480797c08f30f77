mod clash_config;
pub mod defaults;
mod grouping_config;
mod observability_config;

pub use clash_config::{ClashConfig, ConfigOverrides, CONFIG_FILENAME};
pub use grouping_config::GroupingConfig;
pub use observability_config::ObservabilityConfig;
