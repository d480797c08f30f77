use clash_core::config::ObservabilityConfig;
use clash_core::logging::{init_tracing, init_tracing_with_config, init_tracing_with_filter};

#[test]
fn init_is_idempotent() {
    init_tracing_with_filter("clash=debug");
    init_tracing();
    init_tracing_with_config(&ObservabilityConfig {
        log_filter: "clash=trace".to_string(),
        json: true,
    });
    tracing::info!(target: "clash_core", "still logging after repeated init");
}
