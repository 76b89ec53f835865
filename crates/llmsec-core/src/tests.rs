//! Unit tests for llmsec-core.

#[test]
fn test_crate_structure() {
    // Smoke test - verifies the public surface wires together
    use crate::{
        Adapters, AdapterMode, Orchestrator, SecurityCore, SecurityCoreConfig, SecurityHandler,
        Severity, Violation,
    };

    let _config = SecurityCoreConfig::default();
    let _handler = SecurityHandler::new();
    let _violation = Violation::new("p1", Severity::High);
    assert_eq!(Orchestrator::simulator().adapters().mode(), AdapterMode::Simulator);
    assert_eq!(Adapters::simulator().mode(), AdapterMode::Simulator);
    assert!(SecurityCore::builder().build_handler().is_initialized());
}
