// Detector chain tests: precedence, short-circuiting, extensibility

use super::*;
use crate::process::Process;
use anyhow::Result;

fn ancestry(commands: &[&str]) -> Vec<Process> {
    commands
        .iter()
        .enumerate()
        .map(|(i, c)| Process::new(*c, 1000 - i as i32))
        .collect()
}

fn default_chain() -> DetectorChain {
    DetectorChain::from_config(&SourceConfig::default()).expect("default config is valid")
}

/// Counts how often it is consulted, to observe short-circuiting
#[derive(Debug, Default)]
struct CountingDetector {
    calls: std::sync::atomic::AtomicUsize,
}

impl SourceDetector for CountingDetector {
    fn id(&self) -> &str {
        "counting"
    }

    fn detect(&self, _ancestry: &[Process]) -> Option<Source> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        None
    }
}

#[test]
fn test_bash_under_systemd_is_shell() {
    let source = default_chain()
        .detect(&ancestry(&["bash", "systemd"]))
        .unwrap();

    assert_eq!(source.source_type, SourceType::Shell);
    assert_eq!(source.name, "bash");
    assert_eq!(source.confidence.value(), 0.5);
}

#[test]
fn test_crond_anywhere_is_cron() {
    let source = default_chain()
        .detect(&ancestry(&["python3", "sh", "crond", "systemd"]))
        .unwrap();

    assert_eq!(source.source_type, SourceType::Cron);
    assert_eq!(source.name, "cron");
    assert_eq!(source.confidence.value(), 0.6);
}

#[test]
fn test_cron_outranks_nearer_shell() {
    // sh is the nearer ancestor but cron is registered above shell
    let source = default_chain()
        .detect(&ancestry(&["sh", "cron"]))
        .unwrap();
    assert_eq!(source.source_type, SourceType::Cron);
}

#[test]
fn test_no_match_is_none() {
    let chain = default_chain();
    assert!(chain.detect(&ancestry(&["sshd", "systemd"])).is_none());
    assert!(chain.detect(&[]).is_none());
}

#[test]
fn test_empty_chain_detects_nothing() {
    let chain = DetectorChain::new();
    assert!(chain.is_empty());
    assert!(chain.detect(&ancestry(&["bash"])).is_none());
}

#[test]
fn test_default_evaluation_order() {
    assert_eq!(default_chain().detector_ids(), vec!["cron", "shell"]);
}

#[test]
fn test_register_orders_by_priority_then_registration() -> Result<()> {
    let weight = Confidence::new(0.5)?;
    let mut chain = DetectorChain::new();
    chain.register(10, SignatureDetector::new("low", SourceType::Shell, "a", ["a"], weight))?;
    chain.register(50, SignatureDetector::new("high", SourceType::Shell, "b", ["b"], weight))?;
    chain.register(10, SignatureDetector::new("low2", SourceType::Shell, "c", ["c"], weight))?;
    chain.register(30, SignatureDetector::new("mid", SourceType::Shell, "d", ["d"], weight))?;

    assert_eq!(chain.detector_ids(), vec!["high", "mid", "low", "low2"]);
    assert_eq!(chain.len(), 4);
    Ok(())
}

#[test]
fn test_register_boxed_detector() -> Result<()> {
    let boxed: Box<dyn SourceDetector> = Box::new(SignatureDetector::new(
        "supervisor",
        SourceType::Other("supervisor".to_string()),
        "supervisord",
        ["supervisord"],
        Confidence::new(0.7)?,
    ));

    let mut chain = default_chain();
    chain.register(150, boxed)?;
    assert_eq!(chain.detector_ids(), vec!["cron", "supervisor", "shell"]);

    let source = chain
        .detect(&ancestry(&["python3", "supervisord", "bash"]))
        .expect("supervisord outranks the shell");
    assert_eq!(source.name, "supervisord");
    Ok(())
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut chain = default_chain();
    let result = chain.register(
        1,
        ShellDetector::new(["tcsh"], Confidence::new(0.1).unwrap()),
    );
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("already registered"));
}

#[test]
fn test_short_circuit_skips_lower_priority() -> Result<()> {
    let counting = std::sync::Arc::new(CountingDetector::default());

    let mut chain = default_chain();
    chain.register(1, counting.clone())?;

    // Shell matches first: the lowest-priority detector is never consulted
    assert!(chain.detect(&ancestry(&["bash"])).is_some());
    assert_eq!(counting.calls.load(std::sync::atomic::Ordering::SeqCst), 0);

    // Nothing above matches: it runs
    assert!(chain.detect(&ancestry(&["init"])).is_none());
    assert_eq!(counting.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_configured_signature_extends_chain() -> Result<()> {
    let mut config = SourceConfig::default();
    config
        .weights
        .insert("supervisor".to_string(), Confidence::new(0.7)?);
    config.detectors.push(SignatureConfig {
        id: "supervisor".to_string(),
        source_type: SourceType::Other("supervisor".to_string()),
        name: "supervisord".to_string(),
        commands: vec!["supervisord".to_string()],
        priority: 150,
    });

    let chain = DetectorChain::from_config(&config)?;
    assert_eq!(chain.detector_ids(), vec!["cron", "supervisor", "shell"]);

    // Outranks the shell even though the shell is nearer
    let source = chain
        .detect(&ancestry(&["bash", "supervisord", "systemd"]))
        .unwrap();
    assert_eq!(source.source_type, SourceType::Other("supervisor".to_string()));
    assert_eq!(source.name, "supervisord");
    assert_eq!(source.confidence.value(), 0.7);
    Ok(())
}

#[test]
fn test_custom_shell_set_from_config() -> Result<()> {
    let mut config = SourceConfig::default();
    config.shell.commands.push("nu".to_string());

    let chain = DetectorChain::from_config(&config)?;
    let source = chain.detect(&ancestry(&["nu"])).unwrap();
    assert_eq!(source.name, "nu");
    Ok(())
}

#[test]
fn test_reweighted_detector() -> Result<()> {
    let mut config = SourceConfig::default();
    config
        .weights
        .insert("shell".to_string(), Confidence::new(0.9)?);

    let chain = DetectorChain::from_config(&config)?;
    let source = chain.detect(&ancestry(&["fish"])).unwrap();
    assert_eq!(source.confidence.value(), 0.9);
    Ok(())
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SourceConfig::default();
    config.weights.remove("cron");

    let err = DetectorChain::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid source configuration"));
}

#[test]
fn test_detect_is_idempotent() {
    let chain = default_chain();
    let chain_input = ancestry(&["zsh", "tmux", "systemd"]);
    assert_eq!(chain.detect(&chain_input), chain.detect(&chain_input));
}
