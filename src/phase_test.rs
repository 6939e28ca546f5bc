use super::*;
use crate::fixtures::Preset;

#[test]
fn default_is_idle() {
    assert!(Phase::default().is_idle());
    assert_eq!(Phase::default().critical(), None);
}

#[test]
fn active_phases_expose_critical() {
    let critical = Preset::new().critical();
    let collecting = Phase::Collecting { critical: critical.clone() };
    assert!(!collecting.is_idle());
    assert_eq!(collecting.critical(), Some(&critical));
}

#[test]
fn collecting_moves_to_watching_with_same_critical() {
    let critical = Preset::new().critical();
    let phase = Phase::Collecting { critical: critical.clone() }.into_watching();
    assert_eq!(phase, Phase::Watching { critical });
}

#[test]
fn watching_stays_watching() {
    let critical = Preset::new().critical();
    let phase = Phase::Watching { critical: critical.clone() }.into_watching();
    assert_eq!(phase, Phase::Watching { critical });
}

#[test]
fn idle_does_not_move_to_watching() {
    assert_eq!(Phase::Idle.into_watching(), Phase::Idle);
}

#[test]
fn display_names() {
    let critical = Preset::new().critical();
    assert_eq!(Phase::Idle.to_string(), "idle");
    assert_eq!(Phase::Collecting { critical: critical.clone() }.to_string(), "collecting");
    assert_eq!(Phase::Watching { critical }.to_string(), "watching");
}
