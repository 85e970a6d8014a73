#![allow(clippy::expect_used)]

use lookout::domain::entities::dashboard_view::{DashboardView, MotionBadge};
use lookout::domain::entities::notification::Notification;
use lookout::domain::entities::snapshot::DetectionSnapshot;
use lookout::domain::rules::{AlertEvaluator, EvaluatorState, RuleEngine};
use lookout::domain::value_objects::alert_rules::AlertRules;
use lookout::domain::value_objects::severity::Severity;
use lookout::infrastructure::http::stats_client::parse_snapshot;

fn load_fixture(name: &str) -> DetectionSnapshot {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    parse_snapshot(&json).expect("Failed to parse fixture")
}

fn evaluator() -> AlertEvaluator {
    AlertEvaluator::new(RuleEngine::default(), AlertRules::default())
}

fn banners(notifications: &[Notification]) -> Vec<&Notification> {
    notifications
        .iter()
        .filter(|n| matches!(n, Notification::Banner { .. }))
        .collect()
}

#[test]
fn partial_payload_decodes_with_defaults() {
    let snapshot = load_fixture("partial.json");
    assert_eq!(snapshot.total, 1);
    assert!(snapshot.classes.is_empty());
    assert!(!snapshot.motion_detected);
}

#[test]
fn busy_street_raises_everything_in_order() {
    let evaluator = evaluator();
    let notifications = evaluator.process(&load_fixture("busy_street.json"));

    assert_eq!(
        notifications,
        vec![
            Notification::speech("Motion detected"),
            Notification::banner("High object count: 10 objects detected", Severity::Danger),
            Notification::speech("Detected: 1 bicycle, 3 cars, 6 persons"),
        ]
    );
}

#[test]
fn repeated_counts_are_not_announced_again() {
    let evaluator = evaluator();

    let first = evaluator.process(&load_fixture("two_dogs.json"));
    assert_eq!(first, vec![Notification::speech("Detected: 2 dogs")]);

    let second = evaluator.process(&load_fixture("two_dogs.json"));
    assert!(second.is_empty());

    let third = evaluator.process(&load_fixture("three_dogs.json"));
    assert_eq!(
        third,
        vec![
            Notification::speech("Motion detected"),
            Notification::speech("Detected: 3 dogs"),
        ]
    );
}

#[test]
fn motion_fires_only_on_rising_edge() {
    let evaluator = evaluator();
    let motion = |n: &[Notification]| n.contains(&Notification::speech("Motion detected"));

    assert!(!motion(&evaluator.process(&load_fixture("quiet.json"))));
    assert!(motion(&evaluator.process(&load_fixture("three_dogs.json"))));
    assert!(!motion(&evaluator.process(&load_fixture("busy_street.json"))));
    assert!(!motion(&evaluator.process(&load_fixture("quiet.json"))));
    assert!(motion(&evaluator.process(&load_fixture("busy_street.json"))));
}

#[test]
fn threshold_banner_repeats_every_cycle() {
    let evaluator = evaluator();
    for _ in 0..3 {
        let notifications = evaluator.process(&load_fixture("busy_street.json"));
        let raised = banners(&notifications);
        assert_eq!(raised.len(), 1);
        assert_eq!(
            raised[0],
            &Notification::banner("High object count: 10 objects detected", Severity::Danger)
        );
    }
}

#[test]
fn threshold_is_strictly_greater_than() {
    let rules = AlertRules {
        object_threshold: 10,
        ..AlertRules::default()
    };
    let evaluator = AlertEvaluator::new(RuleEngine::default(), rules);
    let notifications = evaluator.process(&load_fixture("busy_street.json"));
    assert!(banners(&notifications).is_empty());
}

#[test]
fn motion_alert_can_be_disabled() {
    let rules = AlertRules {
        motion_alert_enabled: false,
        ..AlertRules::default()
    };
    let evaluator = AlertEvaluator::new(RuleEngine::default(), rules);
    let notifications = evaluator.process(&load_fixture("busy_street.json"));
    assert!(!notifications.contains(&Notification::speech("Motion detected")));
}

#[test]
fn announced_counts_replaced_not_merged() {
    let evaluator = evaluator();
    evaluator.process(&load_fixture("busy_street.json"));
    evaluator.process(&load_fixture("two_dogs.json"));

    let state = evaluator.state();
    assert_eq!(state.last_announced_counts.len(), 1);
    assert_eq!(state.last_announced_counts.get("dog"), Some(&2));

    // "person" dropped out of the map, so it counts as new again
    let again = evaluator.process(&load_fixture("busy_street.json"));
    assert!(again.contains(&Notification::speech("Detected: 1 bicycle, 3 cars, 6 persons")));
}

#[test]
fn pure_evaluation_does_not_touch_input_state() {
    let engine = RuleEngine::default();
    let rules = AlertRules::default();
    let state = EvaluatorState::default();

    let evaluation = engine.evaluate(&rules, &state, &load_fixture("three_dogs.json"));

    assert_eq!(state, EvaluatorState::default());
    assert!(evaluation.next_state.last_motion_state);
    assert_eq!(evaluation.next_state.last_announced_counts.get("dog"), Some(&3));
}

#[test]
fn view_projection_matches_fixture() {
    let view = DashboardView::project(&load_fixture("busy_street.json"));
    assert_eq!(view.total, 10);
    assert_eq!(view.motion, MotionBadge::Active);
    let classes: Vec<&str> = view.rows.iter().map(|r| r.class.as_str()).collect();
    assert_eq!(classes, vec!["bicycle", "car", "person"]);

    let empty = DashboardView::project(&load_fixture("quiet.json"));
    assert_eq!(empty.total, 0);
    assert!(empty.rows.is_empty());
    assert_eq!(empty.motion, MotionBadge::Inactive);
}
