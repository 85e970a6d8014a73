pub mod announcement;
pub mod motion;
pub mod threshold;
pub mod watched;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::entities::notification::Notification;
use crate::domain::entities::snapshot::DetectionSnapshot;
use crate::domain::value_objects::alert_rules::AlertRules;

/// What the evaluator remembers between cycles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorState {
    pub last_motion_state: bool,
    /// Class counts of the last processed snapshot. Replaced wholesale each
    /// cycle, so a class that disappears is forgotten.
    pub last_announced_counts: BTreeMap<String, u32>,
}

impl EvaluatorState {
    /// State after `snapshot` has been processed
    #[must_use]
    pub fn advance(&self, snapshot: &DetectionSnapshot) -> Self {
        Self {
            last_motion_state: snapshot.motion_detected,
            last_announced_counts: snapshot.classes.clone(),
        }
    }
}

/// Output of one evaluation: notifications to dispatch and the state to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub notifications: Vec<Notification>,
    pub next_state: EvaluatorState,
}

/// A deterministic rule comparing a snapshot with the previous state.
/// Rules are pure: snapshot + rules + state in, notifications out. No I/O.
pub trait Rule: Send + Sync {
    /// Returns the unique name of this rule
    fn name(&self) -> &'static str;

    /// Evaluates the rule against a snapshot and the state left by the previous cycle
    fn evaluate(
        &self,
        snapshot: &DetectionSnapshot,
        rules: &AlertRules,
        state: &EvaluatorState,
    ) -> Vec<Notification>;
}

/// Returns the default rules, in dispatch order
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(motion::MotionEdgeRule),
        Box::new(threshold::ObjectThresholdRule),
        Box::new(watched::WatchedClassRule),
        Box::new(announcement::ClassAnnouncementRule),
    ]
}

/// Engine that runs a collection of rules against detection snapshots
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Runs every rule in order against the same prior state, then advances
    /// the state. The input state is never mutated.
    #[must_use]
    pub fn evaluate(
        &self,
        rules: &AlertRules,
        state: &EvaluatorState,
        snapshot: &DetectionSnapshot,
    ) -> Evaluation {
        let notifications = self
            .rules
            .iter()
            .flat_map(|rule| {
                let raised = rule.evaluate(snapshot, rules, state);
                if !raised.is_empty() {
                    tracing::debug!(rule = rule.name(), count = raised.len(), "rule fired");
                }
                raised
            })
            .collect();
        Evaluation {
            notifications,
            next_state: state.advance(snapshot),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Session-wide evaluator: owns the alert rules and the state carried from
/// one cycle to the next.
pub struct AlertEvaluator {
    engine: RuleEngine,
    rules: AlertRules,
    state: Mutex<EvaluatorState>,
}

impl AlertEvaluator {
    #[must_use]
    pub fn new(engine: RuleEngine, rules: AlertRules) -> Self {
        Self {
            engine,
            rules,
            state: Mutex::new(EvaluatorState::default()),
        }
    }

    #[must_use]
    pub const fn rules(&self) -> &AlertRules {
        &self.rules
    }

    /// Copy of the current state
    #[must_use]
    pub fn state(&self) -> EvaluatorState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Evaluate `snapshot` and commit the next state
    pub fn process(&self, snapshot: &DetectionSnapshot) -> Vec<Notification> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let evaluation = self.engine.evaluate(&self.rules, &state, snapshot);
        *state = evaluation.next_state;
        evaluation.notifications
    }
}
