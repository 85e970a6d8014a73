#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use lookout::application::services::poller::PollerService;
use lookout::domain::entities::banner::BannerBoard;
use lookout::domain::entities::notification::Notification;
use lookout::domain::entities::snapshot::DetectionSnapshot;
use lookout::domain::ports::notifier::{NotificationError, Notifier, TonePlayer};
use lookout::domain::ports::source::{FetchError, StatsSource};
use lookout::domain::rules::{AlertEvaluator, RuleEngine};
use lookout::domain::value_objects::alert_rules::AlertRules;
use lookout::domain::value_objects::severity::Severity;
use lookout::domain::value_objects::tone::Tone;
use lookout::infrastructure::http::stats_client::parse_snapshot;
use lookout::infrastructure::notifications::banner::BannerNotifier;
use lookout::infrastructure::notifications::composite::CompositeNotifier;
use lookout::infrastructure::scheduler::ManualScheduler;
use lookout::presentation::tui::view_state::TuiViewState;

fn load_fixture(name: &str) -> DetectionSnapshot {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    parse_snapshot(&json).expect("Failed to parse fixture")
}

/// Replays a fixed script of responses, one per fetch
struct ScriptedSource {
    script: Mutex<VecDeque<Result<DetectionSnapshot, FetchError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<DetectionSnapshot, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    async fn fetch(&self) -> Result<DetectionSnapshot, FetchError> {
        self.script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("script exhausted".into())))
    }
}

#[derive(Default)]
struct RecordingTones {
    played: Mutex<Vec<Tone>>,
}

impl TonePlayer for RecordingTones {
    fn play(&self, tone: Tone) -> Result<(), NotificationError> {
        self.played.lock().expect("lock").push(tone);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSpeech {
    spoken: Mutex<Vec<String>>,
}

impl Notifier for RecordingSpeech {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        if let Notification::Speech { text } = notification {
            self.spoken.lock().expect("lock").push(text.clone());
        }
        Ok(())
    }
}

/// Forwards to a shared recorder so the test keeps a handle on it
struct Shared<T>(Arc<T>);

impl<T: Notifier> Notifier for Shared<T> {
    fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.0.notify(notification)
    }
}

struct Harness {
    service: Arc<PollerService>,
    board: Arc<BannerBoard>,
    tones: Arc<RecordingTones>,
    speech: Arc<RecordingSpeech>,
    view: Arc<TuiViewState>,
}

fn harness(script: Vec<Result<DetectionSnapshot, FetchError>>) -> Harness {
    let board = Arc::new(BannerBoard::default());
    let tones = Arc::new(RecordingTones::default());
    let speech = Arc::new(RecordingSpeech::default());
    let view = Arc::new(TuiViewState::new());

    let notifier = CompositeNotifier::new(vec![
        Box::new(Shared(Arc::clone(&speech))),
        Box::new(BannerNotifier::new(
            Arc::clone(&board),
            Arc::clone(&tones) as Arc<dyn TonePlayer>,
        )),
    ]);

    let service = Arc::new(PollerService::new(
        Arc::new(ScriptedSource::new(script)),
        AlertEvaluator::new(RuleEngine::default(), AlertRules::default()),
        Arc::new(notifier),
        Arc::clone(&view) as Arc<dyn lookout::domain::ports::view::ViewSink>,
    ));

    Harness {
        service,
        board,
        tones,
        speech,
        view,
    }
}

#[tokio::test]
async fn start_registers_one_task_at_the_poll_interval() {
    let h = harness(vec![]);
    let scheduler = ManualScheduler::new();

    h.service.start(&scheduler, Duration::from_millis(500));

    assert_eq!(scheduler.task_count(), 1);
    assert_eq!(scheduler.intervals(), vec![Duration::from_millis(500)]);
}

#[tokio::test]
async fn over_threshold_cycle_raises_one_danger_banner_and_one_high_tone() {
    let h = harness(vec![Ok(load_fixture("busy_street.json"))]);
    let scheduler = ManualScheduler::new();
    h.service.start(&scheduler, Duration::from_millis(500));

    scheduler.tick().await;

    let banners = h.board.active(Utc::now());
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].severity, Severity::Danger);
    assert_eq!(banners[0].message, "High object count: 10 objects detected");

    let tones = h.tones.played.lock().expect("lock");
    assert_eq!(tones.len(), 1);
    assert_eq!(tones[0].frequency_hz, 800);
    assert_eq!(tones[0].duration, Duration::from_millis(200));
}

#[tokio::test]
async fn each_cycle_over_threshold_raises_its_own_banner() {
    let h = harness(vec![
        Ok(load_fixture("busy_street.json")),
        Ok(load_fixture("busy_street.json")),
    ]);
    let scheduler = ManualScheduler::new();
    h.service.start(&scheduler, Duration::from_millis(500));

    scheduler.tick().await;
    scheduler.tick().await;

    assert_eq!(h.board.active(Utc::now()).len(), 2);
    assert_eq!(h.tones.played.lock().expect("lock").len(), 2);
}

#[tokio::test]
async fn failed_fetch_leaves_state_and_view_unchanged() {
    let h = harness(vec![
        Ok(load_fixture("two_dogs.json")),
        Err(FetchError::Network("connection refused".into())),
        Err(FetchError::Parse("expected value at line 1".into())),
    ]);
    let scheduler = ManualScheduler::new();
    h.service.start(&scheduler, Duration::from_millis(500));

    scheduler.tick().await;
    let state_before = h.service.evaluator().state();
    let (view_before, rendered_at) = h.view.latest().expect("first view");

    scheduler.tick().await;
    scheduler.tick().await;

    assert_eq!(h.service.evaluator().state(), state_before);
    let (view_after, rendered_after) = h.view.latest().expect("view kept");
    assert_eq!(view_after, view_before);
    assert_eq!(rendered_after, rendered_at);
    assert_eq!(
        h.speech.spoken.lock().expect("lock").as_slice(),
        ["Detected: 2 dogs".to_string()]
    );
}

#[tokio::test]
async fn polling_recovers_after_failure() {
    let h = harness(vec![
        Err(FetchError::Status(503)),
        Ok(load_fixture("three_dogs.json")),
    ]);
    let scheduler = ManualScheduler::new();
    h.service.start(&scheduler, Duration::from_millis(500));

    scheduler.tick().await;
    assert!(h.view.latest().is_none());

    scheduler.tick().await;
    let (view, _) = h.view.latest().expect("view after recovery");
    assert_eq!(view.total, 3);
    assert_eq!(
        h.speech.spoken.lock().expect("lock").as_slice(),
        ["Motion detected".to_string(), "Detected: 3 dogs".to_string()]
    );
}

#[tokio::test]
async fn dog_sequence_announces_only_increase() {
    let h = harness(vec![
        Ok(load_fixture("two_dogs.json")),
        Ok(load_fixture("two_dogs.json")),
        Ok(load_fixture("three_dogs.json")),
    ]);

    for _ in 0..3 {
        h.service.run_once().await.expect("cycle");
    }

    let spoken = h.speech.spoken.lock().expect("lock");
    let announcements: Vec<&String> = spoken.iter().filter(|t| t.starts_with("Detected")).collect();
    assert_eq!(announcements, vec!["Detected: 2 dogs", "Detected: 3 dogs"]);
}
