#![allow(clippy::expect_used)]

use std::time::Duration;

use chrono::Utc;
use lookout::application::config::AppConfig;
use lookout::domain::entities::banner::BannerBoard;
use lookout::domain::value_objects::alert_rules::AlertRules;
use lookout::domain::value_objects::severity::Severity;
use lookout::infrastructure::http::stats_client::HttpStatsSource;

const FULL_CONFIG: &str = r#"
[general]
endpoint = "http://camera.local:5000/"
poll_interval_ms = 750
request_timeout_ms = 1500
drop_stale_responses = false

[rules]
object_threshold = 3
watched_classes = ["person", "dog"]
motion_alert_enabled = false
voice_enabled = false

[speech]
command = "say"

[tone]
command = "paplay"
enabled = false

[banner]
ttl_ms = 2000

[notifications]
terminal = false
desktop = true
log_file = "~/lookout/alerts.log"
"#;

#[test]
fn full_config_file_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, FULL_CONFIG).expect("write config");

    let config = AppConfig::load_from(&path).expect("load");

    assert_eq!(config.general.poll_interval(), Duration::from_millis(750));
    assert_eq!(config.general.request_timeout(), Duration::from_millis(1500));
    assert!(!config.general.drop_stale_responses);
    assert_eq!(config.speech.command, "say");
    assert_eq!(config.tone.command, "paplay");
    assert!(!config.tone.enabled);
    assert!(!config.notifications.terminal);
    assert!(config.notifications.desktop);
    assert_eq!(
        config.notifications.log_file.as_deref(),
        Some("~/lookout/alerts.log")
    );

    let rules = AlertRules::from(&config.rules);
    assert_eq!(rules.object_threshold, 3);
    assert_eq!(
        rules.watched_classes.iter().collect::<Vec<_>>(),
        vec!["dog", "person"]
    );
    assert!(!rules.motion_alert_enabled);
    assert!(!rules.voice_enabled);
}

#[test]
fn endpoint_resolves_to_stats_url() {
    let config: AppConfig = toml::from_str(FULL_CONFIG).expect("parse");
    let source = HttpStatsSource::new(&config.general.endpoint, config.general.request_timeout())
        .expect("client");
    assert_eq!(source.url(), "http://camera.local:5000/detection_stats");
}

#[test]
fn banner_ttl_from_config_drives_expiry() {
    let config: AppConfig = toml::from_str(FULL_CONFIG).expect("parse");
    let board = BannerBoard::with_ttl_ms(config.banner.ttl_ms);
    let now = Utc::now();
    board.raise("High object count: 4 objects detected", Severity::Danger, now);

    assert_eq!(board.active(now + chrono::Duration::milliseconds(1_999)).len(), 1);
    assert!(board.active(now + chrono::Duration::milliseconds(2_000)).is_empty());
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let config = AppConfig::load_or_create(&path).expect("load_or_create");
    assert!(path.exists());
    assert_eq!(config.general.poll_interval(), Duration::from_millis(500));
    assert_eq!(AlertRules::from(&config.rules), AlertRules::default());

    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.contains("[general]"));
    assert!(written.contains("poll_interval_ms = 500"));
}
