use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use lookout::application::config::AppConfig;
use lookout::application::services::poller::PollerService;
use lookout::domain::entities::banner::BannerBoard;
use lookout::domain::ports::notifier::{Notifier, TonePlayer};
use lookout::domain::ports::source::StatsSource;
use lookout::domain::ports::view::ViewSink;
use lookout::domain::rules::{AlertEvaluator, RuleEngine};
use lookout::domain::value_objects::alert_rules::AlertRules;
use lookout::infrastructure::http::stats_client::HttpStatsSource;
use lookout::infrastructure::notifications::banner::{BannerNotifier, SilentTonePlayer};
use lookout::infrastructure::notifications::composite::CompositeNotifier;
use lookout::infrastructure::notifications::desktop::DesktopNotifier;
use lookout::infrastructure::notifications::log_file::LogFileNotifier;
use lookout::infrastructure::notifications::speech::SpeechNotifier;
use lookout::infrastructure::notifications::terminal::TerminalNotifier;
use lookout::infrastructure::notifications::tone::CommandTonePlayer;
use lookout::infrastructure::scheduler::TokioScheduler;
use lookout::presentation::cli::app::{Cli, Commands};
use lookout::presentation::cli::commands::daemon::{run_daemon, LoggingViewSink};
use lookout::presentation::cli::commands::status::run_status;
use lookout::presentation::tui::app::run_tui;
use lookout::presentation::tui::view_state::TuiViewState;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  LOOKOUT — Detection Monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

/// Logs go to stderr, except under the dashboard where they would tear the
/// screen: there they are appended to `<data dir>/lookout/lookout.log`.
fn setup_tracing(verbose: bool, dashboard: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if dashboard {
        let log_file = dirs::data_local_dir()
            .map(|dir| dir.join("lookout"))
            .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|()| dir))
            .and_then(|dir| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(dir.join("lookout.log"))
                    .ok()
            });
        match log_file {
            Some(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            None => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init(),
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Speech, banner (with tone) and whichever extra channels the config enables
fn build_notifier(
    config: &AppConfig,
    board: Arc<BannerBoard>,
    terminal: bool,
) -> Arc<dyn Notifier> {
    let tone: Arc<dyn TonePlayer> = if config.tone.enabled {
        Arc::new(CommandTonePlayer::aplay(&config.tone.command))
    } else {
        Arc::new(SilentTonePlayer)
    };

    let mut notifiers: Vec<Box<dyn Notifier>> = vec![
        Box::new(SpeechNotifier::espeak(
            &config.speech.command,
            config.rules.voice_enabled,
        )),
        Box::new(BannerNotifier::new(board, tone)),
    ];
    if terminal && config.notifications.terminal {
        notifiers.push(Box::new(TerminalNotifier::new()));
    }
    if config.notifications.desktop {
        notifiers.push(Box::new(DesktopNotifier::new()));
    }
    if let Some(ref path) = config.notifications.log_file {
        notifiers.push(Box::new(LogFileNotifier::new(path)));
    }
    let composite = CompositeNotifier::new(notifiers);
    tracing::debug!("{} notification sink(s) configured", composite.len());
    Arc::new(composite)
}

fn build_poller(
    config: &AppConfig,
    source: Arc<dyn StatsSource>,
    rules: AlertRules,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn ViewSink>,
) -> Arc<PollerService> {
    let evaluator = AlertEvaluator::new(RuleEngine::default(), rules);
    Arc::new(
        PollerService::new(source, evaluator, notifier, view)
            .with_stale_drop(config.general.drop_stale_responses),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let dashboard = matches!(cli.command, None | Some(Commands::Watch { .. }));
    setup_tracing(cli.verbose, dashboard);

    // Load configuration
    let mut config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };
    if let Some(ref endpoint) = cli.endpoint {
        config.general.endpoint.clone_from(endpoint);
    }
    if let Some(interval_ms) = cli.interval_override() {
        config.general.poll_interval_ms = interval_ms;
    }

    // Manual DI: main.rs is the only place that knows concrete types
    let source: Arc<dyn StatsSource> = Arc::new(HttpStatsSource::new(
        &config.general.endpoint,
        config.general.request_timeout(),
    )?);
    let rules = AlertRules::from(&config.rules);
    let interval = config.general.poll_interval();

    match cli.command {
        Some(Commands::Status { json }) => {
            run_status(&*source, &rules, json).await?;
        }
        Some(Commands::Daemon { .. }) => {
            print_banner();
            tracing::info!("Endpoint: {}", config.general.endpoint);
            let board = Arc::new(BannerBoard::with_ttl_ms(config.banner.ttl_ms));
            let notifier = build_notifier(&config, board, true);
            let service = build_poller(&config, source, rules, notifier, Arc::new(LoggingViewSink));
            run_daemon(service, interval).await?;
        }
        Some(Commands::Watch { .. }) | None => {
            let threshold = rules.object_threshold;
            let board = Arc::new(BannerBoard::with_ttl_ms(config.banner.ttl_ms));
            let view_state = Arc::new(TuiViewState::new());
            let notifier = build_notifier(&config, Arc::clone(&board), false);
            let service = build_poller(
                &config,
                source,
                rules,
                notifier,
                Arc::clone(&view_state) as Arc<dyn ViewSink>,
            );

            let scheduler = TokioScheduler::new();
            service.start(&scheduler, interval);

            let result = tokio::task::spawn_blocking(move || run_tui(view_state, board, threshold))
                .await
                .context("Dashboard task panicked")?;
            scheduler.shutdown();
            result?;
        }
    }

    Ok(())
}
