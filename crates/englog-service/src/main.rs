//! # Englog Service
//!
//! Binary entry point for the Slack-to-Jira work-log bridge.
//!
//! This executable:
//! - Loads configuration from files and the environment
//! - Initializes logging from the configuration
//! - Wires the Slack and Jira clients into the work-log pipeline
//! - Starts the HTTP server from englog-api

use std::sync::Arc;

use englog_api::{
    start_server, DefaultHealthChecker, LoggingConfig, ServiceConfig, ServiceError,
};
use englog_core::{
    CommentPoster, InMemoryResolutionCache, JiraTicketTracker, SlackActorDirectory, SlackNotifier,
    TicketResolver, WorkLogPipeline,
};
use jira_client::{JiraClient, JiraClientConfig, JiraCredentials};
use slack_bot_sdk::{SlackClient, SlackClientConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration shapes the logging subscriber, so it loads first;
    // failures here can only go to stderr.
    let service_config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("englog-service: configuration error: {e}");
            std::process::exit(3);
        }
    };

    init_logging(&service_config.logging);

    info!("Starting englog service");

    let (pipeline, slack) = match build_pipeline(&service_config) {
        Ok(parts) => parts,
        Err(e) => {
            error!(error = %e, "Failed to construct platform clients; aborting");
            std::process::exit(3);
        }
    };

    let health_checker = Arc::new(DefaultHealthChecker);

    info!(
        host = %service_config.server.host,
        port = service_config.server.port,
        tracker = %service_config.tracker.base_url,
        project = %service_config.tracker.project_key,
        period = ?service_config.resolver.period,
        "Starting HTTP server"
    );

    if let Err(e) = start_server(service_config, pipeline, slack, health_checker).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
            ServiceError::Configuration(_) => 3,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}

// ============================================================================
// Private helpers
// ============================================================================

/// Load and validate the service configuration.
///
/// Sources (applied in order — later sources override earlier ones):
///  1. /etc/englog/service.yaml          — system-wide defaults
///  2. ./config/service.yaml             — deployment-local override
///  3. Path given by ENGLOG_CONFIG_FILE  — operator-specified file
///  4. Environment variables prefixed ENGLOG__ (double-underscore separator)
///     e.g. ENGLOG__SERVER__PORT=9090 sets server.port = 9090
///  5. Well-known flat variables (SLACK_BOT_TOKEN, JIRA_BASE_URL, ...)
///
/// All configuration fields carry serde defaults, so absent files or an
/// entirely unconfigured environment still deserialize; validation then
/// decides whether the result is runnable. A malformed file or a variable
/// that cannot be coerced to the right type IS a hard error because it
/// indicates deliberate-but-broken operator configuration.
fn load_configuration() -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut builder = config::Config::builder()
        .add_source(
            config::File::with_name("/etc/englog/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("ENGLOG_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            builder = builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let raw = builder
        .add_source(config::Environment::with_prefix("ENGLOG").separator("__"))
        .build()?;

    let mut service_config: ServiceConfig = raw.try_deserialize()?;
    service_config.apply_well_known_env()?;
    service_config.validate()?;

    Ok(service_config)
}

/// Initialize the tracing subscriber from the logging configuration.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to this
/// service's own crates while the HTTP layer stays at debug.
fn init_logging(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "englog_service={level},englog_api={level},englog_core={level},\
             slack_bot_sdk={level},jira_client={level},tower_http=debug",
            level = logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wire the work-log pipeline from validated configuration.
///
/// Both platform clients share nothing; the Jira-backed tracker is shared
/// between the resolver and the comment poster so both talk to the same
/// project.
fn build_pipeline(
    config: &ServiceConfig,
) -> Result<(Arc<WorkLogPipeline>, SlackClient), Box<dyn std::error::Error>> {
    let slack = SlackClient::new(
        config.slack.bot_token.clone(),
        SlackClientConfig::default(),
    )?;
    let jira = JiraClient::new(
        config.tracker.base_url.clone(),
        JiraCredentials::new(
            config.tracker.email.clone(),
            config.tracker.api_token.clone(),
        ),
        JiraClientConfig::default(),
    )?;

    let tracker = Arc::new(JiraTicketTracker::new(
        jira,
        config.tracker.project_key.clone(),
    ));
    let resolver = TicketResolver::new(
        tracker.clone(),
        Arc::new(InMemoryResolutionCache::new()),
        config.resolver.period,
    );
    let poster = CommentPoster::new(tracker);

    let pipeline = Arc::new(WorkLogPipeline::new(
        Arc::new(SlackActorDirectory::new(slack.clone())),
        resolver,
        poster,
        Arc::new(SlackNotifier::new(slack.clone())),
    ));

    Ok((pipeline, slack))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
