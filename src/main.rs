use anyhow::Result;
use clap::{Parser, Subcommand};
use frame_admin::{
    application::{
        commands::users::CreateUserCommand,
        events::{EventDispatcher, ListenerRegistry, LogMessageListener},
        ports::events::EventPublisher,
        queries::reports::ReportLayout,
        services::{ApplicationServices, ServiceDependencies},
    },
    apps,
    config::AppConfig,
    domain::log_message::LogMessageRepository,
    infrastructure::{
        database,
        events::{EventWorker, NoopEventPublisher},
        reports::TextReportRenderer,
        repositories::{
            SqliteConfigurationRepository, SqliteLogMessageRepository, SqliteRecordRepository,
            SqliteUserRepository,
        },
        security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
        time::SystemClock,
        util::DefaultSlugGenerator,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "frame_admin", version, about = "Configuration-driven admin service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Create missing configuration rows for every registered model.
    SyncConfig,
    /// Create a superuser account.
    CreateSuperuser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Comma separated group names to join.
        #[arg(long, value_delimiter = ',')]
        groups: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = bootstrap(cli).await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

struct Runtime {
    services: Arc<ApplicationServices>,
    worker: Option<JoinHandle<()>>,
}

async fn bootstrap(cli: Cli) -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let runtime = assemble(&config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, runtime).await,
        Command::SyncConfig => {
            let report = runtime.services.config_commands.sync().await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::CreateSuperuser {
            username,
            password,
            groups,
        } => {
            runtime.services.config_commands.sync().await?;
            let user = runtime
                .services
                .user_commands
                .create_user(CreateUserCommand {
                    username,
                    password,
                    is_superuser: true,
                    groups,
                })
                .await?;
            println!("created superuser {} (id {})", user.username, user.id);
            Ok(())
        }
    }
}

async fn assemble(config: &AppConfig) -> Result<Runtime> {
    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let registry = Arc::new(apps::registry()?);
    let configuration_repo = Arc::new(SqliteConfigurationRepository::new(pool.clone()));
    let record_repo = SqliteRecordRepository::new(pool.clone());
    let log_repo: Arc<dyn LogMessageRepository> =
        Arc::new(SqliteLogMessageRepository::new(record_repo.clone()));

    let (publisher, worker) = if config.events_enabled() {
        let listeners = ListenerRegistry::builder()
            .subscribe_all(Arc::new(LogMessageListener::new(Arc::clone(&log_repo))))
            .build();
        let dispatcher = EventDispatcher::new(Arc::new(listeners));
        let (worker, publisher) = EventWorker::new(dispatcher, config.event_buffer_size());
        (
            Arc::new(publisher) as Arc<dyn EventPublisher>,
            Some(worker.spawn()),
        )
    } else {
        info!("entity events disabled");
        (Arc::new(NoopEventPublisher) as Arc<dyn EventPublisher>, None)
    };

    let token_manager =
        BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;

    let services = Arc::new(ApplicationServices::new(ServiceDependencies {
        registry,
        user_repo: Arc::new(SqliteUserRepository::new(pool.clone())),
        config_read_repo: configuration_repo.clone(),
        config_write_repo: configuration_repo,
        record_repo: Arc::new(record_repo),
        log_repo,
        password_hasher: Arc::new(Argon2PasswordHasher),
        token_manager: Arc::new(token_manager),
        publisher,
        renderer: Arc::new(TextReportRenderer::default()),
        clock: Arc::new(SystemClock),
        slugger: Arc::new(DefaultSlugGenerator),
        page_size: config.page_size(),
        report_layout: ReportLayout {
            rows_portrait: config.report_rows_portrait(),
            rows_landscape: config.report_rows_landscape(),
        },
    }));

    Ok(Runtime { services, worker })
}

async fn serve(config: &AppConfig, runtime: Runtime) -> Result<()> {
    let Runtime { services, worker } = runtime;

    let report = services.config_commands.sync().await?;
    if !report.is_empty() {
        info!(
            apps = report.apps_added.len(),
            models = report.models_added.len(),
            fields = report.fields_added.len(),
            "configuration synced on startup"
        );
    }

    let app = build_router(HttpState { services }, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last publisher; the worker drains what is queued and exits.
    if let Some(worker) = worker {
        if tokio::time::timeout(Duration::from_secs(5), worker).await.is_err() {
            warn!("event worker did not drain before shutdown");
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
