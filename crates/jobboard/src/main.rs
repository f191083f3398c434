//! Job Board - recruiters post jobs, jobseekers find and apply to them

use anyhow::Result;
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod seed;

use config::{Config, LogFormat};
use jobboard_api::{AppState, RouterOptions, create_router};
use jobboard_auth::{JwtManager, hash_password};
use jobboard_db::{Database, NewUser, UserRole, UserType};

/// Job Board API server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    config: String,

    /// Bind address
    #[arg(long, env = "JOBBOARD_BIND", global = true)]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "JOBBOARD_PORT", global = true)]
    port: Option<u16>,

    /// Token signing secret
    #[arg(long, env = "JOBBOARD_JWT_SECRET", global = true, hide_env_values = true)]
    jwt_secret: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace all data with the sample users and jobs
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(secret) = args.jwt_secret {
        config.auth.jwt_secret = secret;
    }
    config.validate()?;

    init_logging(&config.logging.level, config.logging.format);

    let db = open_database(&config).await?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await,
        Command::Seed => seed::seed(&db).await,
    }
}

/// Initialize logging
fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Connect to the database, creating its directory first
async fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = Path::new(&config.database.path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    Ok(Database::new(&config.database.url()).await?)
}

/// Create the configured admin account on an empty database
async fn bootstrap_admin(config: &Config, db: &Database) -> Result<()> {
    let Some((email, password)) = config.auth.bootstrap_admin() else {
        return Ok(());
    };
    if db.has_users().await? {
        return Ok(());
    }

    info!("Creating bootstrap admin user");
    let admin = db
        .insert_user(NewUser {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role: UserRole::Admin,
            user_type: UserType::Recruiter,
        })
        .await?;
    info!("Bootstrap admin created (email: {})", admin.email);
    Ok(())
}

async fn serve(config: Config, db: Database) -> Result<()> {
    info!("Starting Job Board v{}", env!("CARGO_PKG_VERSION"));

    bootstrap_admin(&config, &db).await?;

    if config.auth.uses_default_secret() {
        warn!("Using the default JWT secret; set auth.jwt_secret or JOBBOARD_JWT_SECRET");
    }
    let jwt = Arc::new(JwtManager::new(
        &config.auth.jwt_secret,
        config.auth.token_expiry_hours,
    ));

    let metrics_handle = if config.metrics.enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        info!("Prometheus metrics exposed at /metrics");
        Some(Arc::new(handle))
    } else {
        None
    };

    let state = AppState::new(db, jwt);
    let options = RouterOptions {
        metrics_handle,
        static_dir: config.server.static_dir.as_deref().map(Path::new),
    };
    let app = create_router(state, options).layer(TraceLayer::new_for_http());

    let addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
