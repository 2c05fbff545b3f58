//! Backend entry-point: wires the REST API, database pool, and OpenAPI docs.

mod server;

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use clap::Parser;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use kavamap::domain::checkin::DEFAULT_CHECK_IN_POINTS;
use kavamap::inbound::http::HealthState;
use kavamap::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(Parser, Debug)]
#[command(name = "kavamap", about = "Kava bar discovery and check-in API server")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// Path to the session signing key material.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    session_key_file: String,

    /// Set the `Secure` flag on session cookies.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    session_cookie_secure: bool,

    /// Points awarded per check-in.
    #[arg(long, env = "CHECK_IN_POINTS", default_value_t = DEFAULT_CHECK_IN_POINTS)]
    check_in_points: i32,
}

fn load_session_key(path: &str) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev =
                std::env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {path}: {e}"
                )))
            }
        }
    }
}

async fn run_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        Ok::<_, std::io::Error>(())
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task panicked: {e}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let key = load_session_key(&args.session_key_file)?;

    run_migrations(args.database_url.clone()).await?;
    info!("migrations applied");

    let pool = DbPool::new(PoolConfig::new(&args.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("pool construction failed: {e}")))?;

    let config = ServerConfig::new(
        key,
        args.session_cookie_secure,
        SameSite::Lax,
        args.bind_addr,
        pool,
    )
    .with_check_in_points(args.check_in_points);

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(
        PrometheusMetricsBuilder::new("kavamap")
            .endpoint("/metrics")
            .build()
            .map_err(|e| std::io::Error::other(format!("metrics setup failed: {e}")))?,
    ));

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting server");
    let server = server::create_server(health_state, config)?;
    server.await
}
