//! Router assembly and server lifecycle.
//!
//! # Responsibility
//! - Map the task board HTTP surface onto `api` handlers.
//! - Apply CORS for the configured front-end origin on every route.
//! - Migrate the database once at startup, then serve until ctrl-c.

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::time::Instant;
use taskboard_core::db::{open_db, DbError};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Errors that stop the server from starting or serving.
#[derive(Debug)]
pub enum ServerError {
    /// Configured CORS origin is not a valid header value.
    InvalidOrigin(String),
    /// Startup migration failed.
    Db(DbError),
    /// Bind or serve failed.
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrigin(origin) => write!(f, "invalid allowed origin `{origin}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidOrigin(_) => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Builds the CORS layer for exactly one allowed origin.
///
/// Other origins get no `access-control-allow-origin` header at all.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ServerError> {
    let origin = HeaderValue::from_str(allowed_origin.trim())
        .map_err(|_| ServerError::InvalidOrigin(allowed_origin.to_string()))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}

/// Builds the full application router.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/register", post(api::register))
        .route("/auth/login", post(api::login))
        .route("/boards", get(api::list_boards).post(api::create_board))
        .route(
            "/boards/:id",
            put(api::update_board).delete(api::delete_board),
        )
        .route(
            "/boards/:id/lists",
            get(api::list_lists).post(api::create_list),
        )
        .route("/lists/:id", put(api::update_list).delete(api::delete_list))
        .route(
            "/lists/:id/cards",
            get(api::list_cards).post(api::create_card),
        )
        .route("/cards/:id", put(api::update_card).delete(api::delete_card))
        .route("/cards/:id/move", put(api::move_card))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

/// Migrates the database, binds, and serves until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let cors = cors_layer(&config.allowed_origin)?;

    // Fail fast on an unusable or newer-than-supported database file.
    drop(open_db(&config.db_path)?);

    let app = router(AppState::new(config.db_path.clone()), cors);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={} allowed_origin={}",
        config.bind,
        config.db_path.display(),
        config.allowed_origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

/// Resolves once `signal` fires. A failed signal handler never resolves.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!("event=server_signal module=server status=error error={err}");
        // Without a handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let code = response.status();
    let status = if code.is_server_error() {
        "error"
    } else {
        "ok"
    };
    info!(
        "event=http_request module=server status={} method={} path={} code={} duration_ms={}",
        status,
        method,
        path,
        code.as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::shutdown_signal;
    use std::time::Duration;

    #[tokio::test]
    async fn shutdown_resolves_when_signal_fires() {
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            shutdown_signal(async { Ok::<(), std::io::Error>(()) }),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failed_signal_handler_keeps_server_running() {
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            shutdown_signal(async { Err::<(), _>(std::io::Error::other("no signal support")) }),
        )
        .await;
        assert!(result.is_err());
    }
}
