use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use shared::jwt::{JwtError, TokenService};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{admin, auth, courts, health, reservations};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Built once from the configured secret; immutable for the process lifetime.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Result<Self, JwtError> {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs)?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        // Development default: any origin
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let state = AppState::new(config, pool)?;
    Ok(create_router(state))
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth", post(auth::register))
        .route("/api/v1/auth/token", post(auth::login))
        .route("/api/v1/courts", get(courts::list_courts))
        .route("/api/v1/courts/:court_id", get(courts::get_court))
        .route(
            "/api/v1/courts/:court_id/schedules",
            get(courts::list_court_schedules),
        );

    // Authenticated routes (Auth extractor in each handler)
    let user_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .route(
            "/api/v1/schedules/:schedule_id/reservations",
            post(reservations::book_schedule),
        )
        .route("/api/v1/reservations", get(reservations::list_my_reservations))
        .route(
            "/api/v1/reservations/:reservation_id",
            delete(reservations::cancel_reservation),
        );

    // Admin routes (Admin extractor in each handler)
    let admin_routes = Router::new()
        .route("/api/v1/admin/courts", post(courts::create_court))
        .route(
            "/api/v1/admin/courts/:court_id",
            put(courts::update_court).delete(courts::delete_court),
        )
        .route(
            "/api/v1/admin/courts/:court_id/schedules",
            post(courts::create_schedule),
        )
        .route(
            "/api/v1/admin/courts/:court_id/schedules/batch",
            post(courts::create_schedule_batch),
        )
        .route(
            "/api/v1/admin/schedules/:schedule_id",
            put(courts::update_schedule).delete(courts::delete_schedule),
        )
        .route(
            "/api/v1/admin/reservations",
            get(reservations::list_all_reservations),
        )
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/:user_id", delete(admin::delete_user));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config.security.cors_origins))
        .with_state(state)
}
