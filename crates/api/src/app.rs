use axum::{extract::DefaultBodyLimit, middleware, routing::get, routing::post, Router};
use domain::services::InvitationService;
use persistence::PgMembershipStore;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{group_invitations, health};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub invitations: Arc<InvitationService<PgMembershipStore>>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let mut invitations = InvitationService::new(PgMembershipStore::new(pool.clone()));
        if let Some(timeout) = config.invitations.transaction_timeout() {
            invitations = invitations.with_transaction_timeout(timeout);
        }

        Self {
            pool,
            config: Arc::new(config),
            invitations: Arc::new(invitations),
        }
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let state = AppState::new(config, pool);
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let max_body_size = state.config.server.max_body_size;

    let invitation_routes = Router::new()
        .route(
            "/api/v1/groups/:group_id/invitations",
            post(group_invitations::create_invitation),
        )
        .route(
            "/api/v1/groups/:group_id/join",
            post(group_invitations::join_group),
        );

    let public_routes = Router::new()
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(invitation_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .with_state(state)
}
