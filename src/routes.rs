// src/routes.rs
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{BytesRejection, JsonRejection},
        DefaultBodyLimit, Query, State,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    challenge::ChallengeStore, config::Config, error::AuthError, registry::Registry, types::*,
    verifier,
};

pub struct AppState {
    pub registry: Registry,
    pub challenges: ChallengeStore,
    pub challenge_ttl_secs: u64,
}

impl AppState {
    pub fn new(challenge_ttl_secs: u64) -> Self {
        Self {
            registry: Registry::new(),
            challenges: ChallengeStore::new(),
            challenge_ttl_secs,
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Core refusals travel as `200 {ok:false, error}`, like every other result.
/// A body that could not be read at all (e.g. over the size limit) keeps
/// the rejection's own status.
pub enum ApiError {
    Auth(AuthError),
    Body(BytesRejection),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => Json(ErrorRes {
                ok: false,
                error: e.to_string(),
            })
            .into_response(),
            ApiError::Body(rejection) => {
                warn!(error = %rejection.body_text(), "request body rejected");
                (
                    rejection.status(),
                    Json(ErrorRes {
                        ok: false,
                        error: rejection.body_text(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

// Wrong content type or malformed JSON reads as `{}`; an unreadable body
// (too large, broken stream) is refused outright.
fn body_or_default<T: Default>(req: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match req {
        Ok(Json(r)) => Ok(r),
        Err(JsonRejection::BytesRejection(e)) => Err(ApiError::Body(e)),
        Err(_) => Ok(T::default()),
    }
}

pub fn router(state: SharedState, config: &Config) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/register", post(register))
        .route("/challenge", get(challenge))
        .route("/verify", post(verify))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

// ---------- API HANDLERS ---------- //

async fn health() -> &'static str {
    "PKI Node Server OK"
}

async fn register(
    State(state): State<SharedState>,
    req: Result<Json<RegisterReq>, JsonRejection>,
) -> Result<Json<RegisterRes>, ApiError> {
    let req = body_or_default(req)?;
    let count = state
        .registry
        .register(&req.id, &req.name, &req.public_key_base64)?;
    Ok(Json(RegisterRes { ok: true, count }))
}

async fn challenge(
    State(state): State<SharedState>,
    query: Option<Query<ChallengeQuery>>,
) -> Result<Json<ChallengeRes>, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let issued = state
        .challenges
        .issue(query.id.trim(), state.challenge_ttl_secs)?;
    Ok(Json(ChallengeRes { ok: true, issued }))
}

async fn verify(
    State(state): State<SharedState>,
    req: Result<Json<VerifyReq>, JsonRejection>,
) -> Result<Json<VerifyRes>, ApiError> {
    let req = body_or_default(req)?;
    let ok = verifier::verify(
        &state.registry,
        &state.challenges,
        &req.id,
        &req.challenge,
        &req.signature_base64,
    )
    .inspect_err(|e| info!(id = req.id.trim(), error = %e, "verify refused"))?;
    Ok(Json(VerifyRes { ok }))
}
