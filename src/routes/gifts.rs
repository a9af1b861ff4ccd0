use actix_web::{http::StatusCode, web, HttpResponse, HttpResponseBuilder, Responder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use crate::config::Settings;
use crate::core::{default_catalog, mock_theme_set, Matcher};
use crate::models::{CatalogGift, ErrorResponse, HealthResponse, RecipientProfile, ScoreResponse, ScoringWeights};
use crate::services::{ProxyOutcome, ProxyPolicy, ThemeProxy, UpstreamClient, UpstreamError, NO_STORE_HEADERS};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ThemeProxy<UpstreamClient>>,
    pub matcher: Matcher,
    pub catalog: Arc<Vec<CatalogGift>>,
    /// Bound on the gift-suggestions forwarding call
    pub forward_timeout: Duration,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, policy: ProxyPolicy, weights: ScoringWeights) -> Self {
        let forward_timeout = policy.total_timeout;
        Self {
            proxy: Arc::new(ThemeProxy::new(upstream, policy)),
            matcher: Matcher::new(weights),
            catalog: Arc::new(default_catalog()),
            forward_timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(settings.upstream.endpoint.clone())?;
        Ok(Self::new(
            upstream,
            ProxyPolicy::from(&settings.upstream),
            ScoringWeights::from(&settings.scoring.weights),
        ))
    }
}

/// Configure all gift-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/gifts", web::get().to(get_gifts))
        .route("/gift-suggestions", web::post().to(forward_gift_suggestions))
        .route("/score", web::post().to(score_gifts));
}

fn no_store(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    for header in NO_STORE_HEADERS {
        builder.insert_header(header);
    }
    builder
}

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendation proxy endpoint
///
/// GET /api/gifts?age=30&gender=female&culture=...&_t=...&_r=...
///
/// Answers 200 with `{ themes, isMockData }`, 202 with a loading status when
/// the caller should retry, or 200 with mock themes when the service could
/// not be reached in time. Never answers with an error status.
async fn get_gifts(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let params = query.into_inner();

    tracing::info!(
        "Proxying recommendation request to: {} ({} params)",
        state.proxy.source().endpoint(),
        params.len()
    );

    match state.proxy.relay(&params).await {
        ProxyOutcome::Resolved(body) => {
            tracing::info!("Returning recommendation service response");
            no_store(StatusCode::OK).json(body)
        }
        ProxyOutcome::StillLoading(loading) => no_store(StatusCode::ACCEPTED).json(loading),
        ProxyOutcome::Mock(reason) => {
            tracing::info!("Returning mock data ({:?})", reason);
            no_store(StatusCode::OK).json(mock_theme_set())
        }
    }
}

/// Forward an arbitrary profile body to the recommendation service
///
/// POST /api/gift-suggestions
async fn forward_gift_suggestions(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let failure = |message: String| {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to fetch gift suggestions".to_string(),
            message,
            status_code: 500,
        })
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Unreadable gift suggestion request: {}", e);
            return failure(format!("Invalid JSON: {}", e));
        }
    };

    match state
        .proxy
        .source()
        .forward_suggestions(&payload, state.forward_timeout)
        .await
    {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(e) => {
            tracing::error!("Failed to forward gift suggestion request: {}", e);
            failure(e.to_string())
        }
    }
}

/// Rank the built-in catalog for a recipient profile
///
/// POST /api/score
async fn score_gifts(
    state: web::Data<AppState>,
    profile: web::Json<RecipientProfile>,
) -> impl Responder {
    if let Err(errors) = profile.validate() {
        tracing::info!("Validation failed for score request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let gifts = state.matcher.rank(&profile, &state.catalog);

    tracing::debug!(
        "Scored {} catalog gifts for {} / {}",
        gifts.len(),
        profile.relationship,
        profile.occasion
    );

    HttpResponse::Ok().json(ScoreResponse {
        total: gifts.len(),
        gifts,
    })
}
