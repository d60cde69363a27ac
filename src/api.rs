use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::{
    analysis::{analyze, resolve_flavor_profile},
    app_state::{AppState, Status},
    models::{Dish, FeatureBundle, Wine},
    pairing::{self, PairingOutcome},
};

// --- Payloads y Respuestas de la API ---

#[derive(Deserialize)]
pub struct RecommendPayload {
    query: String,
}

#[derive(Deserialize)]
pub struct AnalyzePayload {
    text: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    features: FeatureBundle,
    flavor_profile: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/dishes", get(list_dishes_handler))
        .route("/api/wines", get(list_wines_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/recommend", post(recommend_handler))
        .route("/api/status", get(status_handler))
        .route("/api/shutdown", post(shutdown_handler))
        .with_state(app_state)
}

// --- Handlers ---

#[axum::debug_handler]
async fn list_dishes_handler(State(state): State<AppState>) -> Json<Vec<Dish>> {
    Json(state.catalog.dishes.clone())
}

#[axum::debug_handler]
async fn list_wines_handler(State(state): State<AppState>) -> Json<Vec<Wine>> {
    Json(state.catalog.wines.clone())
}

#[axum::debug_handler]
async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePayload>,
) -> Json<AnalyzeResponse> {
    let features = analyze(&state.taxonomy, &payload.text);
    let flavor_profile = resolve_flavor_profile(&features).to_string();
    Json(AnalyzeResponse {
        features,
        flavor_profile,
    })
}

#[axum::debug_handler]
async fn recommend_handler(
    State(state): State<AppState>,
    Json(payload): Json<RecommendPayload>,
) -> Result<Json<PairingOutcome>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Por favor, selecione ou descreva um prato."})),
        ));
    }

    match pairing::pair_dish(&state.taxonomy, &state.catalog, &state.justifier, &payload.query).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            error!("Error al procesar la recomendación: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Error al procesar la recomendación: {}", e)})),
            ))
        }
    }
}

#[axum::debug_handler]
async fn status_handler(State(state): State<AppState>) -> Json<Status> {
    Json(state.status())
}

// --- Handler de Apagado ---

#[axum::debug_handler]
async fn shutdown_handler(State(state): State<AppState>) -> impl IntoResponse {
    info!("Petición de apagado recibida.");
    let sender = match state.shutdown_sender.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    if let Some(sender) = sender {
        let _ = sender.send(());
    }
    StatusCode::OK
}
