use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::wizard::{self, Judge, JudgementResult, TextRequest, TranslationResult, Translate};

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Wizard Trainer API",
        "environment": state.config.environment_name(),
        "endpoints": ["/api/translate", "/api/judge", "/api/health"]
    }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Translate normal text to wizard speech with three options
pub async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<TranslationResult>, ApiError> {
    let result = wizard::run(&Translate, state.llm.as_ref(), &state.config.llm, &request.text).await?;
    Ok(Json(result))
}

/// Judge how wizard-like the text sounds
pub async fn judge_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<JudgementResult>, ApiError> {
    let result = wizard::run(&Judge, state.llm.as_ref(), &state.config.llm, &request.text).await?;
    Ok(Json(result))
}
